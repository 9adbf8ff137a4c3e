//! List endpoint query parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// A `field:value` filter accepted by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Field name, e.g. `status`.
    pub field: String,
    /// Value to match, e.g. `OPEN`.
    pub value: String,
}

impl ListFilter {
    /// Creates a filter.
    #[must_use]
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.value)
    }
}

impl FromStr for ListFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.split_once(':') {
            Some((field, value)) if !field.trim().is_empty() => {
                Ok(Self::new(field.trim(), value.trim()))
            }
            _ => Err(DomainError::InvalidFilter(s.to_string())),
        }
    }
}

/// Paging, search and filter parameters for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// 0-based page index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Free-text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Field filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ListFilter>,
}

impl ListQuery {
    /// Creates a query for one page.
    #[must_use]
    pub const fn page(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            search: None,
            filter: None,
        }
    }

    /// Sets the search term; blank terms are dropped.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.trim().is_empty()).then_some(search);
        self
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ListFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Renders the query as parameter pairs, omitting absent fields.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size".to_string(), size.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(filter) = &self.filter {
            params.push(("filter".to_string(), filter.to_string()));
        }
        params
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn filter_parses_field_value() {
        let filter: ListFilter = "status:OPEN".parse().unwrap();
        assert_eq!(filter, ListFilter::new("status", "OPEN"));
        assert_eq!(filter.to_string(), "status:OPEN");
        assert!("no-colon".parse::<ListFilter>().is_err());
        assert!(":value".parse::<ListFilter>().is_err());
    }

    #[test]
    fn params_omit_absent_fields() {
        let query = ListQuery::page(2, 20)
            .with_search("  ")
            .with_filter(ListFilter::new("priority", "HIGH"));
        assert_eq!(
            query.to_params(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "20".to_string()),
                ("filter".to_string(), "priority:HIGH".to_string()),
            ]
        );
        assert!(ListQuery::default().to_params().is_empty());
    }
}
