//! Paged list responses.

use serde::{Deserialize, Serialize};

use crate::pagination::{PageRange, WindowOptions, PageItem};

/// A page of a list endpoint:
/// `{content, currentPage, totalPages, totalElements, size}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Items on this page.
    pub content: Vec<T>,
    /// 0-based index of this page.
    pub current_page: u32,
    /// Number of pages.
    pub total_pages: u32,
    /// Number of items across all pages.
    pub total_elements: u64,
    /// Requested page size.
    pub size: u32,
}

impl<T> PageResponse<T> {
    /// The item range shown by this page.
    #[must_use]
    pub fn range(&self) -> PageRange {
        PageRange::new(self.current_page, self.size, self.total_elements)
    }

    /// The pagination window for this page with default options.
    #[must_use]
    pub fn window(&self) -> Vec<PageItem> {
        WindowOptions::default().compute(self.current_page, self.total_pages)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case_page() {
        let page: PageResponse<String> = serde_json::from_value(json!({
            "content": ["a", "b"],
            "currentPage": 1,
            "totalPages": 3,
            "totalElements": 12,
            "size": 5
        }))
        .unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.range().to_string(), "Showing 6 - 10 of 12");
        assert_eq!(page.window().len(), 3);
    }
}
