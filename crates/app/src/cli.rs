//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use janitor_domain::{ListFilter, ListQuery, LogLevel, PAGE_SIZES};

#[derive(Parser, Debug)]
#[command(name = "janitor", version, about = "Command-line client for the bug tracker API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store an API key after checking it against the backend
    Login {
        /// API key to store
        key: String,
    },
    /// Forget the stored API key
    Logout,
    /// Check the stored API key and show the configuration
    Status,
    /// Issue a GET request and print the result envelope
    Get {
        /// Path relative to the API base URL, e.g. /task/42
        path: String,
        /// 0-based page index for list endpoints
        #[arg(long)]
        page: Option<u32>,
        /// Page size for list endpoints
        #[arg(long, value_parser = parse_page_size)]
        size: Option<u32>,
        /// Free-text search for list endpoints
        #[arg(long)]
        search: Option<String>,
        /// Field filter, `field:value`
        #[arg(long)]
        filter: Option<ListFilter>,
    },
    /// Inspect the diagnostic log buffer
    Logs {
        #[command(subcommand)]
        action: Option<LogsAction>,
        /// Only show entries with this level
        #[arg(long)]
        level: Option<LogLevel>,
        /// Case-insensitive text matched against message and context
        #[arg(long)]
        search: Option<String>,
    },
    /// Print the pagination window for a page
    Pages {
        /// 0-based current page
        current: u32,
        /// Total number of pages
        total: u32,
        /// Pages shown on each side of the current page
        #[arg(long, default_value_t = 2)]
        delta: u32,
        /// Larger ranges are elided with ellipses
        #[arg(long, default_value_t = 5)]
        max_pages: u32,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum LogsAction {
    /// Write the whole buffer to a JSON file
    Export {
        /// Target directory, defaults to the current directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Empty the buffer and the persisted snapshot
    Clear,
}

impl Command {
    /// Location stamped on log entries while the command runs.
    pub const fn location(&self) -> &'static str {
        match self {
            Self::Login { .. } => "/login",
            Self::Logout => "/logout",
            Self::Status => "/status",
            Self::Get { .. } => "/get",
            Self::Logs { .. } => "/logs",
            Self::Pages { .. } => "/pages",
        }
    }
}

/// Builds the list query for `get`, or `None` when no list option is set.
pub fn list_query(
    page: Option<u32>,
    size: Option<u32>,
    search: Option<String>,
    filter: Option<ListFilter>,
) -> Option<ListQuery> {
    if page.is_none() && size.is_none() && search.is_none() && filter.is_none() {
        return None;
    }
    let mut query = ListQuery {
        page,
        size,
        ..ListQuery::default()
    };
    if let Some(search) = search {
        query = query.with_search(search);
    }
    if let Some(filter) = filter {
        query = query.with_filter(filter);
    }
    Some(query)
}

fn parse_page_size(raw: &str) -> Result<u32, String> {
    let size: u32 = raw.parse().map_err(|e| format!("{e}"))?;
    if PAGE_SIZES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("page size must be one of {PAGE_SIZES:?}"))
    }
}
