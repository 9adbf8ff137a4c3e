//! Windowed pagination.
//!
//! Computes which page indices and ellipsis markers a pagination control
//! renders for a given current page, plus the "showing X - Y of Z" summary.
//! Page indices are 0-based throughout.

use std::fmt;

/// Page sizes offered by list views.
pub const PAGE_SIZES: [u32; 5] = [5, 10, 20, 50, 100];

/// One slot of a pagination window.
///
/// The two ellipsis variants render identically but stay distinct so they
/// can serve as stable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageItem {
    /// A page index.
    Page(u32),
    /// Elided run between the first page and the middle run.
    EllipsisLeft,
    /// Elided run between the middle run and the last page.
    EllipsisRight,
}

impl PageItem {
    /// Stable rendering key.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Page(index) => index.to_string(),
            Self::EllipsisLeft => "ellipsis-left".to_string(),
            Self::EllipsisRight => "ellipsis-right".to_string(),
        }
    }

    /// Returns the page index, or `None` for an ellipsis.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        match self {
            Self::Page(index) => Some(*index),
            Self::EllipsisLeft | Self::EllipsisRight => None,
        }
    }

    /// Returns true for either ellipsis marker.
    #[must_use]
    pub const fn is_ellipsis(&self) -> bool {
        matches!(self, Self::EllipsisLeft | Self::EllipsisRight)
    }
}

/// Displays 1-based page numbers and `...` for ellipses.
impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(index) => write!(f, "{}", u64::from(*index) + 1),
            Self::EllipsisLeft | Self::EllipsisRight => f.write_str("..."),
        }
    }
}

/// Shape parameters of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOptions {
    /// Pages shown on each side of the current page.
    pub delta: u32,
    /// Windows over at most `max_pages_to_show + 2` pages list every page.
    pub max_pages_to_show: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            delta: 2,
            max_pages_to_show: 5,
        }
    }
}

impl WindowOptions {
    /// Computes the window with these options.
    #[must_use]
    pub fn compute(&self, current_page: u32, total_pages: u32) -> Vec<PageItem> {
        compute_window(current_page, total_pages, self.delta, self.max_pages_to_show)
    }
}

/// Computes the pagination window.
///
/// Short ranges list every page. Otherwise the first and last pages are
/// always present, the current page is surrounded by `delta` neighbours, and
/// ellipsis markers stand for the elided runs. `current_page` is not
/// validated; callers keep it within `0..total_pages`.
#[must_use]
pub fn compute_window(
    current_page: u32,
    total_pages: u32,
    delta: u32,
    max_pages_to_show: u32,
) -> Vec<PageItem> {
    if total_pages <= max_pages_to_show.saturating_add(2) {
        return (0..total_pages).map(PageItem::Page).collect();
    }

    let last = total_pages - 1;
    let start = current_page.saturating_sub(delta).max(1);
    let end = current_page.saturating_add(delta).min(total_pages - 2);

    let mut pages = Vec::with_capacity(max_pages_to_show as usize + 4);
    pages.push(PageItem::Page(0));
    if start > 1 {
        pages.push(PageItem::EllipsisLeft);
    }
    pages.extend((start..=end).map(PageItem::Page));
    if end < total_pages - 2 {
        pages.push(PageItem::EllipsisRight);
    }
    pages.push(PageItem::Page(last));
    pages
}

/// Returns true when a pagination control should be rendered at all.
#[must_use]
pub const fn should_render(total_pages: u32) -> bool {
    total_pages > 1
}

/// Returns true if a previous page exists.
#[must_use]
pub const fn has_previous(current_page: u32) -> bool {
    current_page > 0
}

/// Returns true if a next page exists.
#[must_use]
pub const fn has_next(current_page: u32, total_pages: u32) -> bool {
    current_page < total_pages.saturating_sub(1)
}

/// The 1-based range of items displayed on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRange {
    /// First item shown, 0 when there are no items.
    pub start: u64,
    /// Last item shown, 0 when there are no items.
    pub end: u64,
    /// Total number of items.
    pub total: u64,
}

impl PageRange {
    /// Computes the displayed range.
    #[must_use]
    pub fn new(current_page: u32, page_size: u32, total_elements: u64) -> Self {
        if total_elements == 0 {
            return Self::default();
        }
        let page = u64::from(current_page);
        let size = u64::from(page_size);
        Self {
            start: page * size + 1,
            end: ((page + 1) * size).min(total_elements),
            total: total_elements,
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} - {} of {}", self.start, self.end, self.total)
    }
}
