//! Client-side pagination.

use std::fmt;
use std::ops::Range;

/// The current page and page size of a table.
///
/// Pages are 1-based. `items_per_page` is never zero; the engine rejects a
/// zero page size before it gets here.
///
/// # Example
///
/// ```
/// use catalog_lib::query::Pagination;
///
/// let mut page = Pagination::new(10);
/// page.current_page = 4;
/// page.clamp(25);
///
/// assert_eq!(page.current_page, 3);
/// assert_eq!(page.range(25), 20..25);
/// assert!(page.has_prev());
/// assert!(!page.has_next(25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page, 1-based.
    pub current_page: usize,
    /// Rows shown per page.
    pub items_per_page: usize,
}

impl Pagination {
    /// Creates pagination on page 1.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    /// Returns the number of pages for `filtered` items, at least 1.
    pub fn total_pages(&self, filtered: usize) -> usize {
        filtered.div_ceil(self.items_per_page.max(1)).max(1)
    }

    /// Clamps the current page into `[1, total_pages]`.
    pub fn clamp(&mut self, filtered: usize) {
        self.current_page = self.current_page.clamp(1, self.total_pages(filtered));
    }

    /// Returns the slice bounds of the current page.
    ///
    /// The range is empty when the page lies past the end.
    pub fn range(&self, filtered: usize) -> Range<usize> {
        let per_page = self.items_per_page.max(1);
        let start = self.current_page.saturating_sub(1).saturating_mul(per_page).min(filtered);
        let end = start.saturating_add(per_page).min(filtered);
        start..end
    }

    /// Returns `true` if a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self, filtered: usize) -> bool {
        self.current_page < self.total_pages(filtered)
    }

    /// Returns the display info for the current page.
    pub fn info(&self, filtered: usize) -> PageInfo {
        PageInfo {
            current_page: self.current_page,
            total_pages: self.total_pages(filtered),
            filtered_count: filtered,
        }
    }
}

/// What pagination controls show after a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page, 1-based.
    pub current_page: usize,
    /// Number of pages.
    pub total_pages: usize,
    /// Number of items in the filtered set.
    pub filtered_count: usize,
}

impl PageInfo {
    /// Returns `true` if the previous button should be enabled.
    pub fn prev_enabled(&self) -> bool {
        self.current_page != 1
    }

    /// Returns `true` if the next button should be enabled.
    pub fn next_enabled(&self) -> bool {
        self.current_page != self.total_pages
    }
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.current_page, self.total_pages)
    }
}
