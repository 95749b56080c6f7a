//! Paging
//!
//! 1-based page slicing over ordered result lists (catalog pages, order
//! history). Out-of-range pages yield an empty page, never an error.

/// Position of a page within the full result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based page number
    pub page: usize,

    /// Items per page
    pub per_page: usize,

    /// Total items across all pages
    pub total_items: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether a page exists before this one
    pub has_previous_page: bool,

    /// Whether a page exists after this one
    pub has_next_page: bool,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    info: PageInfo,
}

impl<T: Clone> Page<T> {
    /// Slice one page out of an ordered list.
    ///
    /// `page` is 1-based and clamped to at least 1; `per_page` is clamped to
    /// at least 1. A page past the end has no items.
    pub fn slice(items: &[T], page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page);

        let start = page.saturating_sub(1).saturating_mul(per_page);
        let end = start.saturating_add(per_page).min(total_items);

        let page_items = items
            .get(start..end)
            .map(<[T]>::to_vec)
            .unwrap_or_default();

        let info = PageInfo {
            page,
            per_page,
            total_items,
            total_pages,
            has_previous_page: page > 1,
            has_next_page: end < total_items,
        };

        Page {
            items: page_items,
            info,
        }
    }
}

impl<T> Page<T> {
    /// The items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Position of this page within the full list.
    #[must_use]
    pub fn info(&self) -> PageInfo {
        self.info
    }
}
