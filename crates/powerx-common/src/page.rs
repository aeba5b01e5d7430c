//! Pagination models
//!
//! Page indexes are 1-based. A page index or page size of zero means
//! "no paging": the whole filtered result set is returned.

use serde::{Deserialize, Serialize};

/// Generic paginated result
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: u64,
    pub page_number: u64,
    pub page_size: u64,
    pub pages_available: u64,
    pub page_items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            page_number: 0,
            page_size: 0,
            pages_available: 0,
            page_items: vec![],
        }
    }
}

impl<T> Page<T> {
    pub fn new(total_count: u64, page_number: u64, page_size: u64, page_items: Vec<T>) -> Self {
        Self {
            total_count,
            page_number,
            page_size,
            pages_available: if page_size > 0 {
                total_count.div_ceil(page_size)
            } else if total_count > 0 {
                1
            } else {
                0
            },
            page_items,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
            pages_available: self.pages_available,
            page_items: self.page_items.into_iter().map(f).collect(),
        }
    }
}

/// Query option paired with the requested page window.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOption<T> {
    pub option: T,
    pub page_index: u64,
    pub page_size: u64,
}

impl<T> PageOption<T> {
    pub fn new(option: T, page_index: u64, page_size: u64) -> Self {
        Self {
            option,
            page_index,
            page_size,
        }
    }

    /// Returns the `(offset, limit)` window, or `None` when paging is disabled.
    pub fn window(&self) -> Option<(u64, u64)> {
        page_window(self.page_index, self.page_size)
    }
}

/// Returns the `(offset, limit)` for a 1-based page, or `None` when either
/// value is zero.
pub fn page_window(page_index: u64, page_size: u64) -> Option<(u64, u64)> {
    if page_index == 0 || page_size == 0 {
        return None;
    }
    Some(((page_index - 1) * page_size, page_size))
}
