use serde::{Deserialize, Serialize};

/// Pagination state of one listing response.
///
/// Derived from response metadata on every fetch and never stored; it only
/// exists alongside a successful result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIndexing {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl PageIndexing {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }
}
