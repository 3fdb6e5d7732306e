use crate::core::{clamp_page, page_count};

/// Pagination controls derived from the current listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    /// Controls are only shown once a non-empty listing has loaded
    pub visible: bool,
}

impl Pagination {
    pub fn new(page: u32, total: u64, page_size: u32, visible: bool) -> Self {
        Self {
            page,
            total_pages: page_count(total, page_size),
            visible,
        }
    }

    /// "Previous" is enabled
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// "Next" is enabled
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous().then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    /// Clamp an arbitrary page jump into range
    pub fn clamp(&self, page: u32) -> u32 {
        clamp_page(page, self.total_pages)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}
