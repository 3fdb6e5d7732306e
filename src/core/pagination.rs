use std::ops::Range;

/// Number of pages needed to show `total` items, `page_size` at a time
#[inline]
pub fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(page_size as u64);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp a 1-indexed page into `1..=total_pages`
///
/// With no pages at all the only valid page is 1.
#[inline]
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Index range of a 1-indexed page within a list of `len` items
///
/// Pages past the end yield an empty range.
#[inline]
pub fn page_bounds(page: u32, limit: u32, len: usize) -> Range<usize> {
    let start = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
    let end = start.saturating_add(limit as usize);
    start.min(len)..end.min(len)
}
