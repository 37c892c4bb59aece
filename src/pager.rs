use serde::Serialize;

pub const RESULTS_PER_PAGE: usize = 10;

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Items on page `page_number` (1-based). Out-of-range pages are empty;
/// callers are expected to keep navigation inside `1..=total_pages`.
pub fn page<T>(items: &[T], page_size: usize, page_number: usize) -> &[T] {
    if page_size == 0 || page_number == 0 {
        return &[];
    }
    let start = (page_number - 1).saturating_mul(page_size).min(items.len());
    let end = page_number.saturating_mul(page_size).min(items.len());
    &items[start..end]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub number: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub items: &'a [T],
}

pub fn paginate<T>(items: &[T], page_size: usize, page_number: usize) -> Page<'_, T> {
    let total = total_pages(items.len(), page_size);
    Page {
        number: page_number,
        total_pages: total,
        has_previous: page_number > 1,
        has_next: page_number < total,
        items: page(items, page_size, page_number),
    }
}
