//! Page request / page result types shared by every list endpoint.
//!
//! The arithmetic here is what the list views render as
//! "1–10 of 25" and "Page 1 of 3".

use std::fmt;

/// One list request: free-text query, 1-based page, page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: String,
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Page and page size are clamped to at least 1.
    pub fn new(query: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            query: query.into(),
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// `(page - 1) * page_size`
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    pub fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

/// Number of pages needed to show `total` records, never less than 1.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    let page_size = page_size.max(1) as u64;
    let pages = total.div_ceil(page_size);
    pages.max(1).min(u32::MAX as u64) as u32
}

/// Paginated response wrapper
#[derive(Debug, Clone)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_matching: u64,
    pub page_count: u32,
    pub page: u32,
    pub page_size: u32,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total_matching: u64, request: &PageRequest) -> Self {
        Self {
            items,
            total_matching,
            page_count: page_count(total_matching, request.page_size),
            page: request.page,
            page_size: request.page_size,
        }
    }

    /// Result handed out when the caller is not authenticated.
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn offset(&self) -> u64 {
        (self.page.max(1) as u64 - 1) * self.page_size as u64
    }

    /// Rows shown so far on this page, `None` when the page is empty.
    ///
    /// The end is the cumulative number of rows shown through this page,
    /// clamped to the total when the total reaches this page at all.
    pub fn range(&self) -> Option<DisplayRange> {
        if self.items.is_empty() {
            return None;
        }
        let offset = self.offset();
        let shown = offset + self.items.len() as u64;
        let end = if self.total_matching >= offset {
            shown.min(self.total_matching)
        } else {
            shown
        };
        Some(DisplayRange {
            start: offset + 1,
            end,
            total: self.total_matching,
        })
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.page_count)
    }

    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_matching: self.total_matching,
            page_count: self.page_count,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// "start–end of total"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl fmt::Display for DisplayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{} of {}", self.start, self.end, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(len: usize, total: u64, page: u32, size: u32) -> PageResult<usize> {
        let request = PageRequest::new("", page, size);
        PageResult::new((0..len).collect(), total, &request)
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PageRequest::new("", 1, 10).offset(), 0);
        assert_eq!(PageRequest::new("", 3, 10).offset(), 20);
    }

    #[test]
    fn zero_page_and_size_are_clamped() {
        let r = PageRequest::new("x", 0, 0);
        assert_eq!(r.page, 1);
        assert_eq!(r.page_size, 1);
        assert_eq!(r.offset(), 0);
    }

    #[test]
    fn page_count_rounds_up_with_minimum_one() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
    }

    #[test]
    fn first_full_page_of_twenty_five() {
        let p = page_of(10, 25, 1, 10);
        assert_eq!(p.page_count, 3);
        assert_eq!(p.range().unwrap().to_string(), "1–10 of 25");
        assert_eq!(p.page_label(), "Page 1 of 3");
    }

    #[test]
    fn short_last_page_of_twenty_five() {
        let p = page_of(5, 25, 3, 10);
        assert_eq!(p.range().unwrap().to_string(), "21–25 of 25");
        assert_eq!(p.page_label(), "Page 3 of 3");
    }

    #[test]
    fn empty_page_has_no_range() {
        let p = page_of(0, 25, 4, 10);
        assert!(p.range().is_none());
        assert!(p.is_empty());
    }

    #[test]
    fn end_is_not_clamped_below_offset() {
        // page-local totals on a later page: 5 matches counted, 10 skipped
        let p = page_of(5, 5, 2, 10);
        let range = p.range().unwrap();
        assert_eq!(range.start, 11);
        assert_eq!(range.end, 15);
    }

    #[test]
    fn empty_result_has_single_page() {
        let request = PageRequest::new("", 1, 10);
        let p: PageResult<()> = PageResult::empty(&request);
        assert_eq!(p.total_matching, 0);
        assert_eq!(p.page_count, 1);
        assert!(p.items.is_empty());
    }

    #[test]
    fn map_keeps_metadata() {
        let p = page_of(3, 3, 1, 10).map(|i| i * 2);
        assert_eq!(p.items, vec![0, 2, 4]);
        assert_eq!(p.total_matching, 3);
        assert_eq!(p.page_count, 1);
    }
}
