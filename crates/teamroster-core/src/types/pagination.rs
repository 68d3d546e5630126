//! Pagination types for list queries.
//!
//! A [`PageRequest`] is validated once at construction: the offset is never
//! negative and the page size is always positive. Everything downstream
//! (the executor, the storage port) can rely on that without re-checking.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// A validated `(offset, page_size)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    offset: u64,
    page_size: u64,
}

impl PageRequest {
    /// Build a page request from a raw row offset and page size.
    ///
    /// Rejects `offset < 0` and `page_size <= 0` instead of clamping them.
    pub fn new(offset: i64, page_size: i64) -> AppResult<Self> {
        let offset = u64::try_from(offset)
            .map_err(|_| AppError::validation(format!("Page offset must be >= 0, got {offset}")))?;
        let page_size = u64::try_from(page_size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| {
                AppError::validation(format!("Page size must be > 0, got {page_size}"))
            })?;
        Ok(Self { offset, page_size })
    }

    /// Build a page request from a 0-based page number and a page size.
    pub fn of_page(page: i64, size: i64) -> AppResult<Self> {
        if page < 0 {
            return Err(AppError::validation(format!(
                "Page number must be >= 0, got {page}"
            )));
        }
        let offset = page
            .checked_mul(size.max(0))
            .ok_or_else(|| AppError::validation("Page offset overflows"))?;
        Self::new(offset, size)
    }

    /// The first page of the given size.
    pub fn first(page_size: i64) -> AppResult<Self> {
        Self::new(0, page_size)
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of rows on this page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// 0-based page number: how many pages of this size precede the offset.
    ///
    /// For an offset that is not a multiple of the page size the rows before
    /// it form a final partial page, so the count rounds up.
    pub fn page_number(&self) -> u64 {
        self.offset.div_ceil(self.page_size)
    }

    /// The SQL `LIMIT`/`OFFSET` pair for the content query.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.offset, self.page_size)
    }
}

/// Row window handed to the storage port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Rows to skip.
    pub offset: u64,
    /// Maximum rows to return.
    pub limit: u64,
}

impl Bounds {
    /// Create a new window.
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// A window of `limit` rows starting at the first row.
    pub const fn limit(limit: u64) -> Self {
        Self { offset: 0, limit }
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The rows on this page, in storage order.
    pub content: Vec<T>,
    /// Rows skipped before this page.
    pub offset: u64,
    /// Requested page size.
    pub page_size: u64,
    /// 0-based page number.
    pub page_number: u64,
    /// Total number of matching rows across all pages.
    pub total_elements: u64,
    /// Total number of pages: `ceil(total_elements / page_size)` for aligned
    /// offsets. For other offsets, the pages before this one plus the pages
    /// needed for the rows from `offset` onwards.
    pub total_pages: u64,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether no page follows this one.
    pub last: bool,
}

impl<T> Page<T> {
    /// Assemble a page.
    ///
    /// `total_elements` is raised to at least `offset + content.len()` so a
    /// count taken slightly after the content read can never contradict it.
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let fetched = request.offset + content.len() as u64;
        let total_elements = if content.is_empty() {
            total_elements
        } else {
            total_elements.max(fetched)
        };
        let page_number = request.page_number();
        let total_pages = if request.offset < total_elements {
            let remaining = total_elements - request.offset;
            page_number + remaining.div_ceil(request.page_size)
        } else {
            total_elements.div_ceil(request.page_size)
        };

        Self {
            content,
            offset: request.offset,
            page_size: request.page_size,
            page_number,
            total_elements,
            total_pages,
            first: request.offset == 0,
            last: request.offset.saturating_add(request.page_size) >= total_elements,
        }
    }

    /// Create an empty first page.
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Whether a page follows this one.
    pub fn has_next(&self) -> bool {
        !self.last
    }

    /// Whether a page precedes this one.
    pub fn has_previous(&self) -> bool {
        !self.first
    }

    /// Transform the rows, keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            offset: self.offset,
            page_size: self.page_size,
            page_number: self.page_number,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_negative_offset_rejected() {
        let err = PageRequest::new(-1, 10).expect_err("negative offset");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_non_positive_size_rejected() {
        assert!(PageRequest::new(0, 0).is_err());
        assert!(PageRequest::new(0, -5).is_err());
    }

    #[test]
    fn test_of_page_computes_offset() {
        let page = PageRequest::of_page(2, 5).expect("valid");
        assert_eq!(page.offset(), 10);
        assert_eq!(page.page_size(), 5);
        assert_eq!(page.page_number(), 2);
        assert_eq!(page.bounds(), Bounds::new(10, 5));
    }

    #[test]
    fn test_of_page_rejects_negative_page() {
        assert!(PageRequest::of_page(-1, 5).is_err());
        assert!(PageRequest::of_page(i64::MAX, 2).is_err());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page::new(vec![1, 2], PageRequest::first(2).expect("valid"), 4);
        assert_eq!(page.total_pages, 2);
        assert!(page.first);
        assert!(page.has_next());

        let page = Page::new(vec![5], PageRequest::new(4, 2).expect("valid"), 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.last);
        assert!(page.has_previous());
    }

    #[test]
    fn test_unaligned_offset_reaching_the_end_is_last() {
        let page = Page::new(vec![3, 4], PageRequest::new(3, 2).expect("valid"), 5);
        assert!(page.last);
        assert!(!page.has_next());
        assert_eq!(page.page_number, 2);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_unaligned_offset_with_rows_left_is_not_last() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2).expect("valid"), 5);
        assert!(!page.last);
        assert_eq!(page.page_number, 1);
        // one partial page before, then rows 1..5 in two pages
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_offset_past_the_end() {
        let page: Page<u8> = Page::new(Vec::new(), PageRequest::new(10, 2).expect("valid"), 4);
        assert!(page.last);
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<u8> = Page::empty(PageRequest::first(10).expect("valid"));
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.last);
    }

    #[test]
    fn test_serializes_camel_case() {
        let page = Page::new(vec!["a"], PageRequest::first(1).expect("valid"), 3);
        let json = serde_json::to_value(&page).expect("serialize");
        assert_eq!(json["totalElements"], 3);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["pageSize"], 1);
    }
}
