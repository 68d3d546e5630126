//! Paginated query execution with a first-page count short-circuit.
//!
//! A paged listing needs two reads: the bounded content and the total number
//! of matching rows. The count is the expensive one, so it is skipped when
//! the first page already came back short: no later page can then hold any
//! rows and the total is simply the number fetched.
//!
//! The rule only ever fires on the first page. A short page at a later
//! offset still runs the count.

use std::future::Future;

use tracing::{debug, warn};

use crate::result::AppResult;
use crate::types::{Bounds, Page, PageRequest};

/// The total implied by the fetched slice, when the count can be skipped.
///
/// Returns `Some(fetched)` only for `offset == 0 && fetched < page_size`.
pub fn short_circuit_total(page: &PageRequest, fetched: usize) -> Option<u64> {
    let fetched = fetched as u64;
    (page.offset() == 0 && fetched < page.page_size()).then_some(fetched)
}

/// Run a paged query.
///
/// `content_query` receives the row window for the page and is always run
/// first. `count_query` runs at most once and only when
/// [`short_circuit_total`] cannot infer the total. Errors from either query
/// are returned unchanged; nothing is retried.
pub async fn paginate<T, C, CFut, N, NFut>(
    page: PageRequest,
    content_query: C,
    count_query: N,
) -> AppResult<Page<T>>
where
    C: FnOnce(Bounds) -> CFut,
    CFut: Future<Output = AppResult<Vec<T>>>,
    N: FnOnce() -> NFut,
    NFut: Future<Output = AppResult<u64>>,
{
    let mut content = content_query(page.bounds()).await?;

    let limit = usize::try_from(page.page_size()).unwrap_or(usize::MAX);
    if content.len() > limit {
        warn!(
            fetched = content.len(),
            page_size = page.page_size(),
            "Content query ignored its limit, truncating"
        );
        content.truncate(limit);
    }

    let total = match short_circuit_total(&page, content.len()) {
        Some(total) => {
            debug!(
                total,
                page_size = page.page_size(),
                "First page is short, skipping count query"
            );
            total
        }
        None => count_query().await?,
    };

    Ok(Page::new(content, page, total))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::{AppError, ErrorKind};

    async fn run(
        rows: u64,
        page: PageRequest,
        counts: &AtomicUsize,
    ) -> AppResult<Page<u64>> {
        paginate(
            page,
            |bounds| async move {
                Ok((bounds.offset..rows)
                    .take(bounds.limit as usize)
                    .collect())
            },
            || async {
                counts.fetch_add(1, Ordering::SeqCst);
                Ok(rows)
            },
        )
        .await
    }

    #[tokio::test]
    async fn test_short_first_page_skips_count() {
        let counts = AtomicUsize::new(0);
        let page = run(4, PageRequest::first(10).unwrap(), &counts).await.unwrap();
        assert_eq!(page.content.len(), 4);
        assert_eq!(page.total_elements, 4);
        assert_eq!(counts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_full_first_page_counts() {
        let counts = AtomicUsize::new(0);
        let page = run(4, PageRequest::first(2).unwrap(), &counts).await.unwrap();
        assert_eq!(page.content, vec![0, 1]);
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(counts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exactly_page_size_rows_still_counts() {
        let counts = AtomicUsize::new(0);
        let page = run(4, PageRequest::first(4).unwrap(), &counts).await.unwrap();
        assert_eq!(page.total_elements, 4);
        assert_eq!(counts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_later_short_page_still_counts() {
        let counts = AtomicUsize::new(0);
        let page = run(5, PageRequest::new(4, 2).unwrap(), &counts).await.unwrap();
        assert_eq!(page.content, vec![4]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(counts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_first_page_is_zero_without_count() {
        let counts = AtomicUsize::new(0);
        let page = run(0, PageRequest::first(20).unwrap(), &counts).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
        assert_eq!(counts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_overlong_content_is_truncated() {
        let page = paginate(
            PageRequest::first(2).unwrap(),
            |_| async { Ok(vec![1, 2, 3]) },
            || async { Ok(3) },
        )
        .await
        .unwrap();
        assert_eq!(page.content, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_count_failure_propagates() {
        let result: AppResult<Page<u8>> = paginate(
            PageRequest::first(1).unwrap(),
            |_| async { Ok(vec![1]) },
            || async { Err(AppError::service_unavailable("pool closed")) },
        )
        .await;
        assert_eq!(result.unwrap_err().kind, ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_short_circuit_rule() {
        let first = PageRequest::first(3).unwrap();
        assert_eq!(short_circuit_total(&first, 2), Some(2));
        assert_eq!(short_circuit_total(&first, 3), None);
        let second = PageRequest::new(3, 3).unwrap();
        assert_eq!(short_circuit_total(&second, 1), None);
    }
}
