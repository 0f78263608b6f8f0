//! Sequential "fetch until exhausted" driver shared by every list endpoint

use std::future::Future;

use log::debug;
use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::hcp::context::RequestContext;

/// Pagination details from a list response's `meta.pagination`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    #[serde(rename = "current-page")]
    pub current_page: u32,
    /// 0 when there is no next page
    #[serde(rename = "next-page", default, deserialize_with = "null_as_zero")]
    pub next_page: u32,
    #[serde(rename = "total-pages")]
    pub total_pages: u32,
    #[serde(rename = "total-count", default)]
    pub total_count: u32,
}

fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

impl Pagination {
    pub fn new(current_page: u32, next_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            next_page,
            total_pages,
            total_count: 0,
        }
    }

    pub fn with_total(mut self, total_count: u32) -> Self {
        self.total_count = total_count;
        self
    }

    /// Pagination of an unpaginated response
    pub fn single() -> Self {
        Self::new(1, 0, 1)
    }

    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// Page to request next
    ///
    /// `next_page` is only advisory; a missing or stale value falls back to
    /// the page after the current one.
    fn following(&self) -> u32 {
        if self.next_page > self.current_page {
            self.next_page
        } else {
            self.current_page + 1
        }
    }
}

/// One page of items plus its pagination
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }
}

/// Fetch every page, concatenating items in server order
///
/// Any page error aborts the traversal and discards what was collected.
pub async fn fetch_all<T, F, Fut>(ctx: &RequestContext, fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    drive(ctx, None, fetch_page).await
}

/// Like [`fetch_all`], but stop once at least `max_items` are collected
///
/// The result may exceed `max_items` by up to one page.
pub async fn fetch_all_bounded<T, F, Fut>(
    ctx: &RequestContext,
    max_items: usize,
    fetch_page: F,
) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    drive(ctx, Some(max_items), fetch_page).await
}

async fn drive<T, F, Fut>(
    ctx: &RequestContext,
    max_items: Option<usize>,
    mut fetch_page: F,
) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut page_number = 1;
    let mut accumulated = Vec::new();

    loop {
        ctx.check()?;

        let page = fetch_page(page_number).await?;
        let pagination = page.pagination;
        debug!(
            "Page {}/{} returned {} items",
            pagination.current_page,
            pagination.total_pages,
            page.items.len()
        );
        accumulated.extend(page.items);

        if let Some(max) = max_items {
            if accumulated.len() >= max {
                break;
            }
        }
        if pagination.is_last() {
            break;
        }
        page_number = pagination.following();
    }

    Ok(accumulated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, TfeError};
    use std::cell::RefCell;

    fn letters(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_multi_page_concatenates_in_order() {
        let ctx = RequestContext::new();
        let calls = RefCell::new(Vec::new());

        let result = fetch_all(&ctx, |n| {
            calls.borrow_mut().push(n);
            async move {
                Ok(match n {
                    1 => Page::new(letters(&["a", "b"]), Pagination::new(1, 2, 3)),
                    2 => Page::new(letters(&["c", "d"]), Pagination::new(2, 3, 3)),
                    _ => Page::new(letters(&["e"]), Pagination::new(3, 0, 3)),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(result, letters(&["a", "b", "c", "d", "e"]));
        assert_eq!(*calls.borrow(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_single_page() {
        let ctx = RequestContext::new();
        let calls = RefCell::new(0);

        let result = fetch_all(&ctx, |_| {
            *calls.borrow_mut() += 1;
            async { Ok(Page::new(letters(&["x", "y"]), Pagination::single())) }
        })
        .await
        .unwrap();

        assert_eq!(result, letters(&["x", "y"]));
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn test_empty_collection_terminates() {
        let ctx = RequestContext::new();
        let result: Vec<String> = fetch_all(&ctx, |_| async {
            Ok(Page::new(Vec::new(), Pagination::new(1, 0, 0)))
        })
        .await
        .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_missing_next_page_falls_back_to_increment() {
        let ctx = RequestContext::new();
        let calls = RefCell::new(Vec::new());

        let result = fetch_all(&ctx, |n| {
            calls.borrow_mut().push(n);
            async move { Ok(Page::new(vec![n], Pagination::new(n, 0, 2))) }
        })
        .await
        .unwrap();

        assert_eq!(result, vec![1, 2]);
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_error_discards_partial_results() {
        let ctx = RequestContext::new();
        let result: Result<Vec<u32>> = fetch_all(&ctx, |n| async move {
            if n == 2 {
                Err(TfeError::Server {
                    status: 503,
                    message: "unavailable".to_string(),
                })
            } else {
                Ok(Page::new(vec![n], Pagination::new(n, n + 1, 3)))
            }
        })
        .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Server);
    }

    #[tokio::test]
    async fn test_bounded_stops_after_enough_items() {
        let ctx = RequestContext::new();
        let calls = RefCell::new(0);

        let result = fetch_all_bounded(&ctx, 150, |n| {
            *calls.borrow_mut() += 1;
            async move {
                let items: Vec<u32> = (0..100).map(|i| (n - 1) * 100 + i).collect();
                Ok(Page::new(items, Pagination::new(n, n + 1, 5)))
            }
        })
        .await
        .unwrap();

        // two full pages: overshoot by up to one page is allowed
        assert_eq!(result.len(), 200);
        assert_eq!(*calls.borrow(), 2);
        assert_eq!(result[0], 0);
        assert_eq!(result[199], 199);
    }

    #[tokio::test]
    async fn test_bounded_shorter_than_limit() {
        let ctx = RequestContext::new();
        let result = fetch_all_bounded(&ctx, 10, |_| async {
            Ok(Page::new(vec![1, 2, 3], Pagination::single()))
        })
        .await
        .unwrap();
        assert_eq!(result, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_cancelled_context_stops_before_fetch() {
        let ctx = RequestContext::new();
        ctx.cancel();
        let calls = RefCell::new(0);

        let err = fetch_all(&ctx, |_| {
            *calls.borrow_mut() += 1;
            async { Ok(Page::new(vec![1], Pagination::single())) }
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_deserialize_null_next_page() {
        let p: Pagination = serde_json::from_value(serde_json::json!({
            "current-page": 3,
            "next-page": null,
            "prev-page": 2,
            "total-pages": 3,
            "total-count": 250
        }))
        .unwrap();
        assert_eq!(p.next_page, 0);
        assert_eq!(p.total_count, 250);
        assert!(p.is_last());
    }
}
