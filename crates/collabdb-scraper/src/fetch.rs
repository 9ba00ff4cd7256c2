//! Cursor-driven pagination over a brand's post history.
//!
//! [`PostsClient::fetch_posts`] walks pages until one of the budgets runs
//! out or the upstream signals the end of the history. The fetcher strongly
//! prefers partial data over an error: once at least one post has been
//! collected, upstream failures end the walk and return what was gathered,
//! together with a cursor the caller can resume from. Only a failure on the
//! very first call — where there is nothing to salvage — propagates.

use std::time::Duration;

use crate::client::PostsClient;
use crate::error::ScraperError;
use crate::types::PostNode;

/// Posts collected by one pagination walk, in API page order.
#[derive(Debug)]
pub struct FetchResult {
    pub posts: Vec<PostNode>,

    /// Cursor to resume from. `None` means the history was fully drained
    /// (or the walk never got a usable cursor); `Some` means more pages
    /// likely exist.
    pub last_cursor: Option<String>,
}

impl PostsClient {
    /// Fetches up to `max_posts` posts for `username` using at most
    /// `max_api_calls` upstream calls, optionally resuming from
    /// `start_cursor`.
    ///
    /// Stop conditions, in the order they are checked each iteration:
    ///
    /// 1. A blank cursor on any call after the first (cannot continue).
    /// 2. A failure that survived the retry policy: 429 sleeps the
    ///    configured cooldown and stops with partial results; 5xx stops
    ///    with partial results when any exist, otherwise it is fatal;
    ///    other 4xx stop cleanly.
    /// 3. A payload with no `result` envelope or no edges.
    /// 4. `has_next_page == false` (normal end; the cursor keeps the value
    ///    the final request was made with).
    /// 5. A blank `end_cursor` (history drained; cursor cleared).
    ///
    /// Otherwise the page is appended, the cursor advances, and the walk
    /// sleeps the politeness delay before the next call.
    ///
    /// # Errors
    ///
    /// Propagates the underlying [`ScraperError`] only when the first call
    /// fails with nothing collected, so callers can tell "never started"
    /// from "budget exhausted".
    pub async fn fetch_posts(
        &self,
        username: &str,
        max_posts: usize,
        max_api_calls: u32,
        start_cursor: Option<&str>,
    ) -> Result<FetchResult, ScraperError> {
        let mut posts: Vec<PostNode> = Vec::new();
        let mut cursor = start_cursor.unwrap_or("").to_owned();
        let mut calls_made = 0u32;

        if !cursor.is_empty() {
            tracing::info!(username, cursor, "resuming pagination from cursor");
        }

        while posts.len() < max_posts && calls_made < max_api_calls {
            if calls_made > 0 && cursor.trim().is_empty() {
                tracing::info!(username, "cursor is blank — stopping pagination");
                break;
            }

            tracing::info!(
                username,
                call = calls_made + 1,
                collected = posts.len(),
                cursor = if cursor.is_empty() { "<first page>" } else { cursor.as_str() },
                "fetching posts page"
            );

            let page = match self.fetch_page(username, &cursor).await {
                Ok(page) => page,
                Err(ScraperError::RateLimited) => {
                    tracing::warn!(
                        username,
                        collected = posts.len(),
                        cooldown_ms = self.rate_limit_cooldown_ms,
                        "rate limited after retries — cooling down, keeping partial results"
                    );
                    if self.rate_limit_cooldown_ms > 0 {
                        tokio::time::sleep(Duration::from_millis(self.rate_limit_cooldown_ms))
                            .await;
                    }
                    break;
                }
                Err(err @ ScraperError::Server { .. }) => {
                    if posts.is_empty() {
                        return Err(err);
                    }
                    tracing::warn!(
                        username,
                        collected = posts.len(),
                        error = %err,
                        "server error after retries — returning posts collected so far"
                    );
                    break;
                }
                Err(ScraperError::Client { status, .. }) => {
                    tracing::error!(username, status, "client error after retries — stopping");
                    break;
                }
                Err(err) => {
                    if !posts.is_empty() {
                        tracing::warn!(
                            username,
                            collected = posts.len(),
                            error = %err,
                            "unexpected error — returning posts collected before it"
                        );
                        break;
                    }
                    if calls_made > 0 {
                        tracing::error!(username, error = %err, "unexpected error mid-walk — stopping");
                        break;
                    }
                    // First call, nothing collected: the caller needs the error.
                    return Err(err);
                }
            };

            let Some(result) = page.result else {
                tracing::info!(username, "response has no result envelope — stopping");
                break;
            };
            if result.edges.is_empty() {
                tracing::info!(username, "response has no edges — stopping");
                break;
            }

            tracing::info!(username, fetched = result.edges.len(), "fetched posts page");
            posts.extend(result.edges.into_iter().map(|edge| edge.node));

            let page_info = result.page_info.unwrap_or_default();
            if !page_info.has_next_page {
                tracing::info!(username, "no more pages available");
                break;
            }

            match page_info.end_cursor {
                Some(next) if !next.trim().is_empty() => cursor = next,
                _ => {
                    tracing::info!(username, "end_cursor is blank — history drained");
                    cursor.clear();
                    break;
                }
            }

            calls_made += 1;
            if self.page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.page_delay_ms)).await;
            }
        }

        posts.truncate(max_posts);
        let last_cursor = if cursor.trim().is_empty() {
            None
        } else {
            Some(cursor)
        };

        tracing::info!(
            username,
            requested = max_posts,
            collected = posts.len(),
            calls_made,
            resumable = last_cursor.is_some(),
            "pagination finished"
        );
        if let Some(ref resume) = last_cursor {
            tracing::info!(username, cursor = resume.as_str(), "cursor available to resume scraping");
        }

        Ok(FetchResult { posts, last_cursor })
    }
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
