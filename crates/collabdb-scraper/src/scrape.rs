//! One-shot scrape orchestration: fetch pages, resolve the brand, extract
//! candidates.

use chrono::Utc;
use collabdb_core::ScrapeOutcome;

use crate::client::PostsClient;
use crate::error::ScraperError;
use crate::extract::{extract_influencers, resolve_brand_identity};
use crate::similarity::UsernameMatcher;

/// Parameters of one scrape invocation.
///
/// Budget bounds (`max_posts` within 1..=10_000, `max_api_calls` within
/// 1..=1000) are enforced by the calling layer; the pipeline itself only
/// treats them as loop limits.
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub username: String,
    pub max_posts: usize,
    pub max_api_calls: u32,
    /// Cursor from a previous run to resume from.
    pub resume_cursor: Option<String>,
    /// Handles that must never appear as candidates (the caller's own
    /// accounts, known agencies, etc.).
    pub exclude_usernames: Vec<String>,
}

/// The whole pipeline behind one scrape: a [`PostsClient`] for fetching and
/// a [`UsernameMatcher`] for collapsing sibling brand accounts.
///
/// A scrape is fully sequential — each page's cursor depends on the prior
/// response — but separate `Scraper` instances for different brands can run
/// concurrently; nothing mutable is shared.
pub struct Scraper {
    client: PostsClient,
    matcher: UsernameMatcher,
}

impl Scraper {
    #[must_use]
    pub fn new(client: PostsClient, matcher: UsernameMatcher) -> Self {
        Self { client, matcher }
    }

    /// Runs one scrape end to end and returns the outcome ready for export.
    ///
    /// Re-running with the `last_cursor` of a previous outcome resumes
    /// rather than duplicates, provided the downstream store upserts by
    /// platform user id. Note that brand identity is resolved from the
    /// first post of *this* run's batch, which on a resumed scrape is
    /// mid-stream.
    ///
    /// # Errors
    ///
    /// Propagates [`ScraperError`] only when the very first upstream call
    /// fails with nothing collected; any later failure yields a partial
    /// outcome with a resumable cursor instead.
    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeOutcome, ScraperError> {
        tracing::info!(
            username = request.username.as_str(),
            max_posts = request.max_posts,
            max_api_calls = request.max_api_calls,
            resuming = request.resume_cursor.is_some(),
            "starting scrape"
        );

        let fetched = self
            .client
            .fetch_posts(
                &request.username,
                request.max_posts,
                request.max_api_calls,
                request.resume_cursor.as_deref(),
            )
            .await?;

        let brand = resolve_brand_identity(&fetched.posts, &request.username);
        let candidates = extract_influencers(
            &fetched.posts,
            &request.username,
            &request.exclude_usernames,
            &self.matcher,
        );

        tracing::info!(
            username = request.username.as_str(),
            posts_scanned = fetched.posts.len(),
            candidates = candidates.len(),
            resumable = fetched.last_cursor.is_some(),
            "scrape finished"
        );

        Ok(ScrapeOutcome {
            brand,
            candidates,
            last_cursor: fetched.last_cursor,
            posts_scanned: fetched.posts.len(),
            scraped_at: Utc::now(),
        })
    }
}
