//! Retry with exponential back-off for upstream posts-API calls.
//!
//! [`retry_with_backoff`] wraps a fallible async operation in an explicit
//! bounded loop with an attempt counter — never recursion — and retries on
//! transient errors only. Client errors (4xx other than 408/429) and parse
//! failures are returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset, request errors.
/// - [`ScraperError::RateLimited`] — HTTP 429.
/// - [`ScraperError::Server`] — HTTP 5xx (includes 503 and 504).
/// - [`ScraperError::Client`] with status 408 — request timeout.
///
/// **Not retriable (returned immediately):**
/// - [`ScraperError::Client`] — other 4xx; retrying won't change the answer.
/// - [`ScraperError::Deserialize`] — malformed body; retrying won't fix it.
/// - [`ScraperError::InvalidBaseUrl`] — configuration problem.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        ScraperError::RateLimited | ScraperError::Server { .. } => true,
        ScraperError::Client { status, .. } => *status == 408,
        ScraperError::Deserialize { .. } | ScraperError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors.
///
/// The sleep before retry `n` (0-based attempt counter) is
/// `min(base_ms * 2^n, cap_ms)`. With `base_ms = 1_000` and
/// `cap_ms = 10_000` the schedule is 1 s, 2 s, 4 s, then capped at 10 s.
/// Non-retriable errors are returned immediately; when the attempt budget
/// runs out the last error is returned.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    base_ms: u64,
    cap_ms: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                let delay_ms = base_ms
                    .saturating_mul(1u64 << attempt.min(10))
                    .min(cap_ms);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient upstream error — retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
            }
        }
    }
}
