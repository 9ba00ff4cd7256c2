use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::ScraperError;
use crate::retry::retry_with_backoff;
use crate::types::PostsResponse;

pub const DEFAULT_API_URL: &str = "https://instagram120.p.rapidapi.com/api/instagram/posts";
pub const DEFAULT_API_HOST: &str = "instagram120.p.rapidapi.com";

/// Configuration for [`PostsClient`].
///
/// `Default` matches the production posts API and the pacing the upstream
/// tolerates; tests point `api_url` at a mock server and zero the delays.
#[derive(Debug, Clone)]
pub struct PostsClientConfig {
    pub api_key: String,
    pub api_url: String,
    /// Value for the API-gateway host header.
    pub api_host: String,
    pub timeout_secs: u64,
    /// Retries after the initial attempt on transient errors.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub backoff_cap_ms: u64,
    /// Politeness delay between successive page fetches.
    pub page_delay_ms: u64,
    /// Cooldown observed after a 429 survives all retries.
    pub rate_limit_cooldown_ms: u64,
}

impl Default for PostsClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_owned(),
            api_host: DEFAULT_API_HOST.to_owned(),
            timeout_secs: 30,
            max_retries: 3,
            backoff_base_ms: 1000,
            backoff_cap_ms: 10_000,
            page_delay_ms: 500,
            rate_limit_cooldown_ms: 5000,
        }
    }
}

/// HTTP client for the upstream paged-posts API.
///
/// Issues `POST {username, maxId}` requests with API-key headers and maps
/// response statuses to typed errors. Transient failures (network errors,
/// 429, 408, 5xx) are retried with exponential backoff inside
/// [`PostsClient::fetch_page`]; other 4xx statuses surface immediately.
pub struct PostsClient {
    client: Client,
    api_key: String,
    api_host: String,
    api_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
    backoff_cap_ms: u64,
    pub(crate) page_delay_ms: u64,
    pub(crate) rate_limit_cooldown_ms: u64,
}

impl PostsClient {
    /// Creates a `PostsClient` from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidBaseUrl`] if
    /// `config.api_url` does not parse.
    pub fn new(config: PostsClientConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("collabdb/0.1 (influencer-discovery)")
            .build()?;

        let api_url =
            Url::parse(&config.api_url).map_err(|e| ScraperError::InvalidBaseUrl {
                url: config.api_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: config.api_key,
            api_host: config.api_host,
            api_url,
            max_retries: config.max_retries,
            backoff_base_ms: config.backoff_base_ms,
            backoff_cap_ms: config.backoff_cap_ms,
            page_delay_ms: config.page_delay_ms,
            rate_limit_cooldown_ms: config.rate_limit_cooldown_ms,
        })
    }

    /// Fetches one page of posts for `username`, with automatic retry on
    /// transient errors.
    ///
    /// `cursor` is the opaque pagination token from the previous page; pass
    /// an empty string for the first page (the upstream expects `maxId` to
    /// be present but blank).
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] — HTTP 429 after all retries.
    /// - [`ScraperError::Server`] — HTTP 5xx after all retries.
    /// - [`ScraperError::Client`] — non-retryable 4xx (408 is retried first).
    /// - [`ScraperError::Http`] — network failure after all retries.
    /// - [`ScraperError::Deserialize`] — 200 body that does not match the
    ///   expected shape (not retried).
    pub async fn fetch_page(
        &self,
        username: &str,
        cursor: &str,
    ) -> Result<PostsResponse, ScraperError> {
        retry_with_backoff(
            self.max_retries,
            self.backoff_base_ms,
            self.backoff_cap_ms,
            || self.issue_page_request(username, cursor),
        )
        .await
    }

    /// Issues a single page request with no retry. Status mapping:
    /// 200 parses the body, 429 becomes [`ScraperError::RateLimited`],
    /// 5xx becomes [`ScraperError::Server`], any other non-2xx becomes
    /// [`ScraperError::Client`].
    async fn issue_page_request(
        &self,
        username: &str,
        cursor: &str,
    ) -> Result<PostsResponse, ScraperError> {
        let body = serde_json::json!({
            "username": username,
            "maxId": cursor,
        });

        let response = self
            .client
            .post(self.api_url.clone())
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        // The gateway reports remaining request quota; worth surfacing when
        // a scrape starts failing mysteriously.
        if let Some(remaining) = response
            .headers()
            .get("x-ratelimit-requests-remaining")
            .and_then(|v| v.to_str().ok())
        {
            tracing::debug!(username, remaining, "upstream rate-limit quota");
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ScraperError::RateLimited);
        }

        if status.is_server_error() {
            return Err(ScraperError::Server {
                status: status.as_u16(),
                username: username.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::Client {
                status: status.as_u16(),
                username: username.to_owned(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str::<PostsResponse>(&text).map_err(|e| ScraperError::Deserialize {
            context: format!("posts page for @{username}"),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
