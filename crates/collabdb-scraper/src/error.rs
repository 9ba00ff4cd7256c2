use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP 429 from upstream after all retries were exhausted.
    #[error("rate limited by upstream posts API")]
    RateLimited,

    /// HTTP 5xx from upstream after all retries were exhausted.
    #[error("upstream server error {status} for @{username}")]
    Server { status: u16, username: String },

    /// Non-retryable 4xx from upstream (bad request, auth failure, unknown
    /// username). 408 is mapped here too, but is retried before surfacing.
    #[error("upstream client error {status} for @{username}")]
    Client { status: u16, username: String },

    #[error("invalid posts API base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ScraperError {
    /// The HTTP status carried by this error, when there is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited => Some(429),
            Self::Server { status, .. } | Self::Client { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Deserialize { .. } | Self::InvalidBaseUrl { .. } => None,
        }
    }
}
