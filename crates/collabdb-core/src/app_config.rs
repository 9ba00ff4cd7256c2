pub const DEFAULT_POSTS_API_URL: &str = "https://instagram120.p.rapidapi.com/api/instagram/posts";
pub const DEFAULT_POSTS_API_HOST: &str = "instagram120.p.rapidapi.com";

#[derive(Clone)]
pub struct AppConfig {
    /// Upstream posts-API key. Required; there is no anonymous access.
    pub posts_api_key: String,
    pub posts_api_url: String,
    pub posts_api_host: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Retries after the initial attempt on transient upstream failures.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub retry_backoff_cap_ms: u64,
    /// Delay between successive page fetches within one scrape.
    pub page_delay_ms: u64,
    /// Cooldown observed after a 429 survives all retries, before the
    /// scrape stops with partial results.
    pub rate_limit_cooldown_ms: u64,
    /// Minimum similarity ratio at which two usernames are treated as the
    /// same underlying brand account.
    pub similarity_threshold: f64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("posts_api_key", &"[redacted]")
            .field("posts_api_url", &self.posts_api_url)
            .field("posts_api_host", &self.posts_api_host)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("retry_backoff_cap_ms", &self.retry_backoff_cap_ms)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("rate_limit_cooldown_ms", &self.rate_limit_cooldown_ms)
            .field("similarity_threshold", &self.similarity_threshold)
            .finish()
    }
}
