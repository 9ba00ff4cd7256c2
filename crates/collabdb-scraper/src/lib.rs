pub mod client;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod retry;
pub mod scrape;
pub mod similarity;
pub mod types;

pub use client::{PostsClient, PostsClientConfig};
pub use error::ScraperError;
pub use extract::{extract_influencers, resolve_brand_identity};
pub use fetch::FetchResult;
pub use scrape::{ScrapeRequest, Scraper};
pub use similarity::UsernameMatcher;
pub use types::{ApiUser, PageInfo, PostNode, PostsResponse};
