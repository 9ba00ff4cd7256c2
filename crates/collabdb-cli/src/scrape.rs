//! The `scrape` command: run one brand scrape and export the outcome as a
//! JSON report.

use std::path::PathBuf;

use collabdb_core::AppConfig;
use collabdb_scraper::{PostsClient, PostsClientConfig, ScrapeRequest, Scraper, UsernameMatcher};

/// Runs the full scrape pipeline for `username` and writes a JSON report.
///
/// Prints the resumable cursor (when one exists) so the operator can feed
/// it back through `--resume-cursor` on the next invocation.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed, the very first
/// upstream call fails with nothing collected, or the report cannot be
/// written. Later upstream failures produce a partial report, not an error.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn run_scrape(
    config: &AppConfig,
    username: &str,
    max_posts: usize,
    max_api_calls: u32,
    resume_cursor: Option<String>,
    exclude_usernames: Vec<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let client = PostsClient::new(PostsClientConfig {
        api_key: config.posts_api_key.clone(),
        api_url: config.posts_api_url.clone(),
        api_host: config.posts_api_host.clone(),
        timeout_secs: config.request_timeout_secs,
        max_retries: config.max_retries,
        backoff_base_ms: config.retry_backoff_base_ms,
        backoff_cap_ms: config.retry_backoff_cap_ms,
        page_delay_ms: config.page_delay_ms,
        rate_limit_cooldown_ms: config.rate_limit_cooldown_ms,
    })
    .map_err(|e| anyhow::anyhow!("failed to build posts client: {e}"))?;

    let matcher = UsernameMatcher::with_threshold(config.similarity_threshold);
    let scraper = Scraper::new(client, matcher);

    let outcome = scraper
        .scrape(&ScrapeRequest {
            username: username.to_owned(),
            max_posts,
            max_api_calls,
            resume_cursor,
            exclude_usernames,
        })
        .await?;

    let path = output.unwrap_or_else(|| default_report_path(username));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let report = serde_json::to_string_pretty(&outcome)?;
    std::fs::write(&path, report)?;

    println!(
        "scraped @{username}: {} posts scanned, {} candidates -> {}",
        outcome.posts_scanned,
        outcome.candidates.len(),
        path.display()
    );
    if let Some(cursor) = &outcome.last_cursor {
        println!("resume with: --resume-cursor {cursor}");
    }

    Ok(())
}

/// `scraped_data/brand_scrape_<username>_<timestamp>.json`, timestamp
/// filesystem-safe.
fn default_report_path(username: &str) -> PathBuf {
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S");
    PathBuf::from("scraped_data").join(format!("brand_scrape_{username}_{timestamp}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_report_path_is_under_scraped_data() {
        let path = default_report_path("acme");
        assert!(path.starts_with("scraped_data"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("brand_scrape_acme_"));
        assert!(name.ends_with(".json"));
    }
}
