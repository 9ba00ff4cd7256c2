use crate::app_config::{AppConfig, DEFAULT_POSTS_API_HOST, DEFAULT_POSTS_API_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let posts_api_key = require("COLLABDB_POSTS_API_KEY")?;
    let posts_api_url = or_default("COLLABDB_POSTS_API_URL", DEFAULT_POSTS_API_URL);
    let posts_api_host = or_default("COLLABDB_POSTS_API_HOST", DEFAULT_POSTS_API_HOST);
    let log_level = or_default("COLLABDB_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("COLLABDB_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("COLLABDB_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("COLLABDB_RETRY_BACKOFF_BASE_MS", "1000")?;
    let retry_backoff_cap_ms = parse_u64("COLLABDB_RETRY_BACKOFF_CAP_MS", "10000")?;
    let page_delay_ms = parse_u64("COLLABDB_PAGE_DELAY_MS", "500")?;
    let rate_limit_cooldown_ms = parse_u64("COLLABDB_RATE_LIMIT_COOLDOWN_MS", "5000")?;

    let similarity_threshold = parse_f64("COLLABDB_SIMILARITY_THRESHOLD", "0.85")?;
    if !(0.0..=1.0).contains(&similarity_threshold) {
        return Err(ConfigError::InvalidEnvVar {
            var: "COLLABDB_SIMILARITY_THRESHOLD".to_string(),
            reason: format!("must be within [0.0, 1.0], got {similarity_threshold}"),
        });
    }

    Ok(AppConfig {
        posts_api_key,
        posts_api_url,
        posts_api_host,
        log_level,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        retry_backoff_cap_ms,
        page_delay_ms,
        rate_limit_cooldown_ms,
        similarity_threshold,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
