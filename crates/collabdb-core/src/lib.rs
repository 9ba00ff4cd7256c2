pub mod app_config;
pub mod brands;
pub mod config;
pub mod influencers;

use thiserror::Error;

pub use app_config::AppConfig;
pub use brands::BrandIdentity;
pub use config::{load_app_config, load_app_config_from_env};
pub use influencers::{EngagementSnapshot, InfluencerCandidate, ScrapeOutcome};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
