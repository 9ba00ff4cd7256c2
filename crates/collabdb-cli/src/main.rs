use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod scrape;

#[derive(Debug, Parser)]
#[command(name = "collabdb-cli")]
#[command(about = "Brand collaboration scraper command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a brand's post history and extract its influencer
    /// collaborators.
    Scrape {
        /// Brand username to scrape.
        #[arg(long)]
        username: String,

        /// Maximum number of posts to collect.
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..=10_000))]
        max_posts: u32,

        /// Maximum number of upstream API calls to spend.
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=1000))]
        max_api_calls: u32,

        /// Cursor from a previous run to resume from.
        #[arg(long)]
        resume_cursor: Option<String>,

        /// Usernames to exclude from the candidate list (repeatable).
        #[arg(long = "exclude")]
        exclude_usernames: Vec<String>,

        /// Where to write the JSON report. Defaults to
        /// `scraped_data/brand_scrape_<username>_<timestamp>.json`.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = collabdb_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    // AppConfig's Debug impl redacts the API key.
    tracing::debug!(?config, "loaded configuration");

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape {
            username,
            max_posts,
            max_api_calls,
            resume_cursor,
            exclude_usernames,
            output,
        } => {
            scrape::run_scrape(
                &config,
                &username,
                max_posts as usize,
                max_api_calls,
                resume_cursor,
                exclude_usernames,
                output,
            )
            .await
        }
    }
}
