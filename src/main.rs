// src/main.rs
mod config;
mod extractors;
mod pipeline;
mod storage;
mod useragents;
mod utils;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use config::{ScrapeConfig, Variant};
use useragents::client::DEFAULT_SOURCE_URL;
use utils::AppError;

/// Scrapes user agent lists from useragents.me into JSON files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which page sections to read and how to shape the output
    #[arg(long, value_enum, default_value_t = Variant::Tables)]
    variant: Variant,

    /// Page to scrape
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    url: String,

    /// Output directory for the JSON files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Pause after each category, in milliseconds
    #[arg(long, default_value = "100")]
    delay_ms: u64,

    /// Deadline for the page download, in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Debug mode - save the raw and annotated page next to the output
    #[arg(short, long)]
    debug: bool,
}

impl From<Args> for ScrapeConfig {
    fn from(args: Args) -> Self {
        Self {
            source_url: args.url,
            output_dir: args.output_dir,
            variant: args.variant,
            delay: Duration::from_millis(args.delay_ms),
            timeout: Duration::from_secs(args.timeout_secs),
            debug: args.debug,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting user agent scraping with args: {:?}", args);

    if args.timeout_secs == 0 {
        return Err(AppError::Config("--timeout-secs must be greater than zero".to_string()));
    }

    // 3. Fetch, extract and write
    let config = ScrapeConfig::from(args);
    let summary = pipeline::run(&config).await?;

    tracing::info!(
        "Scraping finished. Files written: {}, empty categories: {}, failed writes: {}, user agents: {}",
        summary.written, summary.empty, summary.failed_writes, summary.records
    );

    Ok(())
}
