//! # Feed Harvest
//!
//! A news archiving pipeline that ingests RSS feeds, scrapes every linked
//! article page, extracts a fixed set of structured fields from its markup,
//! and writes the articles published on a target date (yesterday in UTC by
//! default) to a pretty-printed JSON file.
//!
//! ## Features
//!
//! - Ingests any RSS 2.0-like feed list (built-in default: the Guardian
//!   section feeds), tagging every article with its feed and category
//! - Resolves six article fields (title, description, author, publication
//!   time, headline, body text) with per-field fallback rules
//! - Degrades gracefully: dead feeds and unreachable pages are logged and
//!   skipped, never fatal
//! - Writes one JSON archive per run, named after the source label and the
//!   target date
//!
//! ## Usage
//!
//! ```sh
//! feed_harvest -o ./processed_files
//! feed_harvest -f feeds.yaml --target-date 2024-03-10
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Ingestion**: Fetch each configured feed and index its item links
//! 2. **Fetching**: Download every article page, one request at a time
//! 3. **Extraction**: Resolve the six article fields from each page
//! 4. **Filtering**: Keep articles published on the target date
//! 5. **Output**: Write the JSON archive atomically

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod extract;
mod fetch;
mod filter;
mod ingest;
mod models;
mod outputs;
mod pipeline;
mod utils;

use cli::Cli;
use config::SourceList;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("feed_harvest starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output_dir, ?args.feeds, ?args.target_date, "Parsed CLI arguments");

    // Feed sources: file if given, built-in list otherwise
    let sources = match args.feeds {
        Some(ref path) => SourceList::load(path)?,
        None => SourceList::default(),
    };
    info!(label = %sources.label, feeds = sources.feeds.len(), "Loaded feed sources");

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let target = args.target_date.unwrap_or_else(filter::yesterday_utc);
    info!(%target, "Archiving articles published on target date");

    // One client for the whole run; every request carries the same deadline
    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    // ---- Ingest, fetch, filter ----
    let kept = pipeline::run(&client, &sources.feeds, target).await;
    info!(count = kept.len(), "Articles retained for target date");

    // ---- Write the archive ----
    if let Err(e) = outputs::json::write_articles(&kept, &args.output_dir, &sources.label, target).await {
        error!(error = %e, "Failed to write article archive");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
