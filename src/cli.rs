//! Command-line interface definitions for Feed Harvest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use chrono::NaiveDate;
use clap::Parser;

/// Command-line arguments for the Feed Harvest application.
///
/// # Examples
///
/// ```sh
/// # Harvest the built-in Guardian feeds into ./processed_files
/// feed_harvest
///
/// # Use a custom feed list and output directory
/// feed_harvest -f feeds.yaml -o ./archive
///
/// # Re-run for a specific day instead of yesterday
/// feed_harvest --target-date 2024-03-10
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the JSON archive
    #[arg(short, long, default_value = "processed_files")]
    pub output_dir: String,

    /// Path to a YAML feed list; defaults to the built-in Guardian feeds
    #[arg(short, long)]
    pub feeds: Option<String>,

    /// Archive articles published on this date (YYYY-MM-DD) instead of
    /// yesterday in UTC
    #[arg(long)]
    pub target_date: Option<NaiveDate>,

    /// Deadline in seconds applied to every HTTP request
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}
