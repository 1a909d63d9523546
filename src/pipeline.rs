//! Pipeline orchestration: feeds in, dated articles out.
//!
//! Runs the stages strictly in sequence: feeds are ingested in list order,
//! then every discovered article is fetched in that order, then the whole
//! batch goes through the date filter. Each stage hands an owned collection
//! to the next; there is no shared accumulator. A dead feed or a failed
//! article only shrinks the batch.

use crate::config::FeedSource;
use crate::models::{ArticleRef, DatedArticle};
use crate::{fetch, filter, ingest};
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{info, instrument, warn};

/// Run ingestion, fetching and filtering over the configured feeds.
///
/// Returns the articles published on `target`, ordered by feed list order
/// and item order within each feed.
#[instrument(level = "info", skip_all, fields(feeds = sources.len(), %target))]
pub async fn run(client: &Client, sources: &[FeedSource], target: NaiveDate) -> Vec<DatedArticle> {
    let mut refs: Vec<ArticleRef> = Vec::new();
    for source in sources {
        match ingest::ingest_feed(client, source).await {
            Ok(feed_refs) => refs.extend(feed_refs),
            Err(e) => warn!(feed = %source.url, error = %e, "Skipping feed"),
        }
    }
    info!(count = refs.len(), "Collected article references");

    let records = fetch::fetch_articles(client, refs).await;
    let failed = records.iter().filter(|r| !r.is_ok()).count();
    let fetched = records.len() - failed;

    let kept = filter::filter_by_date(records, target);
    info!(fetched, failed, kept = kept.len(), "Pipeline complete");
    kept
}
