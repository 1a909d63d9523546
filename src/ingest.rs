//! Feed ingestion: fetch a feed's XML and index its article links.
//!
//! Feeds are RSS 2.0-like documents with repeating `<item><link>` elements.
//! Each non-empty item link becomes an [`ArticleRef`] tagged with the feed
//! URL and its configured category, in document order. A feed that cannot be
//! fetched or parsed yields an error; the pipeline treats that as a skip for
//! this feed only.

use crate::config::FeedSource;
use crate::models::ArticleRef;
use crate::utils::truncate_for_log;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Fetch one feed and index its items.
///
/// # Returns
///
/// One [`ArticleRef`] per `<item>` with a non-empty `<link>`, in document
/// order. Non-success HTTP statuses and malformed XML are errors; the caller
/// decides whether they are fatal (the pipeline skips the feed).
#[instrument(level = "info", skip_all, fields(feed = %source.url))]
pub async fn ingest_feed(
    client: &Client,
    source: &FeedSource,
) -> Result<Vec<ArticleRef>, Box<dyn Error>> {
    let response = client.get(&source.url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("feed fetch returned status {status}").into());
    }
    let body = response.text().await?;

    let links = match parse_item_links(&body) {
        Ok(links) => links,
        Err(e) => {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 200),
                "Feed XML failed to parse"
            );
            return Err(e);
        }
    };

    let base = Url::parse(&source.url)?;
    let mut refs = Vec::with_capacity(links.len());
    for link in links {
        match base.join(&link) {
            Ok(resolved) => refs.push(ArticleRef {
                url: resolved.to_string(),
                source_feed: source.url.clone(),
                category: source.category.clone(),
            }),
            Err(e) => warn!(%link, error = %e, "Skipping unresolvable item link"),
        }
    }

    info!(count = refs.len(), "Indexed feed items");
    debug!(urls = ?refs.iter().map(|r| r.url.as_str()).collect::<Vec<_>>(), "Feed item URLs");
    Ok(refs)
}

/// Extract the `<link>` text of every `<item>` in a feed document.
///
/// Pure function over the XML text so tests can exercise it without a
/// server. Only links nested inside an item count; the channel-level
/// `<link>` is ignored. Empty links are skipped.
pub fn parse_item_links(xml: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut links = Vec::new();
    let mut in_item = false;
    let mut in_link = false;
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => in_item = true,
                b"link" if in_item => {
                    in_link = true;
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Text(e)) if in_link => {
                let decoded = e.decode().unwrap_or_default();
                current.push_str(&quick_xml::escape::unescape(&decoded).unwrap_or_default());
            }
            Ok(Event::CData(e)) if in_link => {
                current.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"link" if in_item => {
                    in_link = false;
                    let link = current.trim();
                    if !link.is_empty() {
                        links.push(link.to_string());
                    }
                    current.clear();
                }
                b"item" => {
                    in_item = false;
                    in_link = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML parse error: {e}").into()),
            _ => {}
        }
    }

    Ok(links)
}
