//! Article fetching: download each page and extract its fields.
//!
//! Fetches are strictly sequential, one request in flight at a time, and
//! order preserving. A transport failure turns into an error record rather
//! than aborting the batch; whatever body does arrive (error pages included)
//! is parsed as HTML, since the extractor degrades missing markup to
//! placeholders on its own.

use crate::extract;
use crate::models::{ArticleFields, ArticleRecord, ArticleRef};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::Html;
use tracing::{debug, info, instrument, warn};

/// Fetch every referenced article, in order.
///
/// Produces exactly one [`ArticleRecord`] per input ref, success or failure.
#[instrument(level = "info", skip_all)]
pub async fn fetch_articles(client: &Client, refs: Vec<ArticleRef>) -> Vec<ArticleRecord> {
    let total = refs.len();
    let records: Vec<ArticleRecord> = stream::iter(refs)
        .then(|article_ref| fetch_article(client, article_ref))
        .collect()
        .await;

    let failed = records.iter().filter(|r| !r.is_ok()).count();
    info!(total, failed, "Fetched article pages");
    records
}

/// Fetch a single article page.
#[instrument(level = "debug", skip_all, fields(url = %article_ref.url))]
pub async fn fetch_article(client: &Client, article_ref: ArticleRef) -> ArticleRecord {
    let response = match client.get(&article_ref.url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Article fetch failed");
            return ArticleRecord::Error {
                url: article_ref.url,
                reason: e.to_string(),
            };
        }
    };

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Article body could not be read");
            return ArticleRecord::Error {
                url: article_ref.url,
                reason: e.to_string(),
            };
        }
    };

    let document = Html::parse_document(&body);
    let fields = extract::extract(&document);
    debug!(bytes = body.len(), "Extracted article fields");

    ArticleRecord::Ok(ArticleFields {
        url: article_ref.url,
        source_feed: article_ref.source_feed,
        category: article_ref.category,
        title: fields.title,
        description: fields.description,
        author: fields.author,
        published_at: fields.published_at,
        headline: fields.headline,
        content: fields.content,
    })
}
