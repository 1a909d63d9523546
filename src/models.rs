//! Data models for feed items and extracted articles.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleRef`]: A pending work item discovered in a feed (URL plus feed context)
//! - [`ArticleFields`]: The structured fields extracted from one article page
//! - [`ArticleRecord`]: The outcome of fetching one article, success or failure
//! - [`DatedArticle`]: An article that passed the date filter, with its parsed timestamp
//! - [`OutputRecord`]: The persisted JSON schema
//!
//! The output schema uses camelCase field names, handled via serde renaming
//! rather than non-snake-case struct fields.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Format used for `publishedAt` in the persisted JSON.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single article link discovered in a feed.
///
/// One `ArticleRef` is created per `<item><link>` found in a feed document.
/// Duplicate URLs across feeds are not collapsed; each occurrence is fetched
/// independently.
///
/// # Fields
///
/// * `url` - The article URL, resolved to absolute form
/// * `source_feed` - The URL of the feed the link was found in
/// * `category` - The category configured for that feed
#[derive(Debug, Clone)]
pub struct ArticleRef {
    /// The article URL to fetch.
    pub url: String,
    /// The feed this link came from.
    pub source_feed: String,
    /// The category configured for the source feed.
    pub category: String,
}

/// The structured fields extracted from one article page.
///
/// Every field is always populated: either with a real value or with the
/// field-specific placeholder produced when no rule in the field's resolver
/// chain matched. `published_at` holds the raw value from the page markup
/// (an ISO-8601 string with offset on well-behaved pages); it is parsed
/// later by the date filter, not here.
#[derive(Debug, Clone)]
pub struct ArticleFields {
    /// The article URL.
    pub url: String,
    /// The feed this article came from.
    pub source_feed: String,
    /// The category of the source feed.
    pub category: String,
    /// The document title.
    pub title: String,
    /// The meta description.
    pub description: String,
    /// The author name, from JSON-LD or the author meta tag.
    pub author: String,
    /// The publication time as found in the page, unparsed.
    pub published_at: String,
    /// The OpenGraph description, used as the headline.
    pub headline: String,
    /// The text content of the article body.
    pub content: String,
}

/// The outcome of fetching and extracting one article.
///
/// A transport failure produces the `Error` variant with the URL preserved;
/// the page's extracted fields are otherwise carried in `Ok`. Error records
/// flow through the pipeline as data and are dropped by the date filter
/// (their publication time can never parse), so a single bad article never
/// aborts a batch.
#[derive(Debug)]
pub enum ArticleRecord {
    /// The page was fetched and its fields extracted.
    Ok(ArticleFields),
    /// The fetch failed before any markup could be parsed.
    Error {
        /// The article URL that failed.
        url: String,
        /// Human-readable failure description, used in logs.
        reason: String,
    },
}

impl ArticleRecord {
    /// Whether this record carries extracted fields.
    pub fn is_ok(&self) -> bool {
        matches!(self, ArticleRecord::Ok(_))
    }
}

/// An article that passed the date filter.
///
/// Carries the parsed publication timestamp alongside the extracted fields
/// so the sink can render it in the fixed output format without re-parsing.
#[derive(Debug, Clone)]
pub struct DatedArticle {
    /// The extracted article fields.
    pub fields: ArticleFields,
    /// The parsed publication time, offset preserved from the page.
    pub published_at: DateTime<FixedOffset>,
}

/// One element of the persisted JSON array.
///
/// Field names are camelCase on the wire and the declaration order below is
/// the order fields appear in the output file. `publishedAt` is rendered
/// with [`TIMESTAMP_FORMAT`] in the timestamp's own UTC offset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    /// The article URL.
    pub url: String,
    /// The feed the article came from.
    pub source_feed: String,
    /// The category of the source feed.
    pub category: String,
    /// The document title.
    pub title: String,
    /// The meta description.
    pub description: String,
    /// The author name.
    pub author: String,
    /// The publication time, formatted `YYYY-MM-DD HH:MM:SS`.
    pub published_at: String,
    /// The OpenGraph description.
    pub headline: String,
    /// The article body text.
    pub content: String,
}

impl From<&DatedArticle> for OutputRecord {
    fn from(article: &DatedArticle) -> Self {
        let fields = &article.fields;
        OutputRecord {
            url: fields.url.clone(),
            source_feed: fields.source_feed.clone(),
            category: fields.category.clone(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            author: fields.author.clone(),
            published_at: article.published_at.format(TIMESTAMP_FORMAT).to_string(),
            headline: fields.headline.clone(),
            content: fields.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> ArticleFields {
        ArticleFields {
            url: "https://example.com/story".to_string(),
            source_feed: "https://example.com/rss".to_string(),
            category: "World".to_string(),
            title: "A Story".to_string(),
            description: "Summary of the story".to_string(),
            author: "Jane Reporter".to_string(),
            published_at: "2024-03-10T09:00:00+00:00".to_string(),
            headline: "The story, briefly".to_string(),
            content: "Body text.".to_string(),
        }
    }

    #[test]
    fn test_output_record_formats_timestamp() {
        let article = DatedArticle {
            fields: sample_fields(),
            published_at: DateTime::parse_from_rfc3339("2024-03-10T09:05:30+00:00").unwrap(),
        };

        let record = OutputRecord::from(&article);
        assert_eq!(record.published_at, "2024-03-10 09:05:30");
        assert_eq!(record.url, "https://example.com/story");
        assert_eq!(record.category, "World");
    }

    #[test]
    fn test_output_record_keeps_offset_wall_time() {
        // The formatted time is the wall time in the page's own offset.
        let article = DatedArticle {
            fields: sample_fields(),
            published_at: DateTime::parse_from_rfc3339("2024-03-10T23:30:00+02:00").unwrap(),
        };

        let record = OutputRecord::from(&article);
        assert_eq!(record.published_at, "2024-03-10 23:30:00");
    }

    #[test]
    fn test_output_record_camel_case_keys() {
        let article = DatedArticle {
            fields: sample_fields(),
            published_at: DateTime::parse_from_rfc3339("2024-03-10T09:00:00Z").unwrap(),
        };

        let json = serde_json::to_string(&OutputRecord::from(&article)).unwrap();
        assert!(json.contains("\"sourceFeed\""));
        assert!(json.contains("\"publishedAt\""));
        assert!(!json.contains("\"source_feed\""));
    }

    #[test]
    fn test_article_record_is_ok() {
        let ok = ArticleRecord::Ok(sample_fields());
        let err = ArticleRecord::Error {
            url: "https://example.com/broken".to_string(),
            reason: "connection refused".to_string(),
        };

        assert!(ok.is_ok());
        assert!(!err.is_ok());
    }
}
