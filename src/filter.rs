//! Date filtering of extracted articles.
//!
//! An article is kept when its publication time parses as ISO-8601 with an
//! offset and its calendar day (in that offset) equals the target date.
//! Records whose time does not parse, placeholders and error records
//! included, are dropped without further ceremony. The default target is
//! yesterday, computed in UTC so runs are reproducible across host
//! timezones.

use crate::models::{ArticleRecord, DatedArticle};
use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::debug;

/// Yesterday's calendar date in UTC.
pub fn yesterday_utc() -> NaiveDate {
    Utc::now().date_naive() - Days::new(1)
}

/// Keep the records published on `target`, preserving input order.
pub fn filter_by_date(records: Vec<ArticleRecord>, target: NaiveDate) -> Vec<DatedArticle> {
    let mut kept = Vec::new();
    for record in records {
        let fields = match record {
            ArticleRecord::Ok(fields) => fields,
            ArticleRecord::Error { url, reason } => {
                debug!(%url, %reason, "Dropping failed fetch");
                continue;
            }
        };

        match DateTime::parse_from_rfc3339(&fields.published_at) {
            Ok(published_at) if published_at.date_naive() == target => {
                kept.push(DatedArticle {
                    fields,
                    published_at,
                });
            }
            Ok(published_at) => {
                debug!(url = %fields.url, published = %published_at, "Published outside target date");
            }
            Err(_) => {
                debug!(url = %fields.url, value = %fields.published_at, "Unparseable publication time");
            }
        }
    }
    kept
}
