//! JSON archive writing.
//!
//! Serializes the filtered articles as a pretty-printed JSON array.
//! Non-ASCII text is written as-is, not escaped. The file is written to a
//! temporary sibling first and renamed into place, so a failed write never
//! leaves a truncated archive at the target path.

use crate::models::{DatedArticle, OutputRecord};
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Write the filtered articles to `<output_dir>/<label>_articles_<date>.json`.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Serialization and I/O errors propagate to the caller; the target path is
/// left untouched on failure.
#[instrument(level = "info", skip_all, fields(%label, %target))]
pub async fn write_articles(
    articles: &[DatedArticle],
    output_dir: &str,
    label: &str,
    target: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    let records: Vec<OutputRecord> = articles.iter().map(OutputRecord::from).collect();
    let json = serde_json::to_string_pretty(&records)?;

    let path = Path::new(output_dir).join(format!("{label}_articles_{target}.json"));
    let tmp = path.with_extension("json.tmp");

    fs::write(&tmp, json).await?;
    fs::rename(&tmp, &path).await?;

    info!(path = %path.display(), count = records.len(), "Wrote article archive");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleFields;
    use chrono::DateTime;

    fn article(url: &str, content: &str) -> DatedArticle {
        DatedArticle {
            fields: ArticleFields {
                url: url.to_string(),
                source_feed: "https://example.com/rss".to_string(),
                category: "World".to_string(),
                title: "A Story".to_string(),
                description: "Summary".to_string(),
                author: "Jane Reporter".to_string(),
                published_at: "2024-03-10T09:00:00+00:00".to_string(),
                headline: "Headline".to_string(),
                content: content.to_string(),
            },
            published_at: DateTime::parse_from_rfc3339("2024-03-10T09:00:00+00:00").unwrap(),
        }
    }

    async fn temp_output_dir(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("feed_harvest_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).await.unwrap();
        dir.to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = temp_output_dir("round_trip").await;
        let articles = vec![article("https://example.com/one", "Body one.")];
        let target = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let path = write_articles(&articles, &dir, "guardian", target).await.unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "guardian_articles_2024-03-10.json"
        );

        let raw = fs::read_to_string(&path).await.unwrap();
        let parsed: Vec<OutputRecord> = serde_json::from_str(&raw).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0], OutputRecord::from(&articles[0]));
        assert_eq!(parsed[0].published_at, "2024-03-10 09:00:00");

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_non_ascii_is_not_escaped() {
        let dir = temp_output_dir("non_ascii").await;
        let articles = vec![article("https://example.com/one", "Übermaß — crème brûlée 北京")];
        let target = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let path = write_articles(&articles, &dir, "guardian", target).await.unwrap();
        let raw = fs::read_to_string(&path).await.unwrap();

        assert!(raw.contains("Übermaß — crème brûlée 北京"));
        assert!(!raw.contains("\\u"));

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_output_is_pretty_printed_and_leaves_no_temp_file() {
        let dir = temp_output_dir("pretty").await;
        let articles = vec![
            article("https://example.com/one", "Body one."),
            article("https://example.com/two", "Body two."),
        ];
        let target = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let path = write_articles(&articles, &dir, "guardian", target).await.unwrap();
        let raw = fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains("\n  "));

        let tmp = path.with_extension("json.tmp");
        assert!(!tmp.exists());

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let articles = vec![article("https://example.com/one", "Body.")];
        let target = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let result = write_articles(&articles, "/nonexistent/feed_harvest", "guardian", target).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_batch_writes_empty_array() {
        let dir = temp_output_dir("empty").await;
        let target = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let path = write_articles(&[], &dir, "guardian", target).await.unwrap();
        let raw = fs::read_to_string(&path).await.unwrap();
        assert_eq!(raw.trim(), "[]");

        let _ = fs::remove_dir_all(&dir).await;
    }
}
