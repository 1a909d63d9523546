//! Feed source configuration.
//!
//! The set of feeds to harvest is either loaded from a YAML file or taken
//! from the compiled-in default list. A source list carries a `label` used
//! in the output filename and one category per feed.
//!
//! # File format
//!
//! ```yaml
//! label: guardian
//! feeds:
//!   - url: https://www.theguardian.com/world/rss
//!     category: World
//!   - url: https://www.theguardian.com/technology/rss
//!     category: Technology
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;

/// One RSS feed to harvest, with the category applied to its articles.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedSource {
    /// The feed URL.
    pub url: String,
    /// The category tagged onto every article found in this feed.
    pub category: String,
}

/// A named list of feed sources.
#[derive(Debug, Deserialize, Serialize)]
pub struct SourceList {
    /// Label used in the output filename, e.g. `guardian` in
    /// `guardian_articles_2024-03-10.json`.
    pub label: String,
    /// The feeds to harvest, processed in list order.
    pub feeds: Vec<FeedSource>,
}

impl SourceList {
    /// Load a source list from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// lists no feeds.
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)?;
        let sources: SourceList = serde_yaml::from_str(&raw)?;
        if sources.feeds.is_empty() {
            return Err(format!("no feeds listed in {path}").into());
        }
        Ok(sources)
    }
}

impl Default for SourceList {
    /// The Guardian section feeds harvested when no feeds file is given.
    fn default() -> Self {
        let feeds = [
            ("https://www.theguardian.com/uk/rss", "UK"),
            ("https://www.theguardian.com/world/rss", "World"),
            ("https://www.theguardian.com/business/rss", "Business"),
            ("https://www.theguardian.com/sport/rss", "Sport"),
            ("https://www.theguardian.com/technology/rss", "Technology"),
            ("https://www.theguardian.com/commentisfree/rss", "Opinion"),
            ("https://www.theguardian.com/uk/culture/rss", "Culture"),
            ("https://www.theguardian.com/travel/rss", "Travel"),
            ("https://www.theguardian.com/food/rss", "Food"),
        ]
        .into_iter()
        .map(|(url, category)| FeedSource {
            url: url.to_string(),
            category: category.to_string(),
        })
        .collect();

        SourceList {
            label: "guardian".to_string(),
            feeds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources() {
        let sources = SourceList::default();
        assert_eq!(sources.label, "guardian");
        assert_eq!(sources.feeds.len(), 9);
        assert_eq!(sources.feeds[0].category, "UK");
        assert!(sources.feeds[0].url.starts_with("https://www.theguardian.com"));
    }

    #[test]
    fn test_parse_yaml_source_list() {
        let yaml = r#"
label: example
feeds:
  - url: https://example.com/news/rss
    category: News
  - url: https://example.com/sport/rss
    category: Sport
"#;

        let sources: SourceList = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(sources.label, "example");
        assert_eq!(sources.feeds.len(), 2);
        assert_eq!(sources.feeds[1].url, "https://example.com/sport/rss");
        assert_eq!(sources.feeds[1].category, "Sport");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(SourceList::load("/nonexistent/feeds.yaml").is_err());
    }
}
