//! Field extraction from article pages.
//!
//! Each of the six article fields is resolved independently by an ordered
//! chain of rules. Rules are plain functions over the parsed document; the
//! first rule producing a non-empty value wins, and a field whose whole
//! chain comes up empty gets its placeholder string. A rule that trips over
//! bad markup (missing elements, malformed JSON-LD) simply yields nothing,
//! so one broken field never poisons the rest of the record.
//!
//! # Extraction points
//!
//! | Field | Rules |
//! |---|---|
//! | title | `<title>` text |
//! | description | `meta[name=description]` |
//! | author | JSON-LD `[0].author[0].name`, then `meta[name=author]` |
//! | published_at | `meta[property=article:published_time]` |
//! | headline | `meta[property=og:description]` |
//! | content | text of the first `<article>` element |

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Placeholder when no title rule matches.
pub const NO_TITLE: &str = "No title found";
/// Placeholder when no description rule matches.
pub const NO_DESCRIPTION: &str = "No meta description found";
/// Placeholder when no author rule matches.
pub const NO_AUTHOR: &str = "No author found";
/// Placeholder when no publication time rule matches.
pub const NO_TIME: &str = "No time found";
/// Placeholder when no headline rule matches.
pub const NO_HEADLINE: &str = "No headline found";
/// Placeholder when no content rule matches.
pub const NO_CONTENT: &str = "No main content found.";

static TITLE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static META_DESCRIPTION_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static JSON_LD_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());
static META_AUTHOR_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="author"]"#).unwrap());
static META_PUBLISHED_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="article:published_time"]"#).unwrap());
static META_OG_DESCRIPTION_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:description"]"#).unwrap());
static ARTICLE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());

/// One rule in a field's resolver chain.
type Rule = fn(&Html) -> Option<String>;

/// Rule chains, in priority order. The chain order is the contract: the
/// first rule producing a non-empty value wins.
const TITLE_RULES: &[Rule] = &[title_text];
const DESCRIPTION_RULES: &[Rule] = &[meta_description];
const AUTHOR_RULES: &[Rule] = &[author_from_json_ld, author_from_meta];
const PUBLISHED_RULES: &[Rule] = &[published_time_meta];
const HEADLINE_RULES: &[Rule] = &[og_description_meta];
const CONTENT_RULES: &[Rule] = &[article_text];

/// The six fields extracted from one page.
#[derive(Debug)]
pub struct PageFields {
    pub title: String,
    pub description: String,
    pub author: String,
    pub published_at: String,
    pub headline: String,
    pub content: String,
}

/// Resolve every field of a parsed page.
///
/// Pure function of the document; always returns a fully populated
/// [`PageFields`], substituting placeholders where the page gives nothing.
pub fn extract(document: &Html) -> PageFields {
    PageFields {
        title: resolve(document, TITLE_RULES, NO_TITLE),
        description: resolve(document, DESCRIPTION_RULES, NO_DESCRIPTION),
        author: resolve(document, AUTHOR_RULES, NO_AUTHOR),
        published_at: resolve(document, PUBLISHED_RULES, NO_TIME),
        headline: resolve(document, HEADLINE_RULES, NO_HEADLINE),
        content: resolve(document, CONTENT_RULES, NO_CONTENT),
    }
}

fn resolve(document: &Html, rules: &[Rule], placeholder: &str) -> String {
    rules
        .iter()
        .find_map(|rule| rule(document))
        .unwrap_or_else(|| placeholder.to_string())
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .and_then(non_empty)
}

fn title_text(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SEL)
        .next()
        .and_then(|el| non_empty(&el.text().collect::<String>()))
}

fn meta_description(document: &Html) -> Option<String> {
    meta_content(document, &META_DESCRIPTION_SEL)
}

/// Author name at `[0].author[0].name` of the first JSON-LD block.
///
/// Any deviation from that shape, including unparseable JSON, yields
/// nothing and the chain falls through to the author meta tag.
fn author_from_json_ld(document: &Html) -> Option<String> {
    let script = document.select(&JSON_LD_SEL).next()?;
    let raw = script.text().collect::<String>();
    let data: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
    data.get(0)?
        .get("author")?
        .get(0)?
        .get("name")?
        .as_str()
        .and_then(non_empty)
}

fn author_from_meta(document: &Html) -> Option<String> {
    meta_content(document, &META_AUTHOR_SEL)
}

fn published_time_meta(document: &Html) -> Option<String> {
    meta_content(document, &META_PUBLISHED_SEL)
}

fn og_description_meta(document: &Html) -> Option<String> {
    meta_content(document, &META_OG_DESCRIPTION_SEL)
}

/// Tag-stripped text of the first `<article>` element, text nodes trimmed
/// and joined with single spaces.
fn article_text(document: &Html) -> Option<String> {
    let article = document.select(&ARTICLE_SEL).next()?;
    let text = article
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    non_empty(&text)
}
