//! HTML Meta Tag Extraction
//!
//! Reads the `<meta>` tags the platform emits: Open Graph title, article
//! publication time and the `keywords` list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dom_query::Document;
use tracing::debug;

use crate::dom;
use crate::entities;
use crate::result::{DateStamp, Metadata};

/// Content of the first `<meta {attr}="{value}">` tag, trimmed, when non-empty.
#[must_use]
pub fn meta_content(doc: &Document, attr: &str, value: &str) -> Option<String> {
    let meta = dom::query_selector(&doc.select("html"), &format!(r#"meta[{attr}="{value}"]"#));
    let content = dom::get_attribute(&meta, "content")?;
    let content = content.trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

/// Examine meta tags for the title and publication date.
///
/// Fields already set on `original` are left alone.
#[must_use]
pub fn examine_meta(doc: &Document, original: Metadata) -> Metadata {
    let mut result = original;

    if result.title.is_empty() {
        if let Some(title) = meta_content(doc, "property", "og:title") {
            debug!("title from og:title");
            result.title = entities::decode(&title);
        }
    }

    if result.published.is_empty() {
        if let Some(raw) = meta_content(doc, "property", "article:published_time") {
            match parse_meta_date(&raw) {
                Some(dt) => {
                    debug!("published date from article:published_time");
                    result.published = DateStamp::from_date(dt.date_naive());
                }
                None => debug!(value = %raw, "unparsable article:published_time"),
            }
        }
    }

    result
}

/// Add tags from the comma-separated `keywords` meta tag.
///
/// Additive: tags already present stay first.
#[must_use]
pub fn extract_keyword_tags(doc: &Document, original: Metadata) -> Metadata {
    let mut result = original;

    if let Some(keywords) = meta_content(doc, "name", "keywords") {
        for keyword in parse_tag_list(&keywords) {
            result.tags.insert(keyword);
        }
    }

    result
}

/// Parse a date string from meta tags.
///
/// Supports RFC 3339, ISO 8601 without offset, and date-only forms.
/// Offsets are normalised to UTC.
#[must_use]
pub fn parse_meta_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();

    // ISO 8601 with timezone
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    // ISO 8601 without timezone
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, fmt) {
            return Some(dt.and_utc());
        }
    }

    // Date only
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
fn parse_tag_list(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
