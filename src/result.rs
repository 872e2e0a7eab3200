//! Result types for extraction output.
//!
//! This module defines the structured article returned by extraction and
//! the value types its fields are made of.

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::markdown::MarkdownText;

/// Structured article produced by one extraction call.
///
/// Every field except `content` may legitimately be empty: exhausting a
/// metadata fallback chain is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedArticle {
    /// Article title.
    pub title: String,

    /// Article body as Markdown, boilerplate removed.
    pub content: MarkdownText,

    /// Author display name or handle.
    pub author: String,

    /// Publication date as `YYYY-MM-DD`, or empty.
    pub published: DateStamp,

    /// Source URL the HTML was fetched from.
    pub url: String,

    /// Topic tags in discovery order.
    pub tags: TagSet,
}

/// Metadata fields gathered from the full page before the body is rendered.
///
/// Title derivation from the body happens later, in the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Page title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Publication date.
    pub published: DateStamp,

    /// Content tags.
    pub tags: TagSet,
}

// ============================================================================
// DateStamp
// ============================================================================

/// A `YYYY-MM-DD` date, or the empty string when none could be derived.
///
/// Construction goes through [`NaiveDate`], so partial or impossible dates
/// (`2024-02-30`) never make it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DateStamp(String);

impl DateStamp {
    /// No date.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    /// Build from numeric parts; `None` for dates that do not exist.
    #[must_use]
    pub fn parse_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from_date)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DateStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DateStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// ============================================================================
// TagSet
// ============================================================================

/// Ordered tag collection: insertion order, no duplicates, no empty strings.
///
/// Duplicate detection is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a tag. Returns `false` when it was empty or already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if tag.is_empty() || self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_stamp_formats_with_padding() {
        let stamp = DateStamp::parse_ymd(2024, 3, 5).expect("valid date");
        assert_eq!(stamp.as_str(), "2024-03-05");
        assert_eq!(stamp.to_string(), "2024-03-05");
    }

    #[test]
    fn test_date_stamp_rejects_impossible_dates() {
        assert!(DateStamp::parse_ymd(2024, 2, 30).is_none());
        assert!(DateStamp::parse_ymd(2024, 13, 1).is_none());
        assert!(DateStamp::empty().is_empty());
    }

    #[test]
    fn test_tag_set_dedup_and_order() {
        let mut tags = TagSet::new();
        assert!(tags.insert("rust"));
        assert!(tags.insert("Rust"));
        assert!(!tags.insert("rust"));
        assert!(!tags.insert(""));
        assert!(tags.insert("tech"));

        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["rust", "Rust", "tech"]);
        assert_eq!(tags.join(", "), "rust, Rust, tech");
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_tag_set_from_iter() {
        let tags: TagSet = ["a", "b", "a", ""].into_iter().collect();
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("b"));
    }

    #[test]
    fn test_article_serializes_flat() {
        let article = ExtractedArticle {
            title: "T".to_string(),
            content: MarkdownText::new("body"),
            author: "alice".to_string(),
            published: DateStamp::parse_ymd(2024, 1, 2).expect("valid date"),
            url: "https://zenn.dev/alice/articles/x".to_string(),
            tags: ["rust"].into_iter().collect(),
        };

        let value = serde_json::to_value(&article).expect("json");
        assert_eq!(value["content"], "body");
        assert_eq!(value["published"], "2024-01-02");
        assert_eq!(value["tags"], serde_json::json!(["rust"]));
    }
}
