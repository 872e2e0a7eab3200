//! Metadata extraction module.
//!
//! Every field has its own ordered fallback chain; a chain stops at the
//! first strategy that yields a non-empty value. Tags are the exception:
//! topic links and the `keywords` meta tag are additive, and the vocabulary
//! scan runs only when both produced nothing.

pub mod dom_extraction;
pub mod meta_tags;

use dom_query::Document;
use tracing::debug;

use crate::result::Metadata;
use crate::Options;

pub use dom_extraction::{
    extract_dom_author, extract_dom_date, extract_dom_title, extract_topic_tags,
    extract_vocabulary_tags, find_published_text, topic_tag,
};
pub use meta_tags::{examine_meta, extract_keyword_tags, parse_meta_date};

/// Extract all metadata from a parsed page.
///
/// Chains, in order:
/// - title: `og:title`, `<title>`, first `h1`
/// - author: `user-name` element, sticky-nav display name, URL path
/// - published: `article:published_time`, localized publication line
/// - tags: topic links + `keywords`, else vocabulary scan + fallback tag
///
/// Title derivation from the body is done by the orchestrator once the
/// body has been rendered.
#[must_use]
pub fn extract_metadata(doc: &Document, source_url: &str, opts: &Options) -> Metadata {
    let mut metadata = Metadata::default();

    // 1. Meta tags (og:title, article:published_time)
    metadata = meta_tags::examine_meta(doc, metadata);

    // 2. DOM fallbacks
    metadata = dom_extraction::extract_dom_title(doc, metadata);
    metadata = dom_extraction::extract_dom_author(doc, metadata, source_url);
    metadata = dom_extraction::extract_dom_date(doc, metadata);

    // 3. Tags
    metadata = dom_extraction::extract_topic_tags(doc, metadata);
    metadata = meta_tags::extract_keyword_tags(doc, metadata);
    metadata = dom_extraction::extract_vocabulary_tags(doc, metadata, opts);

    debug!(
        has_title = !metadata.title.is_empty(),
        has_author = !metadata.author.is_empty(),
        has_date = !metadata.published.is_empty(),
        tags = metadata.tags.len(),
        "metadata extracted"
    );

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn test_title_chain_order() {
        let doc = dom::parse(
            r#"<html><head><meta property="og:title" content="OG"><title>Tab</title></head><body><h1>H</h1></body></html>"#,
        );
        assert_eq!(extract_metadata(&doc, "", &Options::default()).title, "OG");

        let doc = dom::parse("<html><head><title>Tab</title></head><body><h1>H</h1></body></html>");
        assert_eq!(extract_metadata(&doc, "", &Options::default()).title, "Tab");

        let doc = dom::parse("<html><body><h1>Hello</h1></body></html>");
        assert_eq!(extract_metadata(&doc, "", &Options::default()).title, "Hello");
    }

    #[test]
    fn test_topic_and_keyword_tags_are_additive() {
        let doc = dom::parse(r#"<html><head><meta name="keywords" content="cli, Rust"></head><body>
            <a class="View_topicLink__jdtX_" href="/topics/rust"><span class="View_topicName____nYp">Rust</span></a>
            <p>Python Docker</p>
        </body></html>"#);

        let meta = extract_metadata(&doc, "", &Options::default());
        assert_eq!(meta.tags.iter().collect::<Vec<_>>(), vec!["Rust", "cli"]);
    }

    #[test]
    fn test_empty_page_yields_fallback_tag_only() {
        let doc = dom::parse("<html><body></body></html>");
        let meta = extract_metadata(&doc, "not a url", &Options::default());

        assert!(meta.title.is_empty());
        assert!(meta.author.is_empty());
        assert!(meta.published.is_empty());
        assert_eq!(meta.tags.iter().collect::<Vec<_>>(), vec!["tech"]);
    }

    #[test]
    fn test_meta_date_beats_page_text() {
        let doc = dom::parse(r#"<html><head><meta property="article:published_time" content="2024-01-02T00:00:00Z"></head>
            <body><p>2020/05/05に公開</p></body></html>"#);
        assert_eq!(extract_metadata(&doc, "", &Options::default()).published.as_str(), "2024-01-02");
    }
}
