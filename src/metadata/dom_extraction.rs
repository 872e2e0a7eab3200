//! DOM-based Metadata Extraction
//!
//! Fallback strategies that read the rendered page: `<title>` and `h1`,
//! profile names, the localized publication line and topic links.

use dom_query::{Document, Selection};
use tracing::debug;

use crate::dom;
use crate::entities;
use crate::patterns::PUBLISHED_TEXT;
use crate::result::{DateStamp, Metadata};
use crate::selector::{self, meta as meta_selectors};
use crate::url_utils;
use crate::Options;

/// Decoded, trimmed text of `sel`.
fn element_text(sel: &Selection) -> String {
    entities::decode(dom::text_content(sel).trim())
}

// ============================================================
// TITLE EXTRACTION
// ============================================================

/// Extract title from the `<title>` element, then the first `h1`.
#[must_use]
pub fn extract_dom_title(doc: &Document, original: Metadata) -> Metadata {
    let mut result = original;

    if !result.title.is_empty() {
        return result;
    }

    for (source, css) in [("title", "title"), ("h1", "h1")] {
        let elem = dom::query_selector(&doc.select("html"), css);
        if elem.exists() {
            let text = element_text(&elem);
            if !text.is_empty() {
                debug!(source, "title from DOM");
                result.title = text;
                return result;
            }
        }
    }

    result
}

// ============================================================
// AUTHOR EXTRACTION
// ============================================================

/// Extract author from profile markup, then from the article URL.
#[must_use]
pub fn extract_dom_author(doc: &Document, original: Metadata, source_url: &str) -> Metadata {
    let mut result = original;

    if !result.author.is_empty() {
        return result;
    }

    let root = doc.select("html");
    let found = selector::query_first_rule(&root, meta_selectors::META_AUTHOR, |elem| !element_text(elem).is_empty());
    if let Some((index, elem)) = found {
        debug!(rule = index + 1, "author from DOM");
        result.author = element_text(&elem);
        return result;
    }

    if let Some(handle) = url_utils::author_from_url(source_url) {
        debug!("author from source URL");
        result.author = handle;
    }

    result
}

// ============================================================
// DATE EXTRACTION
// ============================================================

/// Extract the publication date from the localized `YYYY/MM/DDに公開` line.
///
/// Header date elements are checked first, then the whole page text.
#[must_use]
pub fn extract_dom_date(doc: &Document, original: Metadata) -> Metadata {
    let mut result = original;

    if !result.published.is_empty() {
        return result;
    }

    let root = doc.select("html");
    for elem in selector::query_all(&root, meta_selectors::meta_pub_date_rule) {
        if let Some(date) = find_published_text(dom::text_content(&elem).trim()) {
            debug!("published date from header element");
            result.published = date;
            return result;
        }
    }

    if let Some(date) = find_published_text(&dom::text_content(&doc.select("body"))) {
        debug!("published date from page text");
        result.published = date;
    }

    result
}

/// First valid `YYYY/MM/DD...に公開` date in `text`.
#[must_use]
pub fn find_published_text(text: &str) -> Option<DateStamp> {
    PUBLISHED_TEXT.captures_iter(text).find_map(|caps| {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        DateStamp::parse_ymd(year, month, day)
    })
}

// ============================================================
// TAG EXTRACTION
// ============================================================

/// Add one tag per topic link, in document order.
///
/// Links without a nested display-name element are skipped.
#[must_use]
pub fn extract_topic_tags(doc: &Document, original: Metadata) -> Metadata {
    let mut result = original;

    let root = doc.select("html");
    for link in selector::query_all(&root, meta_selectors::meta_topic_link_rule) {
        let href = dom::attribute_or_empty(&link, "href");
        if href.is_empty() {
            continue;
        }

        let Some(name_elem) = selector::query(&link, meta_selectors::meta_topic_name_rule) else {
            continue;
        };

        let name = element_text(&name_elem);
        let slug = url_utils::topic_slug(&href);
        result.tags.insert(topic_tag(&name, &slug));
    }

    result
}

/// Choose the tag for one topic: `tech`, an ASCII display name, or the slug.
#[must_use]
pub fn topic_tag(name: &str, slug: &str) -> String {
    if name.eq_ignore_ascii_case("tech") {
        return "tech".to_string();
    }

    let ascii_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if ascii_name {
        name.to_string()
    } else {
        slug.to_string()
    }
}

/// When no tag was found, scan the page text for known technology names and
/// append the fallback tag.
#[must_use]
pub fn extract_vocabulary_tags(doc: &Document, original: Metadata, opts: &Options) -> Metadata {
    let mut result = original;

    if !result.tags.is_empty() {
        return result;
    }

    let text = dom::text_content(&doc.select("body"));
    for term in &opts.tag_vocabulary {
        if text.contains(term.as_str()) {
            result.tags.insert(term.clone());
        }
    }

    result.tags.insert(opts.fallback_tag.clone());
    debug!(count = result.tags.len(), "tags from vocabulary scan");

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_title_element_then_h1() {
        let doc = dom::parse("<html><head><title> Page &amp;amp; Co </title></head><body><h1>Heading</h1></body></html>");
        assert_eq!(extract_dom_title(&doc, Metadata::default()).title, "Page & Co");

        let doc = dom::parse("<html><body><h1>Hello</h1><h1>Second</h1></body></html>");
        assert_eq!(extract_dom_title(&doc, Metadata::default()).title, "Hello");
    }

    #[test]
    fn test_author_chain() {
        let doc = dom::parse(r#"<html><body><span class="user-name"> Alice A </span></body></html>"#);
        let meta = extract_dom_author(&doc, Metadata::default(), "https://zenn.dev/alice/articles/x");
        assert_eq!(meta.author, "Alice A");

        let doc = dom::parse(r#"<html><body><span class="user-name">  </span><p class="ContentStickyNavForMobile_displayName__cmEag">Sticky</p></body></html>"#);
        let meta = extract_dom_author(&doc, Metadata::default(), "https://zenn.dev/alice/articles/x");
        assert_eq!(meta.author, "Sticky");

        let doc = dom::parse("<html><body><p>no markup</p></body></html>");
        let meta = extract_dom_author(&doc, Metadata::default(), "https://zenn.dev/alice/articles/x");
        assert_eq!(meta.author, "alice");

        let meta = extract_dom_author(&doc, Metadata::default(), "");
        assert!(meta.author.is_empty());
    }

    #[test]
    fn test_date_from_header_and_page_text() {
        let doc = dom::parse(r#"<html><body><span class="ArticleHeader_pubDate__gF_sc">2023/12/01に公開</span></body></html>"#);
        assert_eq!(extract_dom_date(&doc, Metadata::default()).published.as_str(), "2023-12-01");

        let doc = dom::parse("<html><body><p>更新 2024/02/30に公開 2024/05/06 に公開</p></body></html>");
        assert_eq!(extract_dom_date(&doc, Metadata::default()).published.as_str(), "2024-05-06");

        let doc = dom::parse("<html><body><p>2024/05/06</p></body></html>");
        assert!(extract_dom_date(&doc, Metadata::default()).published.is_empty());
    }

    #[test]
    fn test_topic_tag_choice() {
        assert_eq!(topic_tag("TECH", "tech"), "tech");
        assert_eq!(topic_tag("Next.js", "nextjs"), "Next.js");
        assert_eq!(topic_tag("個人開発", "個人開発"), "個人開発");
        assert_eq!(topic_tag("機械学習", "machinelearning"), "machinelearning");
        assert_eq!(topic_tag("", "rust"), "rust");
    }

    #[test]
    fn test_topic_tags_from_links() {
        let doc = dom::parse(r#"<html><body>
            <a class="View_topicLink__jdtX_" href="/topics/rust"><span class="View_topicName____nYp">Rust</span></a>
            <a class="View_topicLink__jdtX_" href="/topics/machinelearning"><span class="View_topicName____nYp">機械学習</span></a>
            <a class="View_topicLink__jdtX_" href="/topics/go"></a>
            <a class="View_topicLink__jdtX_" href="/topics/rust/"><span class="View_topicName____nYp">Rust</span></a>
        </body></html>"#);

        let meta = extract_topic_tags(&doc, Metadata::default());
        assert_eq!(meta.tags.iter().collect::<Vec<_>>(), vec!["Rust", "machinelearning"]);
    }

    #[test]
    fn test_vocabulary_scan_and_fallback() {
        let doc = dom::parse("<html><body><p>Deploying Rust on Kubernetes with Docker</p></body></html>");
        let meta = extract_vocabulary_tags(&doc, Metadata::default(), &Options::default());
        assert_eq!(meta.tags.iter().collect::<Vec<_>>(), vec!["Docker", "Rust", "Kubernetes", "tech"]);
    }

    #[test]
    fn test_vocabulary_scan_skipped_when_tags_exist() {
        let doc = dom::parse("<html><body><p>Python</p></body></html>");
        let original = Metadata { tags: ["rust"].into_iter().collect(), ..Metadata::default() };
        let meta = extract_vocabulary_tags(&doc, original, &Options::default());
        assert_eq!(meta.tags.iter().collect::<Vec<_>>(), vec!["rust"]);
    }
}
