//! Core content extraction algorithm.
//!
//! Parse, read metadata from the full page, locate and render the body from
//! a private copy, strip trailing site chrome, then assemble the article.

use regex::Regex;
use tracing::{debug, warn};

use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::html_processing;
use crate::markdown::MarkdownText;
use crate::metadata;
use crate::options::Options;
use crate::patterns::{SENTENCE_BOUNDARY, TITLE_MARKDOWN_PUNCT};
use crate::result::ExtractedArticle;
use crate::selector::content;

/// Bodies this short are not used for title derivation.
const MIN_BODY_FOR_TITLE: usize = 10;

/// Exclusive character bounds for a derived title.
const DERIVED_TITLE_MIN: usize = 10;
const DERIVED_TITLE_MAX: usize = 100;

/// Main entry point for content extraction.
pub(crate) fn extract_content(html: &str, source_url: &str, options: &Options) -> Result<ExtractedArticle> {
    debug!(html_len = html.len(), url = source_url, "starting extraction");

    let document = parse_document(html)?;

    // Metadata works on the full page; the body is not needed yet.
    let metadata = metadata::extract_metadata(&document, source_url, options);

    let raw_body = match content::locate(&document) {
        Some(container) => html_processing::render_clean(&container, options.max_tree_depth),
        None => {
            debug!("no content container, body left empty");
            MarkdownText::empty()
        }
    };

    let body = strip_boilerplate(&raw_body, options.boilerplate_markers.as_slice());
    debug!(raw_chars = raw_body.len(), chars = body.len(), "boilerplate stripped");

    let mut title = metadata.title;
    if title.is_empty() && options.derive_title_from_body {
        if let Some(derived) = derive_title(&raw_body) {
            debug!("title derived from body");
            title = derived;
        }
    }

    if body.is_empty() {
        warn!(url = source_url, "no article body extracted");
        return Err(Error::EmptyContent);
    }

    Ok(ExtractedArticle {
        title,
        content: body,
        author: metadata.author,
        published: metadata.published,
        url: source_url.to_string(),
        tags: metadata.tags,
    })
}

/// Parse `html`, rejecting input that cannot yield a document tree.
fn parse_document(html: &str) -> Result<Document> {
    if html.trim().is_empty() {
        return Err(Error::ParseFailure("empty HTML input".to_string()));
    }

    let document = dom::parse(html);
    if !document.select("html").exists() {
        return Err(Error::ParseFailure("document has no <html> root".to_string()));
    }

    Ok(document)
}

// ============================================================================
// Post-processing
// ============================================================================

/// Build the truncation pattern for a set of boilerplate markers.
///
/// Matches from the first occurrence of any marker to the end of the text.
/// An ATX heading prefix at the start of the marker's line
/// (`## Discussion`) is part of the match; a `#` mid-line is not. Returns `None` when there are no usable markers.
#[must_use]
pub fn boilerplate_pattern<S: AsRef<str>>(markers: &[S]) -> Option<Regex> {
    let alternatives: Vec<String> = markers
        .iter()
        .map(AsRef::as_ref)
        .filter(|m| !m.is_empty())
        .map(regex::escape)
        .collect();

    if alternatives.is_empty() {
        return None;
    }

    Regex::new(&format!("(?sm)(?:^#{{1,6}}[ \t]+)?(?:{}).*", alternatives.join("|"))).ok()
}

/// Drop everything from the first boilerplate marker onward, then trim.
///
/// Idempotent: stripping an already-stripped body changes nothing.
///
/// # Example
///
/// ```rust
/// use zenn_reader::extract::strip_boilerplate;
/// use zenn_reader::markdown::MarkdownText;
///
/// let body = MarkdownText::new("real content 目次 something else");
/// assert_eq!(strip_boilerplate(&body, &["目次"]).as_str(), "real content");
/// ```
#[must_use]
pub fn strip_boilerplate<S: AsRef<str>>(body: &MarkdownText, markers: &[S]) -> MarkdownText {
    match boilerplate_pattern(markers) {
        Some(pattern) => body.remove_matches(&pattern).trim(),
        None => body.trim(),
    }
}

/// Derive a title from the first sentence of a rendered body.
///
/// Markdown punctuation is removed first; the sentence must be strictly
/// between 10 and 100 characters.
///
/// # Example
///
/// ```rust
/// use zenn_reader::extract::derive_title;
/// use zenn_reader::markdown::MarkdownText;
///
/// let body = MarkdownText::new("## Getting started with **Rust**. More text follows.");
/// assert_eq!(derive_title(&body).as_deref(), Some("Getting started with Rust"));
/// ```
#[must_use]
pub fn derive_title(body: &MarkdownText) -> Option<String> {
    if body.len() <= MIN_BODY_FOR_TITLE {
        return None;
    }

    let plain = TITLE_MARKDOWN_PUNCT.replace_all(body.as_str(), "");
    let first = SENTENCE_BOUNDARY.split(&plain).next()?.trim();
    let chars = first.chars().count();

    if chars > DERIVED_TITLE_MIN && chars < DERIVED_TITLE_MAX {
        Some(first.to_string())
    } else {
        None
    }
}
