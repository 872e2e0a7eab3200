//! # zenn-reader
//!
//! Reader for the Zenn blogging platform: lists articles from its RSS/Atom
//! feeds and converts rendered article pages into structured Markdown.
//!
//! The core is the extraction engine, which takes article HTML plus its
//! source URL and returns the title, author, publication date, tags and a
//! Markdown rendering of the body.
//!
//! ## Quick Start
//!
//! ```rust
//! use zenn_reader::extract;
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><div class="znc"><p>Hi <a href="https://x.com">there</a></p></div></body></html>"#;
//!
//! let article = extract(html, "https://zenn.dev/alice/articles/intro")?;
//! assert_eq!(article.title, "My Article");
//! assert_eq!(article.author, "alice");
//! assert_eq!(article.content.as_str(), "Hi [there](https://x.com)");
//! # Ok::<(), zenn_reader::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Body rendering**: headings, lists, fenced code with language, GFM tables,
//!   blockquotes, emphasis, links and images
//! - **Metadata fallback chains**: every field degrades to the next strategy
//!   and finally to empty, never to an error
//! - **Feeds**: RSS 2.0 and Atom parsing with JST date formatting
//! - **Output**: plain text, Markdown and JSON formatters

mod error;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// HTML character reference decoding.
pub mod entities;

/// Selector infrastructure and rules for the body container and metadata.
pub mod selector;

/// Clone-then-strip handling of the located body element.
pub mod html_processing;

/// HTML to Markdown renderers.
pub mod markdown;

/// Metadata extraction (meta tags and DOM fallbacks).
pub mod metadata;

/// Extraction orchestrator, boilerplate stripping and title derivation.
pub mod extract;

/// URL helpers for author handles, link labels and topic slugs.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Text, Markdown and JSON output formatting.
pub mod format;

/// Feed URLs, RSS/Atom parsing and entry search.
pub mod feed;

/// Blocking HTTP client for feeds and article pages.
pub mod fetch;

// Public API - re-exports
pub use error::{Error, Result};
pub use markdown::MarkdownText;
pub use options::{Options, DEFAULT_BOILERPLATE_MARKERS, DEFAULT_TAG_VOCABULARY};
pub use result::{DateStamp, ExtractedArticle, Metadata, TagSet};

/// Extracts an article from HTML using default options.
///
/// # Arguments
///
/// * `html` - The article page as a string slice
/// * `source_url` - The URL the page was fetched from (used for the author fallback)
///
/// # Errors
///
/// [`Error::ParseFailure`] for blank input, [`Error::EmptyContent`] when no
/// body text survives extraction. Missing metadata is not an error.
pub fn extract(html: &str, source_url: &str) -> Result<ExtractedArticle> {
    extract_with_options(html, source_url, &Options::default())
}

/// Extracts an article from HTML with custom options.
///
/// # Example
///
/// ```rust
/// use zenn_reader::{extract_with_options, Options};
///
/// let html = r#"<html><body><article><p>Body</p><p>END of post</p></article></body></html>"#;
/// let options = Options {
///     boilerplate_markers: vec!["END".to_string()],
///     ..Options::default()
/// };
/// let article = extract_with_options(html, "", &options)?;
/// assert_eq!(article.content.as_str(), "Body");
/// # Ok::<(), zenn_reader::Error>(())
/// ```
pub fn extract_with_options(html: &str, source_url: &str, options: &Options) -> Result<ExtractedArticle> {
    extract::extract_content(html, source_url, options)
}

/// Extracts an article from raw bytes, detecting the charset from a BOM or
/// `<meta>` declaration first.
///
/// # Example
///
/// ```rust
/// use zenn_reader::extract_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><article>Caf\xE9</article></body></html>";
/// let article = extract_bytes(html, "")?;
/// assert!(article.content.as_str().contains("Café"));
/// # Ok::<(), zenn_reader::Error>(())
/// ```
pub fn extract_bytes(html: &[u8], source_url: &str) -> Result<ExtractedArticle> {
    let html_str = encoding::transcode_to_utf8(html, None);
    extract(&html_str, source_url)
}
