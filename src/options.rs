//! Configuration options for content extraction.
//!
//! The `Options` struct controls the extraction engine: nesting limit,
//! boilerplate markers and the tag fallback vocabulary.

use crate::markdown::DEFAULT_MAX_DEPTH;

/// Phrases whose first occurrence truncates the rendered body.
pub const DEFAULT_BOILERPLATE_MARKERS: &[&str] = &["バッジを贈って著者を応援しよう", "Discussion", "目次"];

/// Technology names looked for in the page text when no tags were found.
pub const DEFAULT_TAG_VOCABULARY: &[&str] = &[
    "macOS",
    "Docker",
    "TypeScript",
    "JavaScript",
    "React",
    "Vue",
    "Node.js",
    "Python",
    "Go",
    "Rust",
    "AWS",
    "Azure",
    "GCP",
    "Kubernetes",
];

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use zenn_reader::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     max_tree_depth: 40,
///     derive_title_from_body: false,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum element nesting the renderers recurse into.
    ///
    /// Deeper subtrees are emitted as their plain decoded text.
    ///
    /// Default: `100`
    pub max_tree_depth: usize,

    /// Boilerplate marker phrases. Everything from the first occurrence of
    /// any marker to the end of the body is dropped.
    ///
    /// Default: support-the-author banner, `Discussion`, table-of-contents heading
    pub boilerplate_markers: Vec<String>,

    /// Vocabulary scanned (case-sensitive) in the page text when neither
    /// topic links nor the `keywords` meta tag produced a tag.
    ///
    /// Default: [`DEFAULT_TAG_VOCABULARY`]
    pub tag_vocabulary: Vec<String>,

    /// Tag appended after the vocabulary scan.
    ///
    /// Default: `"tech"`
    pub fallback_tag: String,

    /// Derive a title from the first sentence of the body when the page
    /// carries none.
    ///
    /// Default: `true`
    pub derive_title_from_body: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_tree_depth: DEFAULT_MAX_DEPTH,
            boilerplate_markers: DEFAULT_BOILERPLATE_MARKERS.iter().map(|s| (*s).to_string()).collect(),
            tag_vocabulary: DEFAULT_TAG_VOCABULARY.iter().map(|s| (*s).to_string()).collect(),
            fallback_tag: "tech".to_string(),
            derive_title_from_body: true,
        }
    }
}
