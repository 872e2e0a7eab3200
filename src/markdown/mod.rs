//! HTML to Markdown rendering.
//!
//! The renderers walk a DOM subtree and emit the Markdown subset this crate
//! guarantees: ATX headings, paragraphs, flat lists, fenced code blocks, GFM
//! tables, blockquotes, emphasis, links, images, inline code, strikethrough
//! and horizontal rules.
//!
//! Tag dispatch goes through lookup tables (see [`block`] and [`inline`]);
//! tags missing from a table fall through to transparent recursion so that
//! unknown markup never loses its text.

use std::fmt;

use dom_query::Selection;
use regex::Regex;
use serde::Serialize;

use crate::entities;
use crate::patterns::WHITESPACE_RUN;

pub mod block;
pub mod inline;
pub mod table;

pub use block::{render_block, render_block_with_depth};
pub use inline::render_inline;
pub use table::render_table;

/// Nesting depth used by the convenience entry points.
pub const DEFAULT_MAX_DEPTH: usize = 100;

// ============================================================================
// MarkdownText
// ============================================================================

/// Markdown produced by the renderers.
///
/// Only content-preserving operations are offered: removing regex matches
/// and trimming. The text is never interpreted as HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MarkdownText(String);

impl MarkdownText {
    /// Wrap already-rendered Markdown.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Empty body.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, not bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy with every match of `pattern` removed.
    #[must_use]
    pub fn remove_matches(&self, pattern: &Regex) -> Self {
        Self(pattern.replace_all(&self.0, "").into_owned())
    }

    /// Copy without leading and trailing whitespace.
    #[must_use]
    pub fn trim(&self) -> Self {
        Self(self.0.trim().to_string())
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MarkdownText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MarkdownText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for MarkdownText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

// ============================================================================
// Render context
// ============================================================================

/// Recursion bookkeeping threaded through every handler.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    depth: usize,
    max_depth: usize,
}

impl RenderContext {
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self { depth: 0, max_depth }
    }

    /// Context for the children of the current element.
    #[must_use]
    pub const fn deeper(self) -> Self {
        Self { depth: self.depth + 1, max_depth: self.max_depth }
    }

    /// True once the nesting limit is reached; the element is flattened.
    #[must_use]
    pub const fn exhausted(self) -> bool {
        self.depth >= self.max_depth
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

/// Rendering strategy for one tag name.
pub type Handler = fn(&Selection, RenderContext) -> String;

// ============================================================================
// Shared text helpers
// ============================================================================

/// Decode character references and collapse whitespace runs to one space.
///
/// Leading and trailing spaces are kept so that `Hi <a>there</a>` keeps the
/// space between the words; callers trim at the fragment boundary.
pub(crate) fn text_fragment(raw: &str) -> String {
    let decoded = entities::decode_cow(raw);
    WHITESPACE_RUN.replace_all(&decoded, " ").into_owned()
}

/// Plain text of an element past the nesting limit.
pub(crate) fn flatten(sel: &Selection) -> String {
    text_fragment(&sel.text()).trim().to_string()
}

/// Collapse runs of blank lines to a single blank line and strip trailing
/// spaces, leaving fenced code blocks untouched.
#[must_use]
pub fn normalize_blank_lines(markdown: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut in_fence = false;
    let mut previous_blank = false;

    for line in markdown.split('\n') {
        if in_fence {
            lines.push(line);
            if line.trim_start().starts_with("```") {
                in_fence = false;
            }
            continue;
        }

        let line = line.trim_end();
        if line.trim_start().starts_with("```") {
            in_fence = true;
        }

        let blank = line.is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_text_len_counts_chars() {
        let text = MarkdownText::new("目次");
        assert_eq!(text.len(), 2);
        assert!(!text.is_empty());
        assert!(MarkdownText::empty().is_empty());
    }

    #[test]
    fn test_markdown_text_remove_and_trim() {
        let pattern = Regex::new("(?s)END.*").expect("pattern");
        let text = MarkdownText::new("  body END tail\nmore ");

        assert_eq!(text.remove_matches(&pattern).trim().as_str(), "body");
    }

    #[test]
    fn test_markdown_text_serializes_as_string() {
        let json = serde_json::to_string(&MarkdownText::new("# Hi")).expect("json");
        assert_eq!(json, r##""# Hi""##);
    }

    #[test]
    fn test_text_fragment_keeps_edge_spaces() {
        assert_eq!(text_fragment("Hi \n\t "), "Hi ");
        assert_eq!(text_fragment("a&amp;b"), "a&b");
    }

    #[test]
    fn test_render_context_depth() {
        let ctx = RenderContext::new(2);
        assert!(!ctx.exhausted());
        assert!(!ctx.deeper().exhausted());
        assert!(ctx.deeper().deeper().exhausted());
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        assert_eq!(normalize_blank_lines("a\n\n\n\nb  \n"), "a\n\nb\n");
    }

    #[test]
    fn test_normalize_leaves_fences_alone() {
        let input = "```rust\nlet a = 1;   \n\n\n\nlet b = 2;\n```\n\n\n\nafter";
        let expected = "```rust\nlet a = 1;   \n\n\n\nlet b = 2;\n```\n\nafter";
        assert_eq!(normalize_blank_lines(input), expected);
    }
}
