//! Compiled regex patterns used across the extraction pipeline.
//!
//! All patterns are compiled once at first use using `LazyLock`.
//! Patterns are organized by the stage that consumes them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Entity Decoding
// =============================================================================

/// Matches the character references the decoder understands.
///
/// One alternation so that a single left-to-right pass handles every form and
/// replacement output is never scanned again.
pub static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:(?P<named>nbsp|amp|lt|gt|quot)|#(?P<dec>[0-9]+)|#[xX](?P<hex>[0-9a-fA-F]+));")
        .expect("ENTITY regex")
});

// =============================================================================
// Text Normalization
// =============================================================================

/// Runs of HTML whitespace, collapsed to a single space in inline context.
pub static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t\r\n\f]+").expect("WHITESPACE_RUN regex")
});

// =============================================================================
// Metadata Patterns
// =============================================================================

/// Localized publication line, e.g. `2024/03/15に公開`.
///
/// Only non-digits may sit between the date and the suffix.
pub static PUBLISHED_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})/(\d{2})/(\d{2})\D*に公開").expect("PUBLISHED_TEXT regex")
});

/// Markdown punctuation removed before deriving a title from body text.
pub static TITLE_MARKDOWN_PUNCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[#*`_~\[\]()]").expect("TITLE_MARKDOWN_PUNCT regex")
});

/// Sentence boundary used for title derivation.
pub static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.\s+").expect("SENTENCE_BOUNDARY regex")
});

// =============================================================================
// Markdown to Plain Text
// =============================================================================

pub static MD_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#+\s+").expect("MD_HEADING regex")
});

pub static MD_BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*").expect("MD_BOLD regex")
});

pub static MD_ITALIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*(.*?)\*").expect("MD_ITALIC regex")
});

pub static MD_INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`([^`\n]+)`").expect("MD_INLINE_CODE regex")
});

pub static MD_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").expect("MD_IMAGE regex")
});

pub static MD_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("MD_LINK regex")
});

pub static MD_STRIKETHROUGH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"~~(.*?)~~").expect("MD_STRIKETHROUGH regex")
});

pub static MD_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^---+$").expect("MD_RULE regex")
});

pub static MD_BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*[*+-][ \t]+").expect("MD_BULLET regex")
});

pub static MD_ORDERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+").expect("MD_ORDERED regex")
});

/// Fenced code block; group 1 is the content without the info string.
pub static MD_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[^\n`]*\n(.*?)```").expect("MD_FENCE regex")
});

pub static MD_QUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^> ?").expect("MD_QUOTE regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_pattern_captures_each_form() {
        let caps = ENTITY.captures("&amp;").expect("named");
        assert_eq!(caps.name("named").map(|m| m.as_str()), Some("amp"));

        let caps = ENTITY.captures("&#39;").expect("decimal");
        assert_eq!(caps.name("dec").map(|m| m.as_str()), Some("39"));

        let caps = ENTITY.captures("&#X1F600;").expect("hex");
        assert_eq!(caps.name("hex").map(|m| m.as_str()), Some("1F600"));

        assert!(!ENTITY.is_match("&copy;"));
        assert!(!ENTITY.is_match("&#;"));
    }

    #[test]
    fn published_text_allows_non_digits_before_suffix() {
        let caps = PUBLISHED_TEXT.captures("2024/03/15 (金) に公開").expect("match");
        assert_eq!(&caps[1], "2024");
        assert_eq!(&caps[2], "03");
        assert_eq!(&caps[3], "15");

        assert!(!PUBLISHED_TEXT.is_match("2024/03/15に更新"));
        assert!(!PUBLISHED_TEXT.is_match("2024/03/15 10:00に公開"));
    }

    #[test]
    fn fence_captures_content_only() {
        let caps = MD_FENCE.captures("before\n```rust\nlet a = 1;\n```\nafter").expect("fence");
        assert_eq!(&caps[1], "let a = 1;\n");
    }

    #[test]
    fn quote_marker_does_not_swallow_line_breaks() {
        let text = MD_QUOTE.replace_all("> a\n>\n> b", "");
        assert_eq!(text, "a\n\nb");
    }
}
