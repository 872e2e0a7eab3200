//! Utility functions for selector pattern matching
//!
//! Provides helper functions used throughout selector rules for common operations
//! like class access and class-token matching.

use crate::dom;
use dom_query::Selection;

// === String Utilities ===

/// Case-sensitive contains check
#[inline]
#[must_use]
pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

// === Element Attribute Helpers ===

/// Element class attribute, or empty string
#[inline]
#[must_use]
pub fn class(sel: &Selection) -> String {
    dom::class_name(sel).unwrap_or_default()
}

/// Lowercase tag name, or empty string
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

// === Class Matching ===

/// True when one of the whitespace-separated class tokens equals `token`.
#[must_use]
pub fn has_class_token(sel: &Selection, token: &str) -> bool {
    class(sel).split_ascii_whitespace().any(|c| c == token)
}

/// True when one of the class tokens starts with `prefix`.
///
/// CSS-module class names carry a build hash suffix
/// (`View_topicLink__jdtX_`) that changes between site releases, so the
/// platform selectors match on the stable prefix.
#[must_use]
pub fn has_class_prefix(sel: &Selection, prefix: &str) -> bool {
    class(sel).split_ascii_whitespace().any(|c| c.starts_with(prefix))
}
