//! Content selector rules
//!
//! These rules identify the article body container. The platform has shipped
//! several page layouts; each rule targets one of them.

use dom_query::{Document, Selection};
use tracing::debug;

use crate::selector::utils::{class, contains, has_class_token, tag};
use crate::selector::{query, Rule};

/// Content selector rules in priority order
/// First match wins - check in order
pub static CONTENT_RULES: &[Rule] = &[
    content_rule_1,
    content_rule_2,
    content_rule_3,
];

/// Rule 1: current article layout, body rendered into a `znc` container.
#[must_use]
pub fn content_rule_1(sel: &Selection) -> bool {
    has_class_token(sel, "znc")
}

/// Rule 2: older layouts, any element whose class mentions `article-body`.
#[must_use]
pub fn content_rule_2(sel: &Selection) -> bool {
    contains(&class(sel), "article-body")
}

/// Rule 3: last resort, the first `<article>` element.
#[must_use]
pub fn content_rule_3(sel: &Selection) -> bool {
    tag(sel) == "article"
}

/// Select the element holding the article body.
///
/// Pure selection: the document is never modified. Callers that need to
/// strip or rewrite the subtree must clone it first
/// (see [`crate::html_processing::WorkingCopy`]).
#[must_use]
pub fn locate(doc: &Document) -> Option<Selection<'_>> {
    let root = doc.select("html");

    for (index, rule) in CONTENT_RULES.iter().enumerate() {
        if let Some(found) = query(&root, *rule) {
            debug!(rule = index + 1, tag = %tag(&found), "content container located");
            return Some(found);
        }
    }

    debug!("no content container matched");
    None
}
