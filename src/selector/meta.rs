//! Metadata Selectors
//!
//! Selector rules for the platform's author, publication date and topic
//! markup. Class names generated by CSS modules are matched on their stable
//! prefix; the hash suffix changes between site releases.

use dom_query::Selection;

use crate::selector::utils::{has_class_prefix, has_class_token, tag};
use crate::selector::Rule;

// ============================================================
// AUTHOR SELECTORS
// ============================================================

/// Author selector rules (in priority order)
pub static META_AUTHOR: &[Rule] = &[meta_author_rule_1, meta_author_rule_2];

/// Rule 1: profile name rendered with the `user-name` class.
#[must_use]
pub fn meta_author_rule_1(sel: &Selection) -> bool {
    has_class_token(sel, "user-name")
}

/// Rule 2: display name in the mobile sticky navigation bar.
#[must_use]
pub fn meta_author_rule_2(sel: &Selection) -> bool {
    has_class_prefix(sel, "ContentStickyNavForMobile_displayName")
}

// ============================================================
// PUBLICATION DATE SELECTORS
// ============================================================

/// Header element carrying the localized `YYYY/MM/DDに公開` line.
#[must_use]
pub fn meta_pub_date_rule(sel: &Selection) -> bool {
    has_class_prefix(sel, "ArticleHeader_pubDate")
}

// ============================================================
// TOPIC SELECTORS
// ============================================================

/// Anchor linking to a topic page.
#[must_use]
pub fn meta_topic_link_rule(sel: &Selection) -> bool {
    tag(sel) == "a" && has_class_prefix(sel, "View_topicLink")
}

/// Display-name element nested inside a topic link.
#[must_use]
pub fn meta_topic_name_rule(sel: &Selection) -> bool {
    has_class_prefix(sel, "View_topicName")
}
