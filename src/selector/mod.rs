//! Selector Infrastructure
//!
//! Rules are plain predicate functions over a `Selection`. Ordered slices of
//! rules express priority: the first rule with a match wins.

use dom_query::Selection;

pub mod content;
pub mod meta;

pub mod utils;

/// A selector rule that tests if a selection matches certain criteria
pub type Rule = fn(&Selection) -> bool;

/// Query for first element matching the rule
///
/// Iterates through all descendants in document order and returns the first
/// element for which the rule returns true.
///
/// # Example
///
/// ```rust
/// use zenn_reader::selector::{self, utils};
/// use zenn_reader::dom;
///
/// let doc = dom::parse(r#"<div><p class="content">text</p></div>"#);
/// let root = doc.select("div");
///
/// fn has_content_class(sel: &dom_query::Selection) -> bool {
///     utils::class(sel).contains("content")
/// }
///
/// let result = selector::query(&root, has_content_class);
/// assert!(result.is_some());
/// ```
#[must_use]
pub fn query<'a>(root: &Selection<'a>, rule: Rule) -> Option<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .find(|sel| rule(sel))
}

/// Query for all elements matching the rule, in document order.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| rule(sel))
        .collect()
}

/// Try each rule in order and return the first element matched by the
/// earliest rule whose match `accept`s, with that rule's index.
///
/// Priority is by rule, not by position: an element matched by rule 1 late
/// in the document beats one matched by rule 2 early in the document. Only
/// each rule's first match is offered to `accept`; a rejected match moves on
/// to the next rule.
pub fn query_first_rule<'a, F>(root: &Selection<'a>, rules: &[Rule], accept: F) -> Option<(usize, Selection<'a>)>
where
    F: Fn(&Selection) -> bool,
{
    rules
        .iter()
        .enumerate()
        .find_map(|(index, rule)| query(root, *rule).filter(|sel| accept(sel)).map(|sel| (index, sel)))
}
