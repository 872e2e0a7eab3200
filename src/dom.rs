//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate so the rest of the crate speaks in
//! terms of tags, attributes and child nodes instead of raw node handles.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

/// A direct child of an element, as seen by the renderers.
///
/// Comments, doctypes and processing instructions are not represented.
pub enum ChildNode<'a> {
    /// A text node with its raw (parser-decoded) contents.
    Text(StrTendril),
    /// An element with its lowercase tag name.
    Element {
        /// Lowercase local tag name.
        tag: String,
        /// Selection wrapping just this element.
        sel: Selection<'a>,
    },
}

// === Attribute Operations ===

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute value, or the empty string when missing.
#[inline]
#[must_use]
pub fn attribute_or_empty(sel: &Selection, name: &str) -> String {
    get_attribute(sel, name).unwrap_or_default()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Tree Navigation ===

/// Direct children of the first node in `sel`, text nodes included, in
/// document order.
#[must_use]
pub fn child_nodes<'a>(sel: &Selection<'a>) -> Vec<ChildNode<'a>> {
    let Some(node) = sel.nodes().first() else {
        return Vec::new();
    };

    node.children()
        .into_iter()
        .filter_map(|child| {
            if child.is_text() {
                Some(ChildNode::Text(child.text()))
            } else if child.is_element() {
                let tag = child.node_name()?.to_ascii_lowercase();
                Some(ChildNode::Element { tag, sel: Selection::from(child) })
            } else {
                None
            }
        })
        .collect()
}

// === Querying ===

/// Query single element by CSS selector
#[inline]
#[must_use]
pub fn query_selector<'a>(sel: &Selection<'a>, selector: &str) -> Selection<'a> {
    sel.select_single(selector)
}

/// Query all elements by CSS selector, one `Selection` per match in
/// document order.
#[must_use]
pub fn query_selector_all<'a>(sel: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    sel.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

// === Tree Manipulation ===

/// Remove elements from tree
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Deep-clone an element into a brand new document.
///
/// The returned document owns its own tree; nothing done to it is visible
/// through the source selection. Use [`cloned_root`] to get back to the
/// element inside the clone.
#[must_use]
pub fn clone_element(sel: &Selection) -> Document {
    Document::from(outer_html(sel))
}

/// Locate the cloned element inside a document produced by [`clone_element`].
///
/// Re-parsing wraps the fragment in `html`/`body`; the clone is the first
/// element under `body` when its tag survived parsing. Elements the parser
/// cannot host at body level (a lone `td`, say) degrade to `body` itself.
#[must_use]
pub fn cloned_root<'a>(doc: &'a Document, tag: &str) -> Selection<'a> {
    let body = doc.select("body");
    if tag == "body" || tag == "html" {
        return body;
    }

    let first = body.children().first();
    if first.exists() && tag_name(&first).as_deref() == Some(tag) {
        first
    } else {
        body
    }
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
