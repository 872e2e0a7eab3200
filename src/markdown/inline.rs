//! Inline renderer: text-level markup inside a block.
//!
//! Never emits blank lines. `br` becomes a single space here.

use std::collections::HashMap;
use std::sync::LazyLock;

use dom_query::Selection;

use super::{flatten, text_fragment, Handler, RenderContext};
use crate::dom::{self, ChildNode};
use crate::url_utils;

/// Tag name to inline strategy. Missing tags are transparent containers.
static INLINE_HANDLERS: LazyLock<HashMap<&'static str, Handler>> = LazyLock::new(|| {
    let entries: [(&'static str, Handler); 10] = [
        ("a", link),
        ("img", image),
        ("strong", strong),
        ("b", strong),
        ("em", emphasis),
        ("i", emphasis),
        ("code", code),
        ("s", strikethrough),
        ("del", strikethrough),
        ("br", line_break),
    ];
    entries.into_iter().collect()
});

/// Render the inline content of `sel` as trimmed Markdown.
///
/// # Example
///
/// ```rust
/// use zenn_reader::{dom, markdown};
///
/// let doc = dom::parse(r#"<p>Hi <a href="https://x.com">there</a></p>"#);
/// assert_eq!(markdown::render_inline(&doc.select("p")), "Hi [there](https://x.com)");
/// ```
#[must_use]
pub fn render_inline(sel: &Selection) -> String {
    render_inline_with(sel, RenderContext::default())
}

pub(crate) fn render_inline_with(sel: &Selection, ctx: RenderContext) -> String {
    if ctx.exhausted() {
        return flatten(sel);
    }

    let fragments: Vec<String> = dom::child_nodes(sel)
        .into_iter()
        .map(|child| match child {
            ChildNode::Text(text) => text_fragment(&text),
            ChildNode::Element { tag, sel } => render_element(&tag, &sel, ctx.deeper()),
        })
        .collect();

    fragments.concat().trim().to_string()
}

fn render_element(tag: &str, sel: &Selection, ctx: RenderContext) -> String {
    match INLINE_HANDLERS.get(tag) {
        Some(handler) => handler(sel, ctx),
        None => render_inline_with(sel, ctx),
    }
}

// ============================================================================
// Handlers (shared with the block renderer)
// ============================================================================

/// `[text](href)`; empty text falls back to the last path segment.
pub(super) fn link(sel: &Selection, ctx: RenderContext) -> String {
    let href = dom::attribute_or_empty(sel, "href");
    let mut text = render_inline_with(sel, ctx);
    if text.is_empty() {
        text = url_utils::last_path_segment(&href).unwrap_or_else(|| href.clone());
    }
    format!("[{text}]({href})")
}

/// `![alt](src)`, missing attributes render empty.
pub(super) fn image(sel: &Selection, _ctx: RenderContext) -> String {
    let alt = dom::attribute_or_empty(sel, "alt");
    let src = dom::attribute_or_empty(sel, "src");
    format!("![{alt}]({src})")
}

pub(super) fn strong(sel: &Selection, ctx: RenderContext) -> String {
    format!("**{}**", render_inline_with(sel, ctx))
}

pub(super) fn emphasis(sel: &Selection, ctx: RenderContext) -> String {
    format!("*{}*", render_inline_with(sel, ctx))
}

pub(super) fn strikethrough(sel: &Selection, ctx: RenderContext) -> String {
    format!("~~{}~~", render_inline_with(sel, ctx))
}

/// Inline code is verbatim: no recursion, no entity decoding.
pub(super) fn code(sel: &Selection, _ctx: RenderContext) -> String {
    format!("`{}`", dom::text_content(sel).trim())
}

fn line_break(_sel: &Selection, _ctx: RenderContext) -> String {
    " ".to_string()
}
