//! Block renderer: recursive walk over block-level structure.

use std::collections::HashMap;
use std::sync::LazyLock;

use dom_query::Selection;
use tracing::trace;

use super::inline::{self, render_inline_with};
use super::table::render_table_with;
use super::{flatten, normalize_blank_lines, text_fragment, Handler, MarkdownText, RenderContext};
use crate::dom::{self, ChildNode};

/// Tag name to block strategy. Missing tags recurse as generic containers.
static BLOCK_HANDLERS: LazyLock<HashMap<&'static str, Handler>> = LazyLock::new(|| {
    let entries: [(&'static str, Handler); 27] = [
        ("h1", heading),
        ("h2", heading),
        ("h3", heading),
        ("h4", heading),
        ("h5", heading),
        ("h6", heading),
        ("p", paragraph),
        ("br", line_break),
        ("hr", rule),
        ("ul", unordered_list),
        ("ol", ordered_list),
        ("blockquote", blockquote),
        ("pre", code_block),
        ("table", render_table_with),
        // Inline markup that shows up directly under a block container
        ("code", inline::code),
        ("a", inline::link),
        ("img", inline::image),
        ("strong", inline::strong),
        ("b", inline::strong),
        ("em", inline::emphasis),
        ("i", inline::emphasis),
        ("s", inline::strikethrough),
        ("del", inline::strikethrough),
        // Generic containers
        ("div", container),
        ("span", container),
        ("section", container),
        ("article", container),
    ];
    entries.into_iter().collect()
});

/// Render `sel` and its descendants as a Markdown document fragment.
///
/// Output is normalised (at most one blank line in a row outside code
/// fences) and trimmed. Identical trees always render to identical bytes.
#[must_use]
pub fn render_block(sel: &Selection) -> MarkdownText {
    render_block_ctx(sel, RenderContext::default())
}

/// [`render_block`] with an explicit nesting limit. Elements nested deeper
/// than `max_depth` are flattened to their decoded text.
#[must_use]
pub fn render_block_with_depth(sel: &Selection, max_depth: usize) -> MarkdownText {
    render_block_ctx(sel, RenderContext::new(max_depth))
}

fn render_block_ctx(sel: &Selection, ctx: RenderContext) -> MarkdownText {
    let raw = render_children(sel, ctx);
    MarkdownText::new(normalize_blank_lines(&raw).trim())
}

/// Concatenate the rendering of every direct child, untrimmed.
fn render_children(sel: &Selection, ctx: RenderContext) -> String {
    if ctx.exhausted() {
        trace!("depth limit reached, flattening subtree");
        return flatten(sel);
    }

    let fragments: Vec<String> = dom::child_nodes(sel)
        .into_iter()
        .filter_map(|child| match child {
            // Whitespace-only text between children is markup indentation and
            // is dropped, even between two inline elements at block level.
            ChildNode::Text(text) if text.trim().is_empty() => None,
            ChildNode::Text(text) => Some(text_fragment(&text)),
            ChildNode::Element { tag, sel } => Some(render_element(&tag, &sel, ctx.deeper())),
        })
        .collect();

    fragments.concat()
}

fn render_element(tag: &str, sel: &Selection, ctx: RenderContext) -> String {
    match BLOCK_HANDLERS.get(tag) {
        Some(handler) => handler(sel, ctx),
        None => container(sel, ctx),
    }
}

// ============================================================================
// Handlers
// ============================================================================

fn heading(sel: &Selection, ctx: RenderContext) -> String {
    let level = dom::tag_name(sel)
        .and_then(|tag| tag.strip_prefix('h').and_then(|n| n.parse::<usize>().ok()))
        .unwrap_or(1);
    format!("\n\n{} {}\n\n", "#".repeat(level), render_inline_with(sel, ctx))
}

fn paragraph(sel: &Selection, ctx: RenderContext) -> String {
    format!("\n\n{}\n\n", render_inline_with(sel, ctx))
}

fn line_break(_sel: &Selection, _ctx: RenderContext) -> String {
    "\n".to_string()
}

fn rule(_sel: &Selection, _ctx: RenderContext) -> String {
    "\n\n---\n\n".to_string()
}

/// Every `li` descendant becomes one flat item, nested lists included.
fn unordered_list(sel: &Selection, ctx: RenderContext) -> String {
    let items: Vec<String> = dom::query_selector_all(sel, "li")
        .iter()
        .map(|li| format!("\n- {}", render_inline_with(li, ctx)))
        .collect();
    format!("\n{}\n\n", items.concat())
}

fn ordered_list(sel: &Selection, ctx: RenderContext) -> String {
    let items: Vec<String> = dom::query_selector_all(sel, "li")
        .iter()
        .enumerate()
        .map(|(i, li)| format!("\n{}. {}", i + 1, render_inline_with(li, ctx)))
        .collect();
    format!("\n{}\n\n", items.concat())
}

fn blockquote(sel: &Selection, ctx: RenderContext) -> String {
    let inner = render_block_ctx(sel, ctx);
    let quoted: Vec<String> = inner.as_str().split('\n').map(|line| format!("> {line}")).collect();
    format!("\n\n{}\n\n", quoted.join("\n"))
}

/// Fenced block; the language comes from a `language-*` class on the
/// nested `code` element. Content is verbatim.
fn code_block(sel: &Selection, _ctx: RenderContext) -> String {
    let code_el = dom::query_selector(sel, "code");
    let (code, lang) = if code_el.exists() {
        let class = dom::attribute_or_empty(&code_el, "class");
        let lang = class.strip_prefix("language-").unwrap_or(&class).trim().to_string();
        (dom::text_content(&code_el), lang)
    } else {
        (dom::text_content(sel), String::new())
    };
    format!("\n\n```{lang}\n{}\n```\n\n", code.trim())
}

fn container(sel: &Selection, ctx: RenderContext) -> String {
    render_children(sel, ctx)
}
