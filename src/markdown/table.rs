//! GFM table rendering.
//!
//! ```text
//! | Header A | Header B |
//! | --- | -------- |
//! | Cell 1 | Cell 2 |
//! ```

use dom_query::Selection;

use super::inline::render_inline_with;
use super::RenderContext;
use crate::dom;

/// Render a `table` element as a GFM table wrapped in blank lines.
///
/// Headers come from the first `thead tr` (`th` cells), or else from the
/// first row's `td` cells. Body rows are all `tbody tr` rows with at least
/// one `td`, so a first-row header also appears as data. A table without
/// header cells still emits its body rows.
#[must_use]
pub fn render_table(table: &Selection) -> String {
    render_table_with(table, RenderContext::default())
}

pub(crate) fn render_table_with(table: &Selection, ctx: RenderContext) -> String {
    let headers = resolve_header(table, ctx);

    let mut lines: Vec<String> = Vec::new();
    if !headers.is_empty() {
        let separators: Vec<String> = headers
            .iter()
            .map(|h| "-".repeat(h.chars().count().max(3)))
            .collect();
        lines.push(table_line(&headers));
        lines.push(table_line(&separators));
    }

    // Bare rows sit in an implied tbody, so a synthetic header row is
    // emitted again as the first data row.
    for row in dom::query_selector_all(table, "tbody tr") {
        let cells = row_cells(&row, "td", ctx);
        if !cells.is_empty() {
            lines.push(table_line(&cells));
        }
    }

    let body: String = lines.iter().map(|line| format!("{line}\n")).collect();
    format!("\n\n{body}\n")
}

/// Header texts from `thead`, else from the first row's `td` cells.
fn resolve_header(table: &Selection, ctx: RenderContext) -> Vec<String> {
    let thead_row = dom::query_selector(table, "thead tr");
    if thead_row.exists() {
        return row_cells(&thead_row, "th", ctx);
    }

    let first_row = dom::query_selector(table, "tr");
    if first_row.exists() {
        return row_cells(&first_row, "td", ctx);
    }

    Vec::new()
}

fn row_cells(row: &Selection, cell_tag: &str, ctx: RenderContext) -> Vec<String> {
    dom::query_selector_all(row, cell_tag)
        .iter()
        .map(|cell| render_inline_with(cell, ctx.deeper()).trim().to_string())
        .collect()
}

fn table_line(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}
