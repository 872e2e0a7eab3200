//! HTML Processing
//!
//! The located body element is copied into a private document before any
//! cleaning, so the caller's parsed page is never modified.

use tracing::trace;

use crate::dom::{self, Document, Selection};
use crate::markdown::{self, MarkdownText};

/// Elements removed with their children before rendering.
pub const TAGS_TO_CLEAN: &[&str] = &["script", "style", "svg"];

/// Owned copy of the article body element.
pub struct WorkingCopy {
    doc: Document,
    tag: String,
}

impl WorkingCopy {
    /// Deep-clone `sel` into a new document.
    #[must_use]
    pub fn from_selection(sel: &Selection) -> Self {
        let tag = dom::tag_name(sel).unwrap_or_default();
        Self { doc: dom::clone_element(sel), tag }
    }

    /// The cloned element inside the private document.
    #[must_use]
    pub fn root(&self) -> Selection<'_> {
        dom::cloned_root(&self.doc, &self.tag)
    }

    /// Remove every [`TAGS_TO_CLEAN`] element from the copy.
    pub fn clean(&self) -> &Self {
        let root = self.root();
        let combined = TAGS_TO_CLEAN.join(", ");
        let doomed = root.select(&combined);
        if doomed.exists() {
            trace!(count = doomed.length(), "removing non-content elements");
            dom::remove(&doomed);
        }
        self
    }

    /// Render the (cleaned) copy as Markdown.
    #[must_use]
    pub fn render(&self, max_depth: usize) -> MarkdownText {
        markdown::render_block_with_depth(&self.root(), max_depth)
    }
}

/// Clone `sel`, strip non-content elements from the clone and render it.
#[must_use]
pub fn render_clean(sel: &Selection, max_depth: usize) -> MarkdownText {
    WorkingCopy::from_selection(sel).clean().render(max_depth)
}
