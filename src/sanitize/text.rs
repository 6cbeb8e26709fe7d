//! Text-node stages: invisible spaces and whitespace condensing.

use std::borrow::Cow;

use crate::dom::{self, Document};
use crate::patterns::{INVISIBLE_SPACE, WHITESPACE_RUN};
use crate::rewrite;

pub(super) fn normalize_spaces(doc: &Document) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    for text in dom::text_nodes(&root) {
        let value = text.text();
        if INVISIBLE_SPACE.is_match(&value) {
            let normalized = INVISIBLE_SPACE.replace_all(&value, " ");
            dom::replace_text(&text, &normalized);
            changes += 1;
        }
    }

    changes
}

/// Collapse whitespace runs to a single space.
#[must_use]
pub fn condense(text: &str) -> Cow<'_, str> {
    WHITESPACE_RUN.replace_all(text, " ")
}

pub(super) fn condense_whitespace(doc: &Document) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    for text in dom::text_nodes(&root) {
        if !dom::is_attached(&text) || dom::in_preformatted(&text) {
            continue;
        }

        let value = text.text();
        let condensed = condense(&value);
        let mut changed = matches!(condensed, Cow::Owned(_));
        let current = if changed {
            dom::replace_text(&text, &condensed)
        } else {
            text
        };

        match rewrite::trim_text_node(&current) {
            Some(trimmed) if trimmed.id == current.id => {}
            _ => changed = true,
        }
        if changed {
            changes += 1;
        }
    }

    changes
}
