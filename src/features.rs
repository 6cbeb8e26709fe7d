//! Per-element text features.
//!
//! A single pass over the text nodes below the body builds two tables:
//! how many non-whitespace characters each element holds, and how many of
//! those sit inside followable hyperlinks. Both are read-only once built.

use std::collections::HashMap;

use url::Url;

use crate::dom::{self, NodeId, NodeRef};
use crate::tags::is_non_content_text_tag;
use crate::url_utils::is_resolvable;

/// Text and anchor-text lengths per element.
#[derive(Debug, Default, Clone)]
pub struct FeatureTables {
    text_length: HashMap<NodeId, usize>,
    anchor_length: HashMap<NodeId, usize>,
}

impl FeatureTables {
    /// Non-whitespace characters below `node` (0 when absent).
    #[must_use]
    pub fn text_length(&self, node: &NodeRef) -> usize {
        self.text_length.get(&node.id).copied().unwrap_or(0)
    }

    /// Non-whitespace characters below `node` that belong to hyperlinks.
    #[must_use]
    pub fn anchor_length(&self, node: &NodeRef) -> usize {
        self.anchor_length.get(&node.id).copied().unwrap_or(0)
    }

    /// Number of elements with recorded text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text_length.len()
    }

    /// Whether no element holds any text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text_length.is_empty()
    }
}

/// Count characters that are not whitespace.
///
/// `&nbsp;` arrives from the parser as U+00A0, which `char::is_whitespace`
/// already covers.
#[must_use]
pub fn visible_char_count(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Build the feature tables for the subtree below `body`.
///
/// Lengths propagate to every ancestor up to, but not including, `body`.
#[must_use]
pub fn extract_features(body: &NodeRef, base: Option<&Url>) -> FeatureTables {
    let mut tables = FeatureTables::default();

    for text in dom::text_nodes(body) {
        let Some(parent) = text.parent() else {
            continue;
        };
        if dom::tag_name(&parent).is_some_and(|t| is_non_content_text_tag(&t)) {
            continue;
        }

        let length = visible_char_count(&text.text());
        if length == 0 {
            continue;
        }

        propagate(&mut tables.text_length, Some(parent), body, length);
    }

    for anchor in dom::elements_by_tag(body, "a") {
        let Some(href) = anchor.attr("href") else {
            continue;
        };
        if !is_resolvable(&href, base) {
            continue;
        }

        let length = tables.text_length(&anchor);
        if length == 0 {
            continue;
        }

        propagate(&mut tables.anchor_length, Some(anchor), body, length);
    }

    tables
}

fn propagate(table: &mut HashMap<NodeId, usize>, start: Option<NodeRef>, body: &NodeRef, length: usize) {
    let mut current = start;
    while let Some(node) = current {
        if node.id == body.id || !node.is_element() {
            break;
        }
        *table.entry(node.id).or_insert(0) += length;
        current = node.parent();
    }
}
