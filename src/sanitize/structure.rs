//! Document-structure stages: comments, framesets, noscript, blacklisted
//! and hidden elements, block-in-inline nesting.

use tracing::debug;

use crate::dom::{self, Document, NodeRef, Selection};
use crate::patterns::{DISPLAY_NONE, NEGATIVE_LEFT, POSITION_ABSOLUTE, VISIBILITY_HIDDEN};
use crate::rewrite;
use crate::tags::TagKind;

use super::Context;

/// Placed in the synthetic body of a frameset document without `noframes`.
pub const FRAMESET_NOTICE: &str = "This page uses frames, which are not supported.";

pub(super) fn strip_comments(doc: &Document) -> usize {
    let comments: Vec<NodeRef> = doc
        .root()
        .descendants()
        .into_iter()
        .filter(NodeRef::is_comment)
        .collect();

    for comment in &comments {
        dom::remove(comment);
    }
    comments.len()
}

pub(super) fn resolve_frameset(doc: &Document) -> usize {
    let Some(frameset) = dom::body(doc).filter(|b| dom::has_tag(b, "frameset")) else {
        return 0;
    };

    // noframes content is raw text holding markup
    let fallback: Vec<String> = dom::elements_by_tag(&doc.root(), "noframes")
        .iter()
        .map(|n| n.text().to_string())
        .filter(|html| !html.trim().is_empty())
        .collect();

    let body = dom::new_element(&frameset, "body");
    frameset.insert_before(&body);
    dom::remove(&frameset);

    if fallback.is_empty() {
        body.append_child(&dom::new_text(&body, FRAMESET_NOTICE));
    } else {
        Selection::from(body).set_html(fallback.join("\n"));
    }

    debug!(noframes = fallback.len(), "frameset replaced by synthetic body");
    1
}

pub(super) fn unwrap_noscript(doc: &Document) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    for noscript in dom::elements_by_tag(&root, "noscript") {
        if !dom::is_attached(&noscript) {
            continue;
        }

        let has_elements = noscript.children().iter().any(NodeRef::is_element);
        if has_elements {
            rewrite::unwrap(&noscript);
        } else {
            // Parsed with scripting enabled: the content is one raw text node
            let html = noscript.text().to_string();
            if html.trim().is_empty() {
                dom::remove(&noscript);
            } else {
                Selection::from(noscript).replace_with_html(html);
            }
        }
        changes += 1;
    }

    changes
}

/// Check if an inline `style` hides the element.
#[must_use]
pub fn is_hidden_by_style(style: &str) -> bool {
    DISPLAY_NONE.is_match(style)
        || VISIBILITY_HIDDEN.is_match(style)
        || (POSITION_ABSOLUTE.is_match(style) && NEGATIVE_LEFT.is_match(style))
}

pub(super) fn remove_blacklisted(doc: &Document, ctx: &Context) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    for element in dom::elements(&root) {
        if !dom::is_attached(&element) {
            continue;
        }
        let blacklisted = dom::tag_name(&element).is_some_and(|t| ctx.options.is_blacklisted(&t));
        let hidden = element.attr("style").is_some_and(|s| is_hidden_by_style(&s));
        if blacklisted || hidden {
            dom::remove(&element);
            changes += 1;
        }
    }

    changes
}

fn is_block_child(node: &NodeRef) -> bool {
    dom::tag_name(node).is_some_and(|t| matches!(TagKind::of(&t), TagKind::Block | TagKind::ListItem))
}

pub(super) fn fix_inline_nesting(doc: &Document) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    // Innermost first, so an outer inline sees the blocks an inner one released
    for element in dom::elements(&root).into_iter().rev() {
        let Some(tag) = dom::tag_name(&element) else {
            continue;
        };
        if tag == "a" || !TagKind::of(&tag).is_inline() || !dom::is_attached(&element) {
            continue;
        }
        if element.children().iter().any(is_block_child) && rewrite::unwrap(&element) {
            changes += 1;
        }
    }

    changes
}
