//! DOM Operations Adapter
//!
//! Node-level helpers over `dom_query`. Everything above this module talks
//! in terms of [`NodeRef`]; tag names are always lower-case strings.
//!
//! Traversals that feed a mutation return owned `Vec<NodeRef>` snapshots.
//! Callers removing nodes from a snapshot check [`is_attached`] before
//! touching an entry whose ancestor may already be gone.

pub use dom_query::{Document, NodeId, NodeRef, Selection};

pub use tendril::StrTendril;

use crate::tags::is_preformatted_tag;

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Tag/Node Information ===

/// Get tag name (lowercase) of an element node.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Check if the node is an element with the given tag name.
#[must_use]
pub fn has_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element()
        && node
            .node_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

/// Get all attribute names of an element, in document order.
#[must_use]
pub fn attribute_names(node: &NodeRef) -> Vec<String> {
    node.attrs()
        .iter()
        .map(|attr| attr.name.local.to_string())
        .collect()
}

/// Get all attributes as key-value pairs
#[must_use]
pub fn get_all_attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

/// Text value of a text node (empty for other node types).
#[must_use]
pub fn text_value(node: &NodeRef) -> StrTendril {
    if node.is_text() {
        node.text()
    } else {
        StrTendril::new()
    }
}

/// Check if the node is a text node holding only whitespace.
#[must_use]
pub fn is_whitespace_text(node: &NodeRef) -> bool {
    node.is_text() && node.text().chars().all(char::is_whitespace)
}

/// Check if the node carries nothing visible: whitespace text or a comment.
#[must_use]
pub fn is_insignificant(node: &NodeRef) -> bool {
    node.is_comment() || is_whitespace_text(node)
}

// === Document Structure ===

/// Locate the document body.
///
/// Frameset documents have no `body`; their `frameset` element stands in
/// for it so later stages can replace it.
#[must_use]
pub fn body(doc: &Document) -> Option<NodeRef<'_>> {
    let root = doc.root();
    let html = root.children().into_iter().find(|n| has_tag(n, "html"))?;
    html.children()
        .into_iter()
        .find(|n| has_tag(n, "body") || has_tag(n, "frameset"))
}

/// The subtree every stage works on: the body, or the document root when
/// there is none.
#[must_use]
pub fn analysis_root(doc: &Document) -> NodeRef<'_> {
    body(doc).unwrap_or_else(|| doc.root())
}

/// Check if the node is still reachable from its document root.
#[must_use]
pub fn is_attached(node: &NodeRef) -> bool {
    let mut current = Some(*node);
    while let Some(n) = current {
        if n.is_document() {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Check if `node` is `ancestor` or one of its descendants.
#[must_use]
pub fn contains(ancestor: &NodeRef, node: &NodeRef) -> bool {
    let mut current = Some(*node);
    while let Some(n) = current {
        if n.id == ancestor.id {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Check if any ancestor-or-self of the node preserves whitespace.
#[must_use]
pub fn in_preformatted(node: &NodeRef) -> bool {
    let mut current = Some(*node);
    while let Some(n) = current {
        if tag_name(&n).is_some_and(|t| is_preformatted_tag(&t)) {
            return true;
        }
        current = n.parent();
    }
    false
}

// === Traversal Snapshots ===

/// All element descendants of `root` in document order (root excluded).
#[must_use]
pub fn elements<'a>(root: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    root.descendants()
        .into_iter()
        .filter(NodeRef::is_element)
        .collect()
}

/// All element descendants of `root` with the given tag, in document order.
#[must_use]
pub fn elements_by_tag<'a>(root: &NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    root.descendants()
        .into_iter()
        .filter(|n| has_tag(n, tag))
        .collect()
}

/// All text descendants of `root` in document order.
#[must_use]
pub fn text_nodes<'a>(root: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    root.descendants()
        .into_iter()
        .filter(NodeRef::is_text)
        .collect()
}

/// Previous sibling that is not whitespace text or a comment.
#[must_use]
pub fn prev_significant_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.prev_sibling();
    while let Some(s) = sibling {
        if !is_insignificant(&s) {
            return Some(s);
        }
        sibling = s.prev_sibling();
    }
    None
}

/// Next sibling that is not whitespace text or a comment.
#[must_use]
pub fn next_significant_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.next_sibling();
    while let Some(s) = sibling {
        if !is_insignificant(&s) {
            return Some(s);
        }
        sibling = s.next_sibling();
    }
    None
}

// === Tree Manipulation ===

/// Create a detached text node in the same tree as `node`.
#[must_use]
pub fn new_text<'a>(node: &NodeRef<'a>, text: &str) -> NodeRef<'a> {
    node.tree.new_text(text)
}

/// Create a detached element in the same tree as `node`.
#[must_use]
pub fn new_element<'a>(node: &NodeRef<'a>, tag: &str) -> NodeRef<'a> {
    node.tree.new_element(tag)
}

/// Detach `node` from wherever it is and insert it right before `anchor`.
pub fn move_before(anchor: &NodeRef, node: &NodeRef) {
    remove(node);
    anchor.insert_before(node);
}

/// Detach `node` and append it as the last child of `parent`.
pub fn move_into(parent: &NodeRef, node: &NodeRef) {
    remove(node);
    parent.append_child(node);
}

/// Replace a text node's value, returning the node now holding it.
///
/// The old node is swapped for a fresh one; references to it are stale
/// afterwards.
pub fn replace_text<'a>(node: &NodeRef<'a>, text: &str) -> NodeRef<'a> {
    let fresh = new_text(node, text);
    node.insert_before(&fresh);
    node.remove_from_parent();
    fresh
}

/// Remove a node from the tree. Detached nodes are left alone.
pub fn remove(node: &NodeRef) {
    if node.parent().is_some() {
        node.remove_from_parent();
    }
}
