//! Tree-rewrite primitives shared by the sanitization stages.
//!
//! Unwrapping an element must not glue the words on either side of it
//! together: `foo<div>bar</div>` and `<a>foo</a><span>bar</span>` both read
//! as two words, and so must the result. Whenever two pieces of inline
//! content (text or phrasing elements) become adjacent with no whitespace
//! between them, a single space text node is placed in between.

use tracing::debug;

use crate::dom::{self, NodeRef};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::tags::{is_list_tag, is_void_tag, TagKind};

// =============================================================================
// Text adjacency
// =============================================================================

/// Whitespace recognised at text boundaries. `&nbsp;` is content.
fn is_boundary_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c')
}

fn ends_with_space(node: &NodeRef) -> bool {
    node.is_text() && node.text().chars().last().is_none_or(is_boundary_space)
}

fn starts_with_space(node: &NodeRef) -> bool {
    node.is_text() && node.text().chars().next().is_none_or(is_boundary_space)
}

/// Check if a node renders in the text flow: text or an inline element.
fn flows_inline(node: &NodeRef) -> bool {
    node.is_text() || dom::tag_name(node).is_some_and(|t| TagKind::of(&t).is_inline())
}

/// Check if placing `right` directly after `left` would merge two words.
fn would_merge(left: &NodeRef, right: &NodeRef) -> bool {
    flows_inline(left) && flows_inline(right) && !ends_with_space(left) && !starts_with_space(right)
}

/// Moves nodes in front of an anchor, keeping words apart.
struct Placer<'a> {
    anchor: NodeRef<'a>,
    last: Option<NodeRef<'a>>,
}

impl<'a> Placer<'a> {
    fn new(anchor: NodeRef<'a>) -> Self {
        Self {
            anchor,
            last: anchor.prev_sibling(),
        }
    }

    fn place(&mut self, node: &NodeRef<'a>) {
        if let Some(last) = self.last {
            if would_merge(&last, node) {
                self.anchor.insert_before(&dom::new_text(&self.anchor, " "));
            }
        }
        dom::move_before(&self.anchor, node);
        self.last = Some(*node);
    }

    /// Remove the anchor, guarding the seam it leaves behind.
    fn finish(self) {
        if let (Some(last), Some(next)) = (self.last, self.anchor.next_sibling()) {
            if would_merge(&last, &next) {
                self.anchor.insert_before(&dom::new_text(&self.anchor, " "));
            }
        }
        dom::remove(&self.anchor);
    }
}

// =============================================================================
// Unwrap
// =============================================================================

/// Replace `node` with its children.
///
/// Tables become one paragraph per row and lists lose their item wrappers;
/// everything else is replaced by its children verbatim. Returns `false`
/// when `node` has no parent, in which case nothing changes.
pub fn unwrap(node: &NodeRef) -> bool {
    if node.parent().is_none() {
        debug!("unwrap skipped: node has no parent");
        return false;
    }

    match dom::tag_name(node).as_deref() {
        Some("table") => unwrap_table(node),
        Some(tag) if is_list_tag(tag) => unwrap_list(node),
        _ => unwrap_children(node),
    }
    true
}

fn unwrap_children(node: &NodeRef) {
    let mut placer = Placer::new(*node);
    for child in node.children() {
        placer.place(&child);
    }
    placer.finish();
}

fn unwrap_list(list: &NodeRef) {
    let mut placer = Placer::new(*list);

    for child in list.children() {
        let is_item = dom::tag_name(&child).is_some_and(|t| TagKind::of(&t) == TagKind::ListItem);
        if !is_item {
            placer.place(&child);
            continue;
        }

        let contents = child.children();
        if contents.iter().all(dom::is_insignificant) {
            continue;
        }
        for grandchild in contents {
            placer.place(&grandchild);
        }
    }

    placer.finish();
}

/// Rows of a table in document order, nested tables excluded.
#[must_use]
pub fn table_rows<'a>(table: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut rows = Vec::new();
    for child in table.children() {
        match dom::tag_name(&child).as_deref() {
            Some("tr") => rows.push(child),
            Some("thead" | "tbody" | "tfoot") => {
                rows.extend(child.children().into_iter().filter(|n| dom::has_tag(n, "tr")));
            }
            _ => {}
        }
    }
    rows
}

/// Cells of a row in document order.
#[must_use]
pub fn row_cells<'a>(row: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    row.children()
        .into_iter()
        .filter(|n| dom::has_tag(n, "td") || dom::has_tag(n, "th"))
        .collect()
}

fn holds_blocks(node: &NodeRef) -> bool {
    dom::elements(node)
        .iter()
        .filter_map(dom::tag_name)
        .any(|t| matches!(TagKind::of(&t), TagKind::Block | TagKind::ListItem))
}

fn has_content(node: &NodeRef) -> bool {
    !node.children().iter().all(dom::is_insignificant)
}

/// Move the children of each cell into `target`, one space between cells.
fn move_cells_into(target: &NodeRef, cells: &[NodeRef]) {
    let mut previous = target.last_child();
    for cell in cells.iter().filter(|c| has_content(c)) {
        let mut first = true;
        for child in cell.children() {
            if first {
                if let Some(prev) = previous {
                    if !ends_with_space(&prev) && !starts_with_space(&child) {
                        target.append_child(&dom::new_text(target, " "));
                    }
                }
                first = false;
            }
            dom::move_into(target, &child);
            previous = Some(child);
        }
    }
}

fn unwrap_table(table: &NodeRef) {
    let mut placer = Placer::new(*table);

    let captions: Vec<NodeRef> = table
        .children()
        .into_iter()
        .filter(|n| dom::has_tag(n, "caption") && has_content(n))
        .collect();
    for caption in captions {
        let paragraph = dom::new_element(table, "p");
        move_cells_into(&paragraph, &[caption]);
        placer.place(&paragraph);
    }

    for row in table_rows(table) {
        let cells = row_cells(&row);
        if !cells.iter().any(has_content) {
            continue;
        }

        if cells.iter().any(holds_blocks) {
            for cell in cells.iter().filter(|c| has_content(c)) {
                for child in cell.children() {
                    placer.place(&child);
                }
            }
        } else {
            let paragraph = dom::new_element(table, "p");
            move_cells_into(&paragraph, &cells);
            placer.place(&paragraph);
        }
    }

    placer.finish();
}

// =============================================================================
// Coerce
// =============================================================================

/// Give `node` the tag `new_tag`, returning the element now in its place.
///
/// The original is returned untouched when it already has that tag.
/// Otherwise a fresh element takes its position with every attribute
/// copied; children move over unless the new tag is void.
///
/// # Errors
///
/// Returns [`Error::InvalidTagName`] for an empty tag name or one
/// containing whitespace.
pub fn coerce<'a>(node: &NodeRef<'a>, new_tag: &str) -> Result<NodeRef<'a>> {
    if new_tag.is_empty() || new_tag.chars().any(char::is_whitespace) {
        return Err(Error::InvalidTagName(new_tag.to_string()));
    }
    if dom::has_tag(node, new_tag) {
        return Ok(*node);
    }

    let tag = new_tag.to_ascii_lowercase();
    let fresh = dom::new_element(node, &tag);
    for (name, value) in dom::get_all_attributes(node) {
        fresh.set_attr(&name, &value);
    }
    if !is_void_tag(&tag) {
        for child in node.children() {
            dom::move_into(&fresh, &child);
        }
    }

    if node.parent().is_some() {
        node.insert_before(&fresh);
        node.remove_from_parent();
    }
    Ok(fresh)
}

// =============================================================================
// Leaves
// =============================================================================

/// Check if `node` is an element with no visible text and nothing but other
/// leaves below it.
///
/// Elements named in the leaf exceptions (`img`, `br`, `iframe`, ...) carry
/// meaning on their own: they are never leaves, and neither is anything
/// containing one.
#[must_use]
pub fn is_leaf(node: &NodeRef, opts: &Options) -> bool {
    let Some(tag) = dom::tag_name(node) else {
        return false;
    };
    if opts.is_leaf_exception(&tag) {
        return false;
    }

    node.descendants().iter().all(|d| {
        if d.is_text() {
            dom::is_whitespace_text(d)
        } else if d.is_element() {
            !dom::tag_name(d).is_some_and(|t| opts.is_leaf_exception(&t))
        } else {
            true
        }
    })
}

// =============================================================================
// Text trimming
// =============================================================================

/// What lies on one side of a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    /// Text or an inline element: whitespace on that side is significant.
    Inline,
    /// A block element, or the edge of a block parent.
    Block,
}

fn adjacency_of(sibling: Option<NodeRef>, parent: Option<NodeRef>, leading: bool) -> Adjacency {
    match sibling {
        Some(s) if s.is_element() => match dom::tag_name(&s) {
            Some(t) if TagKind::of(&t).is_inline() => Adjacency::Inline,
            _ => Adjacency::Block,
        },
        Some(_) => Adjacency::Inline,
        // Nothing before the text: its leading edge is always an edge
        None if leading => Adjacency::Block,
        // A missing next sibling at the edge of an inline parent is inline
        None => match parent.and_then(|p| dom::tag_name(&p)) {
            Some(t) if TagKind::of(&t).is_inline() => Adjacency::Inline,
            _ => Adjacency::Block,
        },
    }
}

fn significant_sibling<'a>(node: &NodeRef<'a>, forward: bool) -> Option<NodeRef<'a>> {
    let mut sibling = if forward { node.next_sibling() } else { node.prev_sibling() };
    while let Some(s) = sibling {
        if !s.is_comment() {
            return Some(s);
        }
        sibling = if forward { s.next_sibling() } else { s.prev_sibling() };
    }
    None
}

/// Leading and trailing adjacency of a text node.
#[must_use]
pub fn text_adjacency(node: &NodeRef) -> (Adjacency, Adjacency) {
    let parent = node.parent();
    (
        adjacency_of(significant_sibling(node, false), parent, true),
        adjacency_of(significant_sibling(node, true), parent, false),
    )
}

/// Trim whitespace on the sides of a text node that touch block structure.
///
/// Text inside preformatted elements is left alone. Returns the node now
/// holding the text, or `None` when trimming emptied it and it was removed.
pub fn trim_text_node<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    if !node.is_text() || dom::in_preformatted(node) {
        return Some(*node);
    }

    let (leading, trailing) = text_adjacency(node);
    let original = node.text();
    let mut trimmed: &str = &original;
    if leading == Adjacency::Block {
        trimmed = trimmed.trim_start_matches(is_boundary_space);
    }
    if trailing == Adjacency::Block {
        trimmed = trimmed.trim_end_matches(is_boundary_space);
    }

    if trimmed.is_empty() {
        dom::remove(node);
        return None;
    }
    if trimmed.len() == original.len() {
        return Some(*node);
    }
    Some(dom::replace_text(node, trimmed))
}
