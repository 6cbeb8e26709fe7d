//! Layout stages: single-item lists, single-column tables, leaves, stray
//! rules and body edges.

use crate::dom::{self, Document, NodeRef};
use crate::options::Options;
use crate::rewrite::{self, row_cells, table_rows};
use crate::tags::{is_list_tag, TagKind};

use super::Context;

/// Check if a list holds exactly one item and nothing else.
#[must_use]
pub fn is_single_item_list(list: &NodeRef) -> bool {
    let mut items = 0;
    for child in list.children() {
        if child.is_element() {
            let is_item = dom::tag_name(&child).is_some_and(|t| TagKind::of(&t) == TagKind::ListItem);
            if !is_item {
                return false;
            }
            items += 1;
        } else if !dom::is_insignificant(&child) {
            return false;
        }
    }
    items == 1
}

pub(super) fn unwrap_single_item_lists(doc: &Document) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    // Innermost first: unwrapping a nested list can make its parent qualify
    for list in dom::elements(&root).into_iter().rev() {
        if !dom::tag_name(&list).is_some_and(|t| is_list_tag(&t)) || !dom::is_attached(&list) {
            continue;
        }
        if is_single_item_list(&list) && rewrite::unwrap(&list) {
            changes += 1;
        }
    }

    changes
}

/// Check if the first `row_scan_limit` rows of a table hold at most one
/// non-leaf cell each. Empty spacer cells do not count.
#[must_use]
pub fn is_single_column_table(table: &NodeRef, row_scan_limit: usize, opts: &Options) -> bool {
    table_rows(table).iter().take(row_scan_limit).all(|row| {
        row_cells(row)
            .iter()
            .filter(|cell| !rewrite::is_leaf(cell, opts))
            .count()
            <= 1
    })
}

pub(super) fn unwrap_single_column_tables(doc: &Document, ctx: &Context) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    for table in dom::elements_by_tag(&root, "table").into_iter().rev() {
        if !dom::is_attached(&table) {
            continue;
        }
        if is_single_column_table(&table, ctx.options.row_scan_limit, ctx.options) && rewrite::unwrap(&table) {
            changes += 1;
        }
    }

    changes
}

pub(super) fn remove_leaves(doc: &Document, ctx: &Context) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    // Pre-order: an ancestor leaf goes first and takes its descendants along
    for element in dom::elements(&root) {
        if dom::is_attached(&element) && rewrite::is_leaf(&element, ctx.options) {
            dom::remove(&element);
            changes += 1;
        }
    }

    changes
}

/// Check if an `hr` separates nothing: it is the first or last meaningful
/// child, or another break follows it directly.
#[must_use]
pub fn is_stray_rule(hr: &NodeRef) -> bool {
    let Some(next) = dom::next_significant_sibling(hr) else {
        return true;
    };
    if dom::prev_significant_sibling(hr).is_none() {
        return true;
    }
    dom::has_tag(&next, "hr") || dom::has_tag(&next, "br")
}

pub(super) fn remove_stray_rules(doc: &Document) -> usize {
    let root = dom::analysis_root(doc);
    let mut changes = 0;

    for hr in dom::elements_by_tag(&root, "hr") {
        if dom::is_attached(&hr) && is_stray_rule(&hr) {
            dom::remove(&hr);
            changes += 1;
        }
    }

    changes
}

#[derive(Clone, Copy)]
enum Edge {
    Start,
    End,
}

impl Edge {
    fn child<'a>(self, parent: &NodeRef<'a>) -> Option<NodeRef<'a>> {
        match self {
            Edge::Start => parent.first_child(),
            Edge::End => parent.last_child(),
        }
    }

    fn trim(self, text: &str) -> &str {
        let space = |c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c');
        match self {
            Edge::Start => text.trim_start_matches(space),
            Edge::End => text.trim_end_matches(space),
        }
    }
}

/// Strip one edge of `body`; returns the number of nodes removed or trimmed.
fn trim_edge(body: &NodeRef, edge: Edge, ctx: &Context) -> usize {
    let mut changes = 0;

    while let Some(node) = edge.child(body) {
        if node.is_text() {
            let value = node.text();
            let trimmed = edge.trim(&value);
            if trimmed.is_empty() {
                dom::remove(&node);
                changes += 1;
                continue;
            }
            if trimmed.len() != value.len() {
                dom::replace_text(&node, trimmed);
                changes += 1;
            }
            break;
        }

        let removable = node.is_comment()
            || dom::has_tag(&node, "br")
            || dom::has_tag(&node, "hr")
            || (dom::has_tag(&node, "p") && rewrite::is_leaf(&node, ctx.options));
        if !removable {
            break;
        }
        dom::remove(&node);
        changes += 1;
    }

    changes
}

pub(super) fn trim_body_edges(doc: &Document, ctx: &Context) -> usize {
    let Some(body) = dom::body(doc) else {
        return 0;
    };
    trim_edge(&body, Edge::Start, ctx) + trim_edge(&body, Edge::End, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{body, elements_by_tag, parse, Selection};

    fn body_html(doc: &Document) -> String {
        Selection::from(body(doc).unwrap()).inner_html().to_string()
    }

    #[test]
    fn test_single_item_list_detection() {
        let doc = parse("<body><ul> <li>x</li> </ul><ul><li>a</li><li>b</li></ul><ol><li>x</li>tail</ol></body>");
        let lists = dom::elements(&body(&doc).unwrap())
            .into_iter()
            .filter(|n| dom::tag_name(n).is_some_and(|t| is_list_tag(&t)))
            .collect::<Vec<_>>();

        assert!(is_single_item_list(&lists[0]));
        assert!(!is_single_item_list(&lists[1]));
        assert!(!is_single_item_list(&lists[2]));
    }

    #[test]
    fn test_unwrap_single_item_lists() {
        let doc = parse("<body><p>A <ul><li>X</li></ul> B</p></body>");
        assert_eq!(unwrap_single_item_lists(&doc), 1);
        assert!(elements_by_tag(&body(&doc).unwrap(), "ul").is_empty());
    }

    #[test]
    fn test_single_column_table() {
        let doc = parse(
            "<body><table><tr><td>one</td></tr><tr><td>two</td></tr></table><table><tr><td>a</td><td>b</td></tr></table></body>",
        );
        let options = Options::default();
        let ctx = Context::new(&options).unwrap();

        assert_eq!(unwrap_single_column_tables(&doc, &ctx), 1);
        let body = body(&doc).unwrap();
        assert_eq!(elements_by_tag(&body, "table").len(), 1);
        assert!(body_html(&doc).starts_with("<p>one</p><p>two</p><table>"));
    }

    #[test]
    fn test_row_scan_limit() {
        let mut rows = "<tr><td>x</td></tr>".repeat(3);
        rows.push_str("<tr><td>a</td><td>b</td></tr>");
        let doc = parse(&format!("<body><table>{rows}</table></body>"));
        let table = elements_by_tag(&doc.root(), "table")[0];
        let options = Options::default();

        assert!(is_single_column_table(&table, 3, &options));
        assert!(!is_single_column_table(&table, 4, &options));
    }

    #[test]
    fn test_spacer_cells_do_not_count_as_columns() {
        let doc = parse(
            "<body><table><tr><td>one</td><td></td></tr><tr><td>two</td><td> </td></tr><tr><td>three</td><td></td></tr></table></body>",
        );
        let options = Options::default();
        let ctx = Context::new(&options).unwrap();

        assert_eq!(unwrap_single_column_tables(&doc, &ctx), 1);
        assert_eq!(body_html(&doc), "<p>one</p><p>two</p><p>three</p>");
    }

    #[test]
    fn test_image_cell_counts_as_a_column() {
        let doc = parse(r#"<body><table><tr><td>caption</td><td><img src="a.png"></td></tr></table></body>"#);
        let table = elements_by_tag(&doc.root(), "table")[0];

        assert!(!is_single_column_table(&table, 20, &Options::default()));
    }

    #[test]
    fn test_remove_leaves_shallowest_first() {
        let doc = parse(r#"<body><div><span> </span><b></b></div><p>text</p><p><img src="a.png"></p></body>"#);
        let options = Options::default();
        let ctx = Context::new(&options).unwrap();

        assert_eq!(remove_leaves(&doc, &ctx), 1);
        assert_eq!(body_html(&doc), r#"<p>text</p><p><img src="a.png"></p>"#);
    }

    #[test]
    fn test_remove_stray_rules() {
        let doc = parse("<body><hr><p>a</p><hr><hr><p>b</p><hr><br><p>c</p><hr></body>");
        assert_eq!(remove_stray_rules(&doc), 4);
        assert_eq!(body_html(&doc), "<p>a</p><hr><p>b</p><br><p>c</p>");
    }

    #[test]
    fn test_trim_body_edges() {
        let doc = parse("<body> <br><p> </p><hr>  Lead <p>x</p> tail <br> <p></p> </body>");
        let options = Options::default();
        let ctx = Context::new(&options).unwrap();

        trim_body_edges(&doc, &ctx);
        assert_eq!(body_html(&doc), "Lead <p>x</p> tail");
    }
}
