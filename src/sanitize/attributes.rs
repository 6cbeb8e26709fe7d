//! Attribute whitelist stage.

use crate::dom::{self, Document};

use super::Context;

pub(super) fn filter_attributes(doc: &Document, ctx: &Context) -> usize {
    let root = dom::analysis_root(doc);
    let allowed = &ctx.options.allowed_attributes;
    let mut changes = 0;

    let mut elements = dom::elements(&root);
    if root.is_element() {
        elements.insert(0, root);
    }

    for element in elements {
        let Some(tag) = dom::tag_name(&element) else {
            continue;
        };
        let keep = allowed.get(&tag);
        for name in dom::attribute_names(&element) {
            if !keep.is_some_and(|names| names.contains(&name)) {
                element.remove_attr(&name);
                changes += 1;
            }
        }
    }

    changes
}
