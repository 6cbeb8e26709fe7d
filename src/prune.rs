//! Content-root pruning.
//!
//! Everything in the body that is neither the content root, one of its
//! ancestors, nor one of its descendants is removed. The work list is the
//! set of siblings of each node on the path from the root up to the body,
//! collected before anything is detached.

use tracing::{debug, warn};

use crate::dom::{self, NodeRef};

/// Siblings of every node on the chain from `root` up to (not including)
/// `body`, in document order per level, innermost level first.
#[must_use]
pub fn off_path_nodes<'a>(body: &NodeRef<'a>, root: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut queue = Vec::new();

    let mut current = *root;
    while current.id != body.id {
        let Some(parent) = current.parent() else {
            break;
        };
        queue.extend(
            parent
                .children()
                .into_iter()
                .filter(|sibling| sibling.id != current.id),
        );
        current = parent;
    }

    queue
}

/// Remove everything in `body` outside the path to and subtree of `root`.
///
/// Returns the number of nodes detached. A root equal to `body`, or one
/// lying outside it, leaves the tree untouched.
pub fn prune(body: &NodeRef, root: &NodeRef) -> usize {
    if root.id == body.id {
        return 0;
    }
    if !dom::contains(body, root) {
        warn!("content root lies outside the body; nothing pruned");
        return 0;
    }

    let queue = off_path_nodes(body, root);
    let mut removed = 0;
    for node in queue {
        if !dom::is_attached(&node) {
            continue;
        }
        dom::remove(&node);
        removed += 1;
    }

    debug!(removed, "pruned nodes outside the content root");
    removed
}
