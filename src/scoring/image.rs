//! Image-adjacency model.
//!
//! Captioned images sit inside the content they illustrate, so their
//! parent gets a small bias and their grandparent half of it.

use crate::dom::{self, NodeRef};
use crate::features::{visible_char_count, FeatureTables};
use crate::options::ScoringWeights;

use super::ScoreMap;

/// Check if a `figure` carries a non-empty `figcaption`.
#[must_use]
pub fn figure_has_caption(figure: &NodeRef) -> bool {
    figure
        .children()
        .into_iter()
        .any(|child| dom::has_tag(&child, "figcaption") && visible_char_count(&child.text()) > 0)
}

/// Check if an `img` carries a non-empty `alt` or `title`.
#[must_use]
pub fn img_has_caption(img: &NodeRef) -> bool {
    ["alt", "title"]
        .iter()
        .filter_map(|name| img.attr(name))
        .any(|value| visible_char_count(&value) > 0)
}

fn inside_figure(node: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(n) = current {
        if dom::has_tag(&n, "figure") {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Apply the caption bias around every captioned image below `body`.
pub fn apply<'a>(body: &NodeRef<'a>, _features: &FeatureTables, weights: &ScoringWeights, scores: &mut ScoreMap<'a>) {
    for element in dom::elements(body) {
        let captioned = match dom::tag_name(&element).as_deref() {
            Some("figure") => figure_has_caption(&element),
            // Images inside a figure are credited through the figure
            Some("img") => !inside_figure(&element) && img_has_caption(&element),
            _ => false,
        };
        if !captioned {
            continue;
        }

        let Some(parent) = element.parent() else {
            continue;
        };
        scores.add(&parent, weights.image_caption_bias);
        if let Some(grandparent) = parent.parent() {
            scores.add(&grandparent, weights.image_caption_bias / 2.0);
        }
    }
}
