//! Link-density model.
//!
//! Penalizes elements that are mostly hyperlinks, or short elements whose
//! links are nearly all short: menus, tag clouds, pagers.

use std::collections::HashMap;

use crate::dom::{self, NodeId, NodeRef};
use crate::features::FeatureTables;
use crate::options::ScoringWeights;

use super::ScoreMap;

/// Non-empty and short link counts below an element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkCounts {
    pub links: usize,
    pub short_links: usize,
}

/// Count followable, non-empty links per element, ancestors included.
///
/// An anchor counts when the feature tables gave it anchor text: that
/// already excludes `javascript:` and unresolvable references.
#[must_use]
pub fn count_links(body: &NodeRef, features: &FeatureTables, weights: &ScoringWeights) -> HashMap<NodeId, LinkCounts> {
    let mut counts: HashMap<NodeId, LinkCounts> = HashMap::new();

    for anchor in dom::elements_by_tag(body, "a") {
        let length = features.anchor_length(&anchor);
        if length == 0 {
            continue;
        }
        let short = length < weights.short_link_length;

        let mut current = Some(anchor);
        while let Some(node) = current {
            if node.id == body.id {
                break;
            }
            let entry = counts.entry(node.id).or_default();
            entry.links += 1;
            if short {
                entry.short_links += 1;
            }
            current = node.parent();
        }
    }

    counts
}

/// Check whether an element reads as a link cluster.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn is_link_dense(text_length: usize, anchor_length: usize, counts: LinkCounts, weights: &ScoringWeights) -> bool {
    if text_length == 0 || counts.links == 0 {
        return false;
    }

    // Link text > 80% of total text
    if anchor_length as f64 > text_length as f64 * weights.max_link_density {
        return true;
    }

    // More than 80% of links are short, typical of navigation
    text_length < weights.link_cluster_text_limit
        && counts.links > 1
        && counts.short_links as f64 / counts.links as f64 > weights.max_short_link_ratio
}

/// Apply the link-density penalty to every element below `body`.
pub fn apply<'a>(body: &NodeRef<'a>, features: &FeatureTables, weights: &ScoringWeights, scores: &mut ScoreMap<'a>) {
    let counts = count_links(body, features, weights);
    if counts.is_empty() {
        return;
    }

    for element in dom::elements(body) {
        let Some(&element_counts) = counts.get(&element.id) else {
            continue;
        };
        if is_link_dense(
            features.text_length(&element),
            features.anchor_length(&element),
            element_counts,
            weights,
        ) {
            scores.add(&element, -weights.link_density_penalty);
        }
    }
}
