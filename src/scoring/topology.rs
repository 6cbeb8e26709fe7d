//! Hierarchical model: intrinsic tag bias and paragraph clustering.

use crate::dom::{self, NodeRef};
use crate::features::FeatureTables;
use crate::options::ScoringWeights;
use crate::tags::is_paragraph_tag;

use super::ScoreMap;

/// Default intrinsic bias per tag.
pub static DEFAULT_TAG_BIAS: &[(&str, f64)] = &[
    ("article", 200.0),
    ("main", 100.0),
    ("section", 50.0),
    ("blockquote", 10.0),
    ("li", -20.0),
    ("ul", -25.0),
    ("ol", -25.0),
    ("dl", -25.0),
    ("form", -50.0),
    ("header", -75.0),
    ("footer", -100.0),
    ("aside", -100.0),
    ("nav", -150.0),
];

/// Count the content-bearing paragraph-like children of `node`.
#[must_use]
pub fn paragraph_children(node: &NodeRef, features: &FeatureTables) -> usize {
    node.children()
        .into_iter()
        .filter(|child| {
            dom::tag_name(child).is_some_and(|t| is_paragraph_tag(&t)) && features.text_length(child) > 0
        })
        .count()
}

/// Apply tag and paragraph biases to `body` and every element below it.
#[allow(clippy::cast_precision_loss)]
pub fn apply<'a>(body: &NodeRef<'a>, features: &FeatureTables, weights: &ScoringWeights, scores: &mut ScoreMap<'a>) {
    for element in scores.nodes() {
        if element.id != body.id {
            if let Some(bias) = dom::tag_name(&element).and_then(|t| weights.tag_bias.get(&t).copied()) {
                scores.add(&element, bias);
            }
        }

        let paragraphs = paragraph_children(&element, features);
        if paragraphs >= 2 {
            let rewarded = paragraphs.min(weights.max_paragraph_count);
            scores.add(&element, weights.paragraph_bias * rewarded as f64);
        }
    }
}
