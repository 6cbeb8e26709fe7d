//! Text-density model: rewards text, penalizes anchor text.

use crate::dom::{self, NodeRef};
use crate::features::FeatureTables;
use crate::options::ScoringWeights;

use super::ScoreMap;

/// Bias for a single element, or `None` when it holds no text.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bias(text_length: usize, anchor_length: usize, weights: &ScoringWeights) -> Option<f64> {
    if text_length == 0 {
        return None;
    }
    let raw = weights.text_weight * text_length as f64 - weights.anchor_weight * anchor_length as f64;
    Some(raw.min(weights.max_text_bias))
}

/// Apply the text-density bias to every element below `body`.
pub fn apply<'a>(body: &NodeRef<'a>, features: &FeatureTables, weights: &ScoringWeights, scores: &mut ScoreMap<'a>) {
    for element in dom::elements(body) {
        if let Some(bias) = bias(features.text_length(&element), features.anchor_length(&element), weights) {
            scores.add(&element, bias);
        }
    }
}
