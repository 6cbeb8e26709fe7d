//! Attribute-heuristic model over `id` and `class` tokens.

use std::collections::HashMap;

use crate::dom::NodeRef;
use crate::features::FeatureTables;
use crate::options::ScoringWeights;
use crate::patterns::ATTRIBUTE_TOKEN_SEPARATOR;

use super::ScoreMap;

/// Default token vocabulary.
pub static DEFAULT_ATTRIBUTE_WEIGHTS: &[(&str, f64)] = &[
    // Content
    ("article", 50.0),
    ("content", 40.0),
    ("story", 40.0),
    ("entry", 30.0),
    ("post", 25.0),
    ("body", 20.0),
    ("main", 20.0),
    ("text", 15.0),
    ("blog", 10.0),
    // Boilerplate
    ("ad", -50.0),
    ("ads", -50.0),
    ("advert", -50.0),
    ("sponsor", -50.0),
    ("banner", -40.0),
    ("promo", -40.0),
    ("comment", -50.0),
    ("sidebar", -50.0),
    ("nav", -50.0),
    ("navbar", -50.0),
    ("navigation", -50.0),
    ("menu", -40.0),
    ("footer", -40.0),
    ("header", -25.0),
    ("masthead", -30.0),
    ("breadcrumb", -30.0),
    ("share", -30.0),
    ("social", -30.0),
    ("related", -30.0),
    ("recommended", -30.0),
    ("widget", -30.0),
    ("popup", -30.0),
    ("cookie", -30.0),
    ("newsletter", -30.0),
    ("subscribe", -30.0),
    ("copyright", -30.0),
];

/// Keys shorter than this must match a whole token.
const SUBSTRING_MATCH_MIN_LEN: usize = 4;

/// Split the `id` and `class` values of `node` into lower-case tokens.
#[must_use]
pub fn tokens(node: &NodeRef) -> Vec<String> {
    let mut raw = String::new();
    for name in ["id", "class"] {
        if let Some(value) = node.attr(name) {
            raw.push_str(&value);
            raw.push(' ');
        }
    }
    let raw = raw.to_lowercase();

    ATTRIBUTE_TOKEN_SEPARATOR
        .split(&raw)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn key_matches(key: &str, token: &str) -> bool {
    if key.len() >= SUBSTRING_MATCH_MIN_LEN {
        token.contains(key)
    } else {
        token == key
    }
}

/// Sum of the weights of every vocabulary key found among `tokens`.
///
/// Each key contributes once no matter how many tokens it matches.
#[must_use]
pub fn token_bias(tokens: &[String], vocabulary: &HashMap<String, f64>) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    let mut matched: Vec<f64> = vocabulary
        .iter()
        .filter(|(key, _)| tokens.iter().any(|t| key_matches(key, t)))
        .map(|(_, weight)| *weight)
        .collect();

    // Sum in a fixed order so the result never depends on map iteration
    matched.sort_by(f64::total_cmp);
    matched.iter().sum()
}

/// Apply the token bias to `body` and every element below it.
pub fn apply<'a>(_body: &NodeRef<'a>, _features: &FeatureTables, weights: &ScoringWeights, scores: &mut ScoreMap<'a>) {
    if weights.attribute_weights.is_empty() {
        return;
    }

    for element in scores.nodes() {
        if element.attr("id").is_none() && element.attr("class").is_none() {
            continue;
        }
        let bias = token_bias(&tokens(&element), &weights.attribute_weights);
        scores.add(&element, bias);
    }
}
