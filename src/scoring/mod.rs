//! Content-root scoring.
//!
//! Every element of the body subtree is registered in a [`ScoreMap`] in
//! document order, then each model adds its bias. Models never read one
//! another's contributions, so the order they run in does not change the
//! final scores.
//!
//! The element with the highest score wins; ties go to the element that
//! comes first in document order.

pub mod attributes;
pub mod image;
pub mod link_density;
pub mod text_density;
pub mod topology;

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::dom::{self, NodeId, NodeRef};
use crate::features::FeatureTables;
use crate::options::ScoringWeights;

/// A scoring model: reads the features, writes biases into the map.
pub type Model = for<'a> fn(&NodeRef<'a>, &FeatureTables, &ScoringWeights, &mut ScoreMap<'a>);

/// Models in the order they are applied.
pub const MODELS: &[(&str, Model)] = &[
    ("text_density", text_density::apply),
    ("link_density", link_density::apply),
    ("topology", topology::apply),
    ("image", image::apply),
    ("attributes", attributes::apply),
];

/// Scores keyed by element, iterated in registration order.
#[derive(Debug, Default)]
pub struct ScoreMap<'a> {
    entries: Vec<(NodeRef<'a>, f64)>,
    index: HashMap<NodeId, usize>,
}

impl<'a> ScoreMap<'a> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register `node` with a score of zero. Registering twice keeps the
    /// first position and score.
    pub fn register(&mut self, node: NodeRef<'a>) {
        if self.index.contains_key(&node.id) {
            return;
        }
        self.index.insert(node.id, self.entries.len());
        self.entries.push((node, 0.0));
    }

    /// Add `bias` to a registered node.
    ///
    /// Zero and non-finite biases are dropped, as are nodes outside the
    /// scored subtree.
    pub fn add(&mut self, node: &NodeRef<'a>, bias: f64) {
        if bias == 0.0 || !bias.is_finite() {
            return;
        }
        if let Some(&slot) = self.index.get(&node.id) {
            self.entries[slot].1 += bias;
        }
    }

    /// Current score of `node`, if registered.
    #[must_use]
    pub fn get(&self, node: &NodeRef) -> Option<f64> {
        self.index.get(&node.id).map(|&slot| self.entries[slot].1)
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered nodes and their scores in document order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeRef<'a>, f64)> + '_ {
        self.entries.iter().map(|(node, score)| (*node, *score))
    }

    /// Registered nodes in document order.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeRef<'a>> {
        self.entries.iter().map(|(node, _)| *node).collect()
    }

    /// Highest-scoring node. A later node only takes over on a strictly
    /// greater score.
    #[must_use]
    pub fn best(&self) -> Option<(NodeRef<'a>, f64)> {
        let mut best: Option<(NodeRef<'a>, f64)> = None;
        for &(node, score) in &self.entries {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((node, score)),
            }
        }
        best
    }
}

/// Register `body` and all its element descendants, then run every model.
#[must_use]
pub fn score<'a>(body: &NodeRef<'a>, features: &FeatureTables, weights: &ScoringWeights) -> ScoreMap<'a> {
    let mut scores = ScoreMap::new();
    scores.register(*body);
    for element in dom::elements(body) {
        scores.register(element);
    }

    for (name, model) in MODELS {
        model(body, features, weights, &mut scores);
        trace!(model = name, "scoring model applied");
    }

    scores
}

/// Pick the content root below (or at) `body`.
///
/// Falls back to `body` when nothing scores.
#[must_use]
pub fn select_root<'a>(body: &NodeRef<'a>, features: &FeatureTables, weights: &ScoringWeights) -> NodeRef<'a> {
    let scores = score(body, features, weights);
    match scores.best() {
        Some((root, top)) => {
            debug!(
                tag = dom::tag_name(&root).unwrap_or_default(),
                score = top,
                candidates = scores.len(),
                "content root selected"
            );
            root
        }
        None => *body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{body, elements_by_tag, get_attribute, parse};
    use crate::features::extract_features;

    fn root_of(html: &str) -> Option<String> {
        let doc = parse(html);
        let body = body(&doc).unwrap();
        let features = extract_features(&body, None);
        let root = select_root(&body, &features, &ScoringWeights::default());
        get_attribute(&root, "id")
    }

    #[test]
    fn test_add_ignores_unregistered_and_non_finite() {
        let doc = parse("<body><div>x</div><p>y</p></body>");
        let body = body(&doc).unwrap();
        let div = elements_by_tag(&body, "div")[0];
        let p = elements_by_tag(&body, "p")[0];

        let mut scores = ScoreMap::new();
        scores.register(div);
        scores.add(&div, 5.0);
        scores.add(&div, f64::NAN);
        scores.add(&div, f64::INFINITY);
        scores.add(&p, 10.0);

        assert_eq!(scores.get(&div), Some(5.0));
        assert_eq!(scores.get(&p), None);
    }

    #[test]
    fn test_best_keeps_first_on_tie() {
        let doc = parse("<body><div>x</div><p>y</p></body>");
        let body = body(&doc).unwrap();
        let div = elements_by_tag(&body, "div")[0];
        let p = elements_by_tag(&body, "p")[0];

        let mut scores = ScoreMap::new();
        scores.register(div);
        scores.register(p);
        scores.add(&div, 3.0);
        scores.add(&p, 3.0);

        assert_eq!(scores.best().unwrap().0.id, div.id);

        scores.add(&p, 0.5);
        assert_eq!(scores.best().unwrap().0.id, p.id);
    }

    #[test]
    fn test_empty_map_has_no_best() {
        assert!(ScoreMap::new().best().is_none());
    }

    #[test]
    fn test_registration_is_document_order() {
        let doc = parse("<body><div><p>a</p></div><span>b</span></body>");
        let body = body(&doc).unwrap();
        let features = extract_features(&body, None);
        let scores = score(&body, &features, &ScoringWeights::default());

        let tags: Vec<String> = scores
            .nodes()
            .iter()
            .filter_map(dom::tag_name)
            .collect();
        assert_eq!(tags, vec!["body", "div", "p", "span"]);
    }

    #[test]
    fn test_identical_twins_pick_first() {
        let root = root_of(r#"<body><div id="a"><p>same</p></div><div id="b"><p>same</p></div></body>"#);
        assert_eq!(root.as_deref(), Some("a"));
    }

    #[test]
    fn test_article_beats_navigation() {
        let html = r#"<body>
            <nav id="menu"><a href="/1">Home</a> <a href="/2">News</a> <a href="/3">About</a></nav>
            <article id="story">
                <p>The first paragraph of the story carries enough prose to matter for scoring.</p>
                <p>The second paragraph continues the story with more sentences of real text.</p>
                <p>A third paragraph closes the story and mentions a <a href="/ref">source</a>.</p>
            </article>
            <div class="comments"><p>Nice post!</p></div>
        </body>"#;
        assert_eq!(root_of(html).as_deref(), Some("story"));
    }

    #[test]
    fn test_empty_body_selects_body() {
        let doc = parse("<html><body></body></html>");
        let body = body(&doc).unwrap();
        let features = extract_features(&body, None);
        let root = select_root(&body, &features, &ScoringWeights::default());
        assert_eq!(root.id, body.id);
    }
}
