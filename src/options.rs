//! Configuration options for scoring and sanitization.
//!
//! `Options` carries every tunable constant and vocabulary the filters use.
//! Nothing reads a mutable global: each stage receives the options it runs
//! with. All structs deserialize with missing fields falling back to the
//! defaults, so partial JSON tuning files are accepted.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::scoring::{attributes::DEFAULT_ATTRIBUTE_WEIGHTS, topology::DEFAULT_TAG_BIAS};
use crate::tags::{ALLOWED_ATTRIBUTES, BLACKLISTED_TAGS, LEAF_EXCEPTIONS};

/// Configuration options for a filtering run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_boilerprune::Options;
///
/// let options = Options {
///     base_url: Some("https://example.com/feed/item".to_string()),
///     row_scan_limit: 10,
///     ..Options::default()
/// };
/// assert_eq!(options.row_scan_limit, 10);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Options {
    /// URL the document was fetched from.
    ///
    /// Used to decide whether an `href` is resolvable. Relative references
    /// are accepted without a base.
    ///
    /// Default: `None`
    pub base_url: Option<String>,

    /// Number of rows inspected when deciding whether a table is a
    /// single-column layout table.
    ///
    /// Default: `20`
    pub row_scan_limit: usize,

    /// Images whose declared width and height are both at or below this
    /// many pixels are treated as tracking pixels and removed.
    ///
    /// Default: `2`
    pub min_image_dimension: u32,

    /// Elements removed together with their subtree.
    ///
    /// Default: [`BLACKLISTED_TAGS`]
    pub blacklisted_tags: HashSet<String>,

    /// Elements never removed as leaves, even when empty.
    ///
    /// Default: [`LEAF_EXCEPTIONS`]
    pub leaf_exceptions: HashSet<String>,

    /// Attributes kept per tag; every other attribute is stripped. Tags
    /// missing from the map keep no attributes.
    ///
    /// Default: [`ALLOWED_ATTRIBUTES`]
    pub allowed_attributes: HashMap<String, HashSet<String>>,

    /// Weights used by the scoring models.
    pub scoring: ScoringWeights,
}

impl Options {
    /// Parse `base_url`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] when the configured URL does not parse.
    pub fn parsed_base_url(&self) -> Result<Option<Url>> {
        self.base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|source| Error::InvalidBaseUrl {
                    url: raw.to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Check if `tag` should be removed outright.
    #[inline]
    #[must_use]
    pub fn is_blacklisted(&self, tag: &str) -> bool {
        self.blacklisted_tags.contains(tag)
    }

    /// Check if `tag` is exempt from leaf removal.
    #[inline]
    #[must_use]
    pub fn is_leaf_exception(&self, tag: &str) -> bool {
        self.leaf_exceptions.contains(tag)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: None,
            row_scan_limit: 20,
            min_image_dimension: 2,
            blacklisted_tags: BLACKLISTED_TAGS.iter().map(|t| (*t).to_string()).collect(),
            leaf_exceptions: LEAF_EXCEPTIONS.iter().map(|t| (*t).to_string()).collect(),
            allowed_attributes: ALLOWED_ATTRIBUTES
                .iter()
                .map(|(tag, attrs)| {
                    (
                        (*tag).to_string(),
                        attrs.iter().map(|a| (*a).to_string()).collect(),
                    )
                })
                .collect(),
            scoring: ScoringWeights::default(),
        }
    }
}

/// Weights for the scoring models.
///
/// The defaults are empirically tuned; treat them as starting points and
/// check changes against representative documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Score per non-whitespace character of text.
    ///
    /// Default: `0.25`
    pub text_weight: f64,

    /// Penalty per non-whitespace character of anchor text.
    ///
    /// Default: `0.7`
    pub anchor_weight: f64,

    /// Ceiling applied to the text-density bias.
    ///
    /// Default: `4000.0`
    pub max_text_bias: f64,

    /// Anchor-to-text ratio above which an element is link-dense.
    ///
    /// Default: `0.8`
    pub max_link_density: f64,

    /// Anchors with fewer non-whitespace characters count as short.
    ///
    /// Default: `10`
    pub short_link_length: usize,

    /// Share of short anchors above which an element looks like a menu.
    ///
    /// Default: `0.8`
    pub max_short_link_ratio: f64,

    /// The short-link test only applies to elements with less text than
    /// this; longer elements are judged on the anchor ratio alone.
    ///
    /// Default: `300`
    pub link_cluster_text_limit: usize,

    /// Amount subtracted from link-dense elements.
    ///
    /// Default: `100.0`
    pub link_density_penalty: f64,

    /// Bias added per content-bearing paragraph-like child, once an element
    /// has at least two of them.
    ///
    /// Default: `50.0`
    pub paragraph_bias: f64,

    /// Maximum number of paragraph children rewarded.
    ///
    /// Default: `10`
    pub max_paragraph_count: usize,

    /// Bias for the parent of a captioned image; the grandparent gets half.
    ///
    /// Default: `40.0`
    pub image_caption_bias: f64,

    /// Intrinsic per-tag bias.
    pub tag_bias: HashMap<String, f64>,

    /// Weights for `id`/`class` tokens.
    ///
    /// Keys of four or more characters match any token containing them;
    /// shorter keys must match a whole token.
    pub attribute_weights: HashMap<String, f64>,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            text_weight: 0.25,
            anchor_weight: 0.7,
            max_text_bias: 4000.0,
            max_link_density: 0.8,
            short_link_length: 10,
            max_short_link_ratio: 0.8,
            link_cluster_text_limit: 300,
            link_density_penalty: 100.0,
            paragraph_bias: 50.0,
            max_paragraph_count: 10,
            image_caption_bias: 40.0,
            tag_bias: DEFAULT_TAG_BIAS
                .iter()
                .map(|(tag, bias)| ((*tag).to_string(), *bias))
                .collect(),
            attribute_weights: DEFAULT_ATTRIBUTE_WEIGHTS
                .iter()
                .map(|(token, weight)| ((*token).to_string(), *weight))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_thresholds() {
        let opts = Options::default();

        assert!(opts.base_url.is_none());
        assert_eq!(opts.row_scan_limit, 20);
        assert_eq!(opts.min_image_dimension, 2);
        assert!(opts.is_blacklisted("script"));
        assert!(opts.is_blacklisted("style"));
        assert!(!opts.is_blacklisted("iframe"));
        assert!(opts.is_leaf_exception("img"));
        assert!(opts.is_leaf_exception("br"));
        assert!(!opts.is_leaf_exception("div"));

        let a = &opts.allowed_attributes["a"];
        assert!(a.contains("href"));
        assert!(!a.contains("onclick"));
    }

    #[test]
    fn test_default_scoring_weights() {
        let weights = ScoringWeights::default();

        assert!((weights.text_weight - 0.25).abs() < f64::EPSILON);
        assert!((weights.anchor_weight - 0.7).abs() < f64::EPSILON);
        assert!((weights.max_text_bias - 4000.0).abs() < f64::EPSILON);
        assert!(weights.tag_bias["article"] > 0.0);
        assert!(weights.tag_bias["nav"] < 0.0);
        assert!(weights.attribute_weights["comment"] < 0.0);
        assert!(weights.attribute_weights["content"] > 0.0);
    }

    #[test]
    fn test_parsed_base_url() {
        let opts = Options {
            base_url: Some("https://example.com/a/b.html".to_string()),
            ..Options::default()
        };
        let base = opts.parsed_base_url().unwrap().unwrap();
        assert_eq!(base.host_str(), Some("example.com"));

        assert!(Options::default().parsed_base_url().unwrap().is_none());
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        let opts = Options {
            base_url: Some("not a url".to_string()),
            ..Options::default()
        };
        assert!(matches!(opts.parsed_base_url(), Err(Error::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let opts: Options = serde_json::from_str(
            r#"{"row_scan_limit": 5, "scoring": {"max_text_bias": 1000.0}}"#,
        )
        .unwrap();

        assert_eq!(opts.row_scan_limit, 5);
        assert!((opts.scoring.max_text_bias - 1000.0).abs() < f64::EPSILON);
        assert!((opts.scoring.text_weight - 0.25).abs() < f64::EPSILON);
        assert!(opts.is_blacklisted("script"));
    }
}
