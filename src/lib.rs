//! # rs-boilerprune
//!
//! Boilerplate scoring, content-root pruning and structural sanitization
//! for parsed HTML trees.
//!
//! Given a parsed document, the library scores every element of the body
//! by how likely it is to be the primary content, keeps the best-scoring
//! element together with its ancestors and descendants, and then runs a
//! fixed pipeline of cleanup stages over what is left: frames, scripts and
//! hidden elements go, dead anchors and tracking pixels are filtered,
//! layout tables and lists are flattened, whitespace is normalized and
//! attributes are reduced to a whitelist.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_boilerprune::{filter_html, Options};
//!
//! let html = r#"<html><body>
//!   <nav><a href="/">Home</a> <a href="/about">About</a></nav>
//!   <article>
//!     <p>The first paragraph of the story, long enough to count.</p>
//!     <p>The second paragraph adds more prose to the article body.</p>
//!   </article>
//! </body></html>"#;
//!
//! let cleaned = filter_html(html, &Options::default())?;
//! assert!(cleaned.contains("first paragraph"));
//! assert!(!cleaned.contains("About"));
//! # Ok::<(), rs_boilerprune::Error>(())
//! ```
//!
//! ## Building blocks
//!
//! Each step is available on its own: [`features::extract_features`],
//! [`scoring::score`], [`prune::prune`], [`sanitize::run_pipeline`] and the
//! tree-rewrite primitives in [`rewrite`].

mod error;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query` nodes.
pub mod dom;

/// Tag categories and default vocabularies.
pub mod tags;

/// Per-element text and anchor-text lengths.
pub mod features;

/// Scoring models and content-root selection.
pub mod scoring;

/// Removal of everything unrelated to the content root.
pub mod prune;

/// Unwrap, coerce, leaf and text-trimming primitives.
pub mod rewrite;

/// The ordered sanitization stages.
pub mod sanitize;

/// URL utilities for href and src validation.
pub mod url_utils;

use tracing::debug;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::{Options, ScoringWeights};
pub use result::{FilterReport, StageReport};
pub use sanitize::Stage;

use dom::{Document, NodeRef};

/// Select the element most likely to hold the primary content.
///
/// Scoring only reads the tree. A document without a body yields the
/// document node itself.
///
/// # Errors
///
/// Returns [`Error::InvalidBaseUrl`] when `options.base_url` does not parse.
///
/// # Example
///
/// ```rust
/// use rs_boilerprune::{dom, select_content_root, Options};
///
/// let doc = dom::parse(r#"<body><aside>Links</aside><main id="m"><p>Text one.</p><p>Text two.</p></main></body>"#);
/// let root = select_content_root(&doc, &Options::default())?;
/// assert_eq!(dom::get_attribute(&root, "id").as_deref(), Some("m"));
/// # Ok::<(), rs_boilerprune::Error>(())
/// ```
pub fn select_content_root<'a>(doc: &'a Document, options: &Options) -> Result<NodeRef<'a>> {
    let base_url = options.parsed_base_url()?;

    let Some(body) = dom::body(doc) else {
        debug!("document has no body; using the document node");
        return Ok(doc.root());
    };

    let features = features::extract_features(&body, base_url.as_ref());
    Ok(scoring::select_root(&body, &features, &options.scoring))
}

/// Select the content root, prune around it and sanitize the result.
///
/// The document is modified in place.
///
/// # Errors
///
/// Returns [`Error::InvalidBaseUrl`] when `options.base_url` does not parse.
pub fn filter_document(doc: &Document, options: &Options) -> Result<FilterReport> {
    let root = select_content_root(doc, options)?;

    let pruned = match dom::body(doc) {
        Some(body) => prune::prune(&body, &root),
        None => 0,
    };
    let content_root = dom::tag_name(&root);

    let stages = sanitize::run_pipeline(doc, options)?;

    Ok(FilterReport {
        content_root,
        pruned,
        stages,
    })
}

/// Parse `html`, filter it and serialize the whole document back.
///
/// # Errors
///
/// Returns [`Error::InvalidBaseUrl`] when `options.base_url` does not parse.
///
/// # Example
///
/// ```rust
/// use rs_boilerprune::{filter_html, Options};
///
/// let html = r#"<body><div><p>Hello <a href="javascript:void(0)">there</a></p></div></body>"#;
/// let cleaned = filter_html(html, &Options::default())?;
/// assert!(cleaned.contains("<p>Hello there</p>"));
/// # Ok::<(), rs_boilerprune::Error>(())
/// ```
pub fn filter_html(html: &str, options: &Options) -> Result<String> {
    let doc = dom::parse(html);
    filter_document(&doc, options)?;
    Ok(doc.html().to_string())
}
