//! Sanitization pipeline.
//!
//! A fixed sequence of named stages applied to the pruned tree. Each stage
//! collects its targets before touching the tree and skips any target that
//! an earlier removal in the same stage already detached. Stages share no
//! state beyond the tree; running the pipeline twice is safe.
//!
//! Order matters. Leaves are only removed once every stage that can empty
//! an element has run.

mod attributes;
mod inline;
mod layout;
mod structure;
mod text;

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::dom::Document;
use crate::error::Result;
use crate::options::Options;
use crate::result::StageReport;

/// One named pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Remove comment nodes.
    StripComments,
    /// Replace a `frameset` body with one built from `noframes` content.
    ResolveFrameset,
    /// Replace `noscript` wrappers with their content.
    UnwrapNoscript,
    /// Remove blacklisted tags and inline-hidden elements.
    RemoveBlacklisted,
    /// Unwrap inline elements (other than `a`) that contain blocks.
    FixInlineNesting,
    /// Collapse runs of `br` to one.
    CollapseBreaks,
    /// Unwrap anchors with no usable target.
    FilterAnchors,
    /// Remove images with no source and tracking pixels.
    FilterImages,
    /// Unwrap or paragraph-ify `div`, `layer` and `ilayer`.
    UnwrapContainers,
    /// Unwrap captionless single-child `figure`s.
    UnwrapFigures,
    /// Replace hair spaces and similar with plain spaces.
    NormalizeSpaces,
    /// Condense whitespace runs and trim text at block edges.
    CondenseWhitespace,
    /// Unwrap lists holding a single item.
    UnwrapSingleItemLists,
    /// Unwrap tables with one cell per row.
    UnwrapSingleColumnTables,
    /// Remove elements with no content.
    RemoveLeaves,
    /// Remove `hr` elements that separate nothing.
    RemoveStrayRules,
    /// Trim breaks, rules, empty paragraphs and whitespace at the body edges.
    TrimBodyEdges,
    /// Strip attributes not on the per-tag whitelist.
    FilterAttributes,
}

impl Stage {
    /// Every stage in pipeline order.
    pub const ALL: [Stage; 18] = [
        Stage::StripComments,
        Stage::ResolveFrameset,
        Stage::UnwrapNoscript,
        Stage::RemoveBlacklisted,
        Stage::FixInlineNesting,
        Stage::CollapseBreaks,
        Stage::FilterAnchors,
        Stage::FilterImages,
        Stage::UnwrapContainers,
        Stage::UnwrapFigures,
        Stage::NormalizeSpaces,
        Stage::CondenseWhitespace,
        Stage::UnwrapSingleItemLists,
        Stage::UnwrapSingleColumnTables,
        Stage::RemoveLeaves,
        Stage::RemoveStrayRules,
        Stage::TrimBodyEdges,
        Stage::FilterAttributes,
    ];

    /// Stable snake_case name, as used in logs and serialized reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Stage::StripComments => "strip_comments",
            Stage::ResolveFrameset => "resolve_frameset",
            Stage::UnwrapNoscript => "unwrap_noscript",
            Stage::RemoveBlacklisted => "remove_blacklisted",
            Stage::FixInlineNesting => "fix_inline_nesting",
            Stage::CollapseBreaks => "collapse_breaks",
            Stage::FilterAnchors => "filter_anchors",
            Stage::FilterImages => "filter_images",
            Stage::UnwrapContainers => "unwrap_containers",
            Stage::UnwrapFigures => "unwrap_figures",
            Stage::NormalizeSpaces => "normalize_spaces",
            Stage::CondenseWhitespace => "condense_whitespace",
            Stage::UnwrapSingleItemLists => "unwrap_single_item_lists",
            Stage::UnwrapSingleColumnTables => "unwrap_single_column_tables",
            Stage::RemoveLeaves => "remove_leaves",
            Stage::RemoveStrayRules => "remove_stray_rules",
            Stage::TrimBodyEdges => "trim_body_edges",
            Stage::FilterAttributes => "filter_attributes",
        }
    }

    /// Run this stage alone, returning the number of changes made.
    ///
    /// # Errors
    ///
    /// Returns an error only when a rewrite primitive rejects its input.
    pub fn run(self, doc: &Document, ctx: &Context) -> Result<usize> {
        let changes = match self {
            Stage::StripComments => structure::strip_comments(doc),
            Stage::ResolveFrameset => structure::resolve_frameset(doc),
            Stage::UnwrapNoscript => structure::unwrap_noscript(doc),
            Stage::RemoveBlacklisted => structure::remove_blacklisted(doc, ctx),
            Stage::FixInlineNesting => structure::fix_inline_nesting(doc),
            Stage::CollapseBreaks => inline::collapse_breaks(doc),
            Stage::FilterAnchors => inline::filter_anchors(doc, ctx),
            Stage::FilterImages => inline::filter_images(doc, ctx),
            Stage::UnwrapContainers => inline::unwrap_containers(doc)?,
            Stage::UnwrapFigures => inline::unwrap_figures(doc),
            Stage::NormalizeSpaces => text::normalize_spaces(doc),
            Stage::CondenseWhitespace => text::condense_whitespace(doc),
            Stage::UnwrapSingleItemLists => layout::unwrap_single_item_lists(doc),
            Stage::UnwrapSingleColumnTables => layout::unwrap_single_column_tables(doc, ctx),
            Stage::RemoveLeaves => layout::remove_leaves(doc, ctx),
            Stage::RemoveStrayRules => layout::remove_stray_rules(doc),
            Stage::TrimBodyEdges => layout::trim_body_edges(doc, ctx),
            Stage::FilterAttributes => attributes::filter_attributes(doc, ctx),
        };
        Ok(changes)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only inputs shared by every stage of one run.
#[derive(Debug)]
pub struct Context<'o> {
    /// Options the run was started with.
    pub options: &'o Options,
    /// Parsed `options.base_url`.
    pub base_url: Option<Url>,
}

impl<'o> Context<'o> {
    /// Build a context, parsing the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`](crate::Error::InvalidBaseUrl) when
    /// the base URL does not parse.
    pub fn new(options: &'o Options) -> Result<Self> {
        Ok(Self {
            options,
            base_url: options.parsed_base_url()?,
        })
    }
}

/// Run every stage once, in order.
///
/// # Errors
///
/// Returns an error for an unparsable base URL, or when a stage fails.
pub fn run_pipeline(doc: &Document, options: &Options) -> Result<Vec<StageReport>> {
    let ctx = Context::new(options)?;
    let mut reports = Vec::with_capacity(Stage::ALL.len());

    for stage in Stage::ALL {
        let changes = stage.run(doc, &ctx)?;
        debug!(stage = stage.name(), changes, "sanitization stage finished");
        reports.push(StageReport { stage, changes });
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{body, parse, Selection};

    fn sanitize(html: &str) -> String {
        let doc = parse(html);
        run_pipeline(&doc, &Options::default()).unwrap();
        Selection::from(body(&doc).unwrap()).inner_html().to_string()
    }

    #[test]
    fn test_stage_names_are_unique() {
        let mut names: Vec<&str> = Stage::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Stage::ALL.len());
    }

    #[test]
    fn test_pipeline_reports_every_stage_in_order() {
        let doc = parse("<body><p>x</p></body>");
        let reports = run_pipeline(&doc, &Options::default()).unwrap();

        let stages: Vec<Stage> = reports.iter().map(|r| r.stage).collect();
        assert_eq!(stages, Stage::ALL.to_vec());
    }

    #[test]
    fn test_pipeline_rejects_bad_base_url() {
        let doc = parse("<body><p>x</p></body>");
        let options = Options {
            base_url: Some("::not a url::".to_string()),
            ..Options::default()
        };
        assert!(run_pipeline(&doc, &options).is_err());
    }

    #[test]
    fn test_pipeline_cleans_typical_markup() {
        let html = r#"<body>
            <!-- tracking -->
            <div class="wrapper" onclick="go()">
                <div id="x">Some   <b>bold</b>
                text</div>
                <script>track()</script>
                <p style="display:none">hidden</p>
                <a href="javascript:void(0)">click</a>
            </div>
        </body>"#;

        assert_eq!(sanitize(html), "<p>Some <b>bold</b> text</p>click");
    }

    #[test]
    fn test_pipeline_is_idempotent_on_clean_markup() {
        let once = sanitize("<body><p>One <a href=\"/a\">link</a>.</p><p>Two</p></body>");
        let twice = sanitize(&format!("<body>{once}</body>"));
        assert_eq!(once, twice);
    }
}
