//! Result types for a filtering run.
//!
//! The tree itself is mutated in place; these types only describe what
//! happened to it.

use serde::Serialize;

use crate::sanitize::Stage;

/// Changes made by one sanitization stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageReport {
    /// The stage that ran.
    pub stage: Stage,

    /// Nodes removed, unwrapped, rewritten or stripped by the stage.
    pub changes: usize,
}

/// Summary of a filtering run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// Tag name of the selected content root.
    ///
    /// `None` when the document had no body and the document node stood in.
    pub content_root: Option<String>,

    /// Nodes removed by pruning around the content root.
    pub pruned: usize,

    /// One entry per sanitization stage, in pipeline order.
    pub stages: Vec<StageReport>,
}

impl FilterReport {
    /// Changes recorded for `stage` (0 if it did not run).
    #[must_use]
    pub fn changes(&self, stage: Stage) -> usize {
        self.stages
            .iter()
            .find(|report| report.stage == stage)
            .map_or(0, |report| report.changes)
    }

    /// Changes across all stages, pruning excluded.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.stages.iter().map(|report| report.changes).sum()
    }
}
