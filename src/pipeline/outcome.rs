use crate::error::{Rejection, Warning, WarningCategory};
use crate::model::DiagramState;
use serde::{Serialize, Serializer};
use std::fmt;

/// Stages of a pipeline run.
///
/// ```text
/// Validating -> Cleaning -> Deduplicating -> Merging -> CheckingReferences -> PlacingPositions -> Done
///     \
///      -> Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Validating,
    Cleaning,
    Deduplicating,
    Merging,
    CheckingReferences,
    PlacingPositions,
    Done,
    Rejected,
}

impl Stage {
    /// The stage that follows on success, or `None` for terminal stages.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Validating => Some(Stage::Cleaning),
            Stage::Cleaning => Some(Stage::Deduplicating),
            Stage::Deduplicating => Some(Stage::Merging),
            Stage::Merging => Some(Stage::CheckingReferences),
            Stage::CheckingReferences => Some(Stage::PlacingPositions),
            Stage::PlacingPositions => Some(Stage::Done),
            Stage::Done | Stage::Rejected => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Rejected)
    }

    /// Only structural validation can reject a proposal.
    pub fn can_advance_to(self, to: Stage) -> bool {
        self.next() == Some(to) || (self == Stage::Validating && to.is_terminal())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::Cleaning => "cleaning",
            Stage::Deduplicating => "deduplicating",
            Stage::Merging => "merging",
            Stage::CheckingReferences => "checking references",
            Stage::PlacingPositions => "placing positions",
            Stage::Done => "done",
            Stage::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Counters and warnings for one successful run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStats {
    pub shapes_added: usize,
    pub shapes_updated: usize,
    pub connections_added: usize,
    pub duplicates_removed: usize,
    #[serde(serialize_with = "serialize_warnings")]
    pub warnings: Vec<Warning>,
    pub processing_time_ms: u64,
}

fn serialize_warnings<S: Serializer>(warnings: &[Warning], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(warnings.iter().map(ToString::to_string))
}

impl ProcessingStats {
    /// Human-readable warnings, in the order they were raised.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    pub fn warnings_in(&self, category: WarningCategory) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.category() == category)
            .count()
    }

    /// Records that never made it past sanitizing.
    pub fn records_dropped(&self) -> usize {
        self.warnings.iter().filter(|w| w.dropped_record()).count()
    }

    pub fn orphans_removed(&self) -> usize {
        self.warnings_in(WarningCategory::Reference)
    }

    /// `true` if the run changed nothing and had nothing to report.
    pub fn is_noop(&self) -> bool {
        self.shapes_added == 0
            && self.shapes_updated == 0
            && self.connections_added == 0
            && self.duplicates_removed == 0
            && self.warnings.is_empty()
    }
}

impl fmt::Display for ProcessingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} updated, {} connections added, {} duplicates removed, {} dropped, {} warnings ({} ms)",
            self.shapes_added,
            self.shapes_updated,
            self.connections_added,
            self.duplicates_removed,
            self.records_dropped() + self.orphans_removed(),
            self.warnings.len(),
            self.processing_time_ms
        )
    }
}

/// The result of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingOutcome {
    /// A new state for the caller to adopt or discard.
    Done {
        state: DiagramState,
        stats: ProcessingStats,
    },
    /// No state change; the proposal was unusable.
    Rejected(Rejection),
}

impl ProcessingOutcome {
    pub fn stage(&self) -> Stage {
        match self {
            ProcessingOutcome::Done { .. } => Stage::Done,
            ProcessingOutcome::Rejected(_) => Stage::Rejected,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ProcessingOutcome::Done { .. })
    }

    pub fn state(&self) -> Option<&DiagramState> {
        match self {
            ProcessingOutcome::Done { state, .. } => Some(state),
            ProcessingOutcome::Rejected(_) => None,
        }
    }

    pub fn stats(&self) -> Option<&ProcessingStats> {
        match self {
            ProcessingOutcome::Done { stats, .. } => Some(stats),
            ProcessingOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ProcessingOutcome::Done { .. } => None,
            ProcessingOutcome::Rejected(rejection) => Some(rejection),
        }
    }

    pub fn into_result(self) -> Result<(DiagramState, ProcessingStats), Rejection> {
        match self {
            ProcessingOutcome::Done { state, stats } => Ok((state, stats)),
            ProcessingOutcome::Rejected(rejection) => Err(rejection),
        }
    }
}
