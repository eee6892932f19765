use crate::model::ElementKind;
use serde::Serialize;
use thiserror::Error;

/// The proposal as a whole is unusable. Fatal: the pipeline rejects it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructuralError {
    #[error("Proposal is absent")]
    Absent,

    #[error("Proposal is not a collection (found {found})")]
    NotACollection { found: &'static str },

    #[error("Proposal has no element list (expected one of: {expected})")]
    MissingElementList { expected: String },

    #[error("Proposal field '{field}' is not a list (found {found})")]
    ElementListNotArray { field: &'static str, found: &'static str },
}

/// Non-fatal findings. Each one is surfaced to the caller as data, never thrown.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    #[error("Record {index}: {element} is missing required field '{field}' and was dropped")]
    MissingField {
        index: usize,
        element: ElementKind,
        field: &'static str,
    },

    #[error("Record {index}: shape '{id}' has an unusable label '{label}' and was dropped")]
    InvalidLabel {
        index: usize,
        id: String,
        label: String,
    },

    #[error("Record {index}: unrecognized record kind '{kind}', record dropped")]
    UnknownRecordKind { index: usize, kind: String },

    #[error("Record {index}: malformed record ({reason}), record dropped")]
    MalformedRecord { index: usize, reason: String },

    #[error("Shape '{id}': unrecognized kind '{kind}', treated as class")]
    UnknownShapeKind { id: String, kind: String },

    #[error("Connection '{id}': unrecognized relationship kind '{kind}', treated as association")]
    UnknownConnectionKind { id: String, kind: String },

    #[error("Shape '{id}': position ({x}, {y}) is out of range, placed automatically")]
    PositionOutOfRange { id: String, x: f64, y: f64 },

    #[error("Shape '{id}': skipped invalid {member} entry at position {position}")]
    InvalidMember {
        id: String,
        member: &'static str,
        position: usize,
    },

    #[error("Duplicate shape '{id}' removed (same content as '{kept}')")]
    DuplicateShape { id: String, kept: String },

    #[error("Duplicate connection '{id}' removed (same endpoints and kind as '{kept}')")]
    DuplicateConnection { id: String, kept: String },

    #[error("Duplicate shape '{id}' removed (identifier already used earlier in the proposal)")]
    RepeatedShapeId { id: String },

    #[error("Duplicate connection '{id}' removed (identifier already used earlier in the proposal)")]
    RepeatedConnectionId { id: String },

    #[error("Orphaned connection removed: '{id}' ({source_id} -> {target_id})")]
    OrphanedConnection {
        id: String,
        source_id: String,
        target_id: String,
    },
}

/// Broad grouping of warnings, matching the editor's per-category counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCategory {
    /// A single record was malformed or partially repaired.
    Element,
    /// A redundant proposal was dropped.
    Duplicate,
    /// A connection lost an endpoint.
    Reference,
}

impl Warning {
    pub fn category(&self) -> WarningCategory {
        match self {
            Warning::DuplicateShape { .. }
            | Warning::DuplicateConnection { .. }
            | Warning::RepeatedShapeId { .. }
            | Warning::RepeatedConnectionId { .. } => WarningCategory::Duplicate,
            Warning::OrphanedConnection { .. } => WarningCategory::Reference,
            _ => WarningCategory::Element,
        }
    }

    /// `true` if the warning means a whole record never made it into the state.
    pub fn dropped_record(&self) -> bool {
        matches!(
            self,
            Warning::MissingField { .. }
                | Warning::InvalidLabel { .. }
                | Warning::UnknownRecordKind { .. }
                | Warning::MalformedRecord { .. }
        )
    }
}

/// Whether retrying the same operation could succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorClass {
    /// Eligible for a user-visible retry prompt.
    Recoverable,
    /// Retrying with the same input yields the same failure.
    Terminal,
}

/// Failures seen by the caller around a pipeline invocation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FailureKind {
    #[error("Timed out waiting for the generator response")]
    Timeout,

    #[error("Generator response is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Invalid proposal: {0}")]
    Validation(#[from] StructuralError),
}

impl FailureKind {
    pub fn classification(&self) -> ErrorClass {
        match self {
            FailureKind::Timeout | FailureKind::MalformedJson(_) | FailureKind::Transport(_) => {
                ErrorClass::Recoverable
            }
            FailureKind::Validation(_) => ErrorClass::Terminal,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.classification() == ErrorClass::Recoverable
    }
}

impl From<serde_json::Error> for FailureKind {
    fn from(err: serde_json::Error) -> Self {
        FailureKind::MalformedJson(err.to_string())
    }
}

/// A definitive refusal to produce a new state.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("Proposal rejected: {}", .errors.join("; "))]
pub struct Rejection {
    pub errors: Vec<String>,
    pub class: ErrorClass,
}

impl Rejection {
    pub fn is_recoverable(&self) -> bool {
        self.class == ErrorClass::Recoverable
    }
}

impl From<FailureKind> for Rejection {
    fn from(failure: FailureKind) -> Self {
        Rejection {
            class: failure.classification(),
            errors: vec![failure.to_string()],
        }
    }
}

/// Invalid pipeline configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Placement setting '{field}' must be a positive, finite number (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("Placement setting '{field}' must be a finite number (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Placement setting 'max_columns' must be at least 1")]
    NoColumns,

    #[error("The unnamed-shape sentinel must not be blank")]
    BlankSentinel,
}
