//! The merge and validation pipeline.
//!
//! [`Pipeline::process`] is a pure function from the current diagram and a raw
//! generator response to a [`ProcessingOutcome`]. It never blocks, never
//! retries and never touches the caller's state, so it is safe to call again
//! on redelivery of the same response.

mod outcome;

pub use outcome::{ProcessingOutcome, ProcessingStats, Stage};

use crate::config::{PipelineConfig, PlacementConfig};
use crate::dedup;
use crate::error::{ConfigError, FailureKind, Rejection, Warning};
use crate::integrity;
use crate::merge;
use crate::model::DiagramState;
use crate::placement::Placer;
use crate::proposal::Proposal;
use crate::sanitizer::Sanitizer;
use ahash::AHashSet;
use log::{debug, info, warn};
use serde_json::Value;
use std::time::Instant;

pub struct Pipeline {
    config: PipelineConfig,
}

pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.config.placement = placement;
        self
    }
    pub fn with_unnamed_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.config.unnamed_sentinel = sentinel.into();
        self
    }
    pub fn build(self) -> Result<Pipeline, ConfigError> {
        self.config.validate()?;
        Ok(Pipeline {
            config: self.config,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks the stage machine for one run and logs each transition.
struct StageTracker {
    stage: Stage,
}

impl StageTracker {
    fn start() -> Self {
        debug!(stage:% = Stage::Validating; "Entering stage");
        Self {
            stage: Stage::Validating,
        }
    }

    fn advance(&mut self, to: Stage) {
        debug_assert!(
            self.stage.can_advance_to(to),
            "illegal stage transition {} -> {}",
            self.stage,
            to
        );
        debug!(from:% = self.stage, to:% = to; "Entering stage");
        self.stage = to;
    }
}

impl Pipeline {
    /// A pipeline with the default configuration.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Parses raw response text, then processes it. Text that is not JSON is
    /// rejected as recoverable: a fresh response may well parse.
    pub fn process_json(&self, current: &DiagramState, raw: &str) -> ProcessingOutcome {
        match serde_json::from_str::<Value>(raw) {
            Ok(response) => self.process(current, &response),
            Err(err) => {
                let failure = FailureKind::from(err);
                warn!(error:% = failure; "Generator response rejected");
                ProcessingOutcome::Rejected(Rejection::from(failure))
            }
        }
    }

    /// Validates, cleans, deduplicates and merges `response` into a copy of
    /// `current`.
    pub fn process(&self, current: &DiagramState, response: &Value) -> ProcessingOutcome {
        let started = Instant::now();
        let mut tracker = StageTracker::start();
        info!(
            shapes = current.shapes.len(),
            connections = current.connections.len();
            "Processing proposal"
        );

        let proposal = match Proposal::parse(response) {
            Ok(proposal) => proposal,
            Err(err) => {
                tracker.advance(Stage::Rejected);
                let failure = FailureKind::Validation(err);
                warn!(error:% = failure; "Proposal rejected");
                return ProcessingOutcome::Rejected(Rejection::from(failure));
            }
        };

        if proposal.is_empty() {
            tracker.advance(Stage::Done);
            info!("Empty proposal, state unchanged");
            return ProcessingOutcome::Done {
                state: current.clone(),
                stats: ProcessingStats {
                    processing_time_ms: elapsed_ms(started),
                    ..Default::default()
                },
            };
        }

        let mut warnings: Vec<Warning> = Vec::new();

        tracker.advance(Stage::Cleaning);
        let batch = Sanitizer::new(&self.config.unnamed_sentinel)
            .with_max_coordinate(self.config.placement.max_coordinate)
            .sanitize_all(&proposal, &mut warnings);
        debug!(
            records = proposal.len(),
            shapes = batch.shapes.len(),
            connections = batch.connections.len();
            "Records sanitized"
        );

        tracker.advance(Stage::Deduplicating);
        let deduplicated = dedup::deduplicate(batch.shapes, batch.connections, &mut warnings);
        let duplicates_removed = deduplicated.removed();

        tracker.advance(Stage::Merging);
        let (merged, report) = merge::merge(current, deduplicated.shapes, deduplicated.connections);

        tracker.advance(Stage::CheckingReferences);
        let checked = integrity::enforce_references(merged, &mut warnings);

        tracker.advance(Stage::PlacingPositions);
        let (state, placement) = Placer::new(&self.config.placement).place(checked);
        debug!(placed = placement.placed, nudged = placement.nudged; "Positions assigned");

        let surviving: AHashSet<&str> = state.connections.iter().map(|c| c.id.as_str()).collect();
        let connections_added = report
            .new_connection_ids
            .iter()
            .filter(|id| surviving.contains(id.as_str()))
            .count();

        let stats = ProcessingStats {
            shapes_added: report.shapes_added,
            shapes_updated: report.shapes_updated,
            connections_added,
            duplicates_removed,
            warnings,
            processing_time_ms: elapsed_ms(started),
        };

        tracker.advance(Stage::Done);
        info!(
            shapes_added = stats.shapes_added,
            shapes_updated = stats.shapes_updated,
            connections_added = stats.connections_added,
            duplicates_removed = stats.duplicates_removed,
            warnings = stats.warnings.len();
            "Proposal merged"
        );

        ProcessingOutcome::Done { state, stats }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
