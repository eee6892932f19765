//! Prelude module for convenient imports
//!
//! This module re-exports the types needed to run the pipeline and inspect its
//! results, so a caller can start with a single `use goryu::prelude::*;`.
//!
//! # Example
//!
//! ```rust,no_run
//! use goryu::prelude::*;
//!
//! # fn run_example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let current = DiagramState::from_json(&std::fs::read_to_string("path/to/state.json")?)?;
//! let raw = std::fs::read_to_string("path/to/response.json")?;
//!
//! let (state, stats) = Pipeline::new().process_json(&current, &raw).into_result()?;
//! println!("{stats}");
//! std::fs::write("path/to/state.json", state.to_json_pretty()?)?;
//! # Ok(())
//! # }
//! ```

// Pipeline
pub use crate::pipeline::{Pipeline, PipelineBuilder, ProcessingOutcome, ProcessingStats, Stage};

// Configuration
pub use crate::config::{PipelineConfig, PlacementConfig};

// Diagram model
pub use crate::model::{
    Attribute, Connection, ConnectionKind, DiagramState, Operation, Parameter, Position, Shape,
    ShapeKind, Visibility,
};

// Error types
pub use crate::error::{
    ConfigError, ErrorClass, FailureKind, Rejection, StructuralError, Warning, WarningCategory,
};
