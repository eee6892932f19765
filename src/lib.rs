//! # Goryu - Diagram Proposal Merge Pipeline
//!
//! **Goryu** takes a raw, loosely structured proposal from an untrusted generator
//! (typically a language model asked to "add classes for an order system") and
//! merges it into a class diagram without ever corrupting that diagram. The
//! proposal is treated as hostile input: fields can be missing, misnamed,
//! duplicated or pointing at things that do not exist.
//!
//! ## Core Workflow
//!
//! [`Pipeline::process`](pipeline::Pipeline::process) is a pure function from the
//! current [`DiagramState`](model::DiagramState) and a JSON response to a
//! [`ProcessingOutcome`](pipeline::ProcessingOutcome). A run moves through these stages:
//!
//! 1.  **Validating**: The response must carry an element list. Anything else is rejected.
//! 2.  **Cleaning**: Each record is sanitized into a typed shape or connection. Records that
//!     cannot be made valid are dropped with a warning; no values are invented.
//! 3.  **Deduplicating**: Repeated identifiers and repeated content within the batch are removed.
//! 4.  **Merging**: Proposals replace existing elements with the same identifier or are appended.
//! 5.  **Checking references**: Connections to shapes that do not exist are dropped.
//! 6.  **Placing positions**: Shapes without a position get a grid cell; overlaps are nudged apart.
//!
//! The caller's state is never modified. A rejected proposal leaves nothing to undo.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use goryu::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let current = DiagramState::default();
//!     let response = json!({
//!         "elements": [
//!             { "type": "element", "data": { "id": "a", "name": "Order" } },
//!             { "type": "element", "data": { "id": "b", "name": "Customer" } },
//!             { "type": "relationship",
//!               "data": { "id": "r1", "source": "b", "target": "a", "relationshipType": "association" } }
//!         ]
//!     });
//!
//!     let pipeline = Pipeline::builder().with_unnamed_sentinel("Unnamed").build()?;
//!     match pipeline.process(&current, &response) {
//!         ProcessingOutcome::Done { state, stats } => {
//!             println!("{stats}");
//!             for warning in &stats.warnings {
//!                 println!("  warning: {warning}");
//!             }
//!             println!("{}", state.to_json_pretty()?);
//!         }
//!         ProcessingOutcome::Rejected(rejection) => {
//!             println!("rejected ({:?}): {:?}", rejection.class, rejection.errors);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dedup;
pub mod error;
pub mod integrity;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod placement;
pub mod prelude;
pub mod proposal;
pub mod sanitizer;
