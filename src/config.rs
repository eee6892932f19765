//! Pipeline configuration.
//!
//! Every field has a default, so a config file only needs the settings it
//! changes. Values are checked by [`PipelineConfig::validate`] before a
//! [`Pipeline`](crate::pipeline::Pipeline) is built.

use crate::error::ConfigError;
use serde::Deserialize;

pub const DEFAULT_UNNAMED_SENTINEL: &str = "Unnamed";
pub const DEFAULT_MAX_COORDINATE: f64 = 1.0e6;

/// Top-level configuration for a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Grid and snapping settings for position placement.
    pub placement: PlacementConfig,

    /// Label generators use for "no name given". Shapes carrying it are rejected.
    pub unnamed_sentinel: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            placement: PlacementConfig::default(),
            unnamed_sentinel: DEFAULT_UNNAMED_SENTINEL.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unnamed_sentinel.trim().is_empty() {
            return Err(ConfigError::BlankSentinel);
        }
        self.placement.validate()
    }
}

/// Grid used to place shapes that arrive without a position.
///
/// Free cells are scanned left to right starting at `(origin_x, origin_y)`,
/// wrapping to the next row after `max_columns` cells. Overlap is judged on a
/// coarser grid of `snap_size`. Coordinates beyond `max_coordinate` in either
/// direction are treated as no position at all.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub grid_step_x: f64,
    pub grid_step_y: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub max_columns: u32,
    pub snap_size: f64,
    pub max_coordinate: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            grid_step_x: 250.0,
            grid_step_y: 200.0,
            origin_x: 100.0,
            origin_y: 100.0,
            max_columns: 5,
            snap_size: 50.0,
            max_coordinate: DEFAULT_MAX_COORDINATE,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("grid_step_x", self.grid_step_x),
            ("grid_step_y", self.grid_step_y),
            ("snap_size", self.snap_size),
            ("max_coordinate", self.max_coordinate),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        // Zero or negative origins are fine.
        for (field, value) in [("origin_x", self.origin_x), ("origin_y", self.origin_y)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if self.max_columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        Ok(())
    }
}
