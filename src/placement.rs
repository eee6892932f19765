//! Two-phase greedy placement.
//!
//! 1. Every shape sitting on the origin sentinel gets the next free cell of a
//!    fixed grid, scanned row by row from the configured origin.
//! 2. Every shape, new or existing, is then checked against the ones before it
//!    on a coarser snapping grid and nudged right one grid step at a time until
//!    its snapped cell is unique.
//!
//! Shapes outside `max_coordinate` are placed as if they had no position, so
//! nudging always starts from a coordinate where one grid step moves the shape.
//!
//! The goal is "never exactly overlap", not a pleasant layout.

use crate::config::PlacementConfig;
use crate::model::{DiagramState, Position};
use ahash::AHashSet;

type Cell = (i64, i64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Shapes that arrived without a usable position.
    pub placed: usize,
    /// Shapes moved to resolve an overlap.
    pub nudged: usize,
}

/// Placement state for a single pipeline run. The occupied-cell set lives only
/// as long as the placer.
pub struct Placer<'c> {
    config: &'c PlacementConfig,
    occupied: AHashSet<Cell>,
    cursor: u64,
}

impl<'c> Placer<'c> {
    pub fn new(config: &'c PlacementConfig) -> Self {
        Self {
            config,
            occupied: AHashSet::new(),
            cursor: 0,
        }
    }

    pub fn place(mut self, state: DiagramState) -> (DiagramState, PlacementReport) {
        let DiagramState {
            mut shapes,
            connections,
        } = state;
        let mut report = PlacementReport::default();

        for shape in shapes.iter() {
            if !self.is_placed(shape.position) {
                continue;
            }
            let cell = self.grid_cell(shape.position);
            self.occupied.insert(cell);
        }
        for shape in shapes.iter_mut() {
            if self.is_placed(shape.position) {
                continue;
            }
            if !shape.position.is_unset() {
                log::trace!(id = shape.id, x = shape.position.x, y = shape.position.y; "Out-of-range position replaced");
            }
            shape.position = self.next_free_position();
            report.placed += 1;
        }

        let mut taken: AHashSet<Cell> = AHashSet::with_capacity(shapes.len());
        for shape in &mut shapes {
            let mut moved = false;
            while shape.position.is_unset() || !taken.insert(self.snapped_cell(shape.position)) {
                shape.position.x += self.config.grid_step_x;
                moved = true;
            }
            if moved {
                log::trace!(id = shape.id, x = shape.position.x; "Shape nudged");
                report.nudged += 1;
            }
        }

        (DiagramState::new(shapes, connections), report)
    }

    fn is_placed(&self, position: Position) -> bool {
        !position.is_unset() && position.is_within(self.config.max_coordinate)
    }

    fn grid_cell(&self, position: Position) -> Cell {
        (
            ((position.x - self.config.origin_x) / self.config.grid_step_x).round() as i64,
            ((position.y - self.config.origin_y) / self.config.grid_step_y).round() as i64,
        )
    }

    fn snapped_cell(&self, position: Position) -> Cell {
        (
            (position.x / self.config.snap_size).round() as i64,
            (position.y / self.config.snap_size).round() as i64,
        )
    }

    /// Scans grid cells in row-major order. Cells never become free again
    /// during a run, so the scan resumes where the previous one stopped.
    fn next_free_position(&mut self) -> Position {
        let columns = u64::from(self.config.max_columns.max(1));
        loop {
            let col = (self.cursor % columns) as i64;
            let row = (self.cursor / columns) as i64;
            self.cursor += 1;

            let position = Position::new(
                self.config.origin_x + col as f64 * self.config.grid_step_x,
                self.config.origin_y + row as f64 * self.config.grid_step_y,
            );
            if !position.is_unset() && self.occupied.insert((col, row)) {
                return position;
            }
        }
    }
}
