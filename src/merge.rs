//! Identifier-keyed merge of a deduplicated batch into the current diagram.
//!
//! A proposal whose identifier already exists replaces that element wholesale,
//! keeping its slot in the ordering; every other proposal is appended. Lookups
//! go through insertion-ordered maps, so the output order is deterministic and
//! the merge is linear in the combined input size.

use crate::model::{Connection, DiagramState, Shape};
use indexmap::IndexMap;
use indexmap::map::Entry;

/// What the merge did, before reference checking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    pub shapes_added: usize,
    pub shapes_updated: usize,
    pub connections_updated: usize,
    /// Identifiers of connections that did not exist before, in merge order.
    pub new_connection_ids: Vec<String>,
}

/// Merges `shapes` and `connections` over `current`, returning a fresh state.
///
/// A replacing shape without a real position inherits the position of the
/// shape it replaces, so re-sending an unpositioned shape does not move it.
pub fn merge(
    current: &DiagramState,
    shapes: Vec<Shape>,
    connections: Vec<Connection>,
) -> (DiagramState, MergeReport) {
    let mut report = MergeReport::default();

    let mut shape_map: IndexMap<String, Shape> = current
        .shapes
        .iter()
        .map(|s| (s.id.clone(), s.clone()))
        .collect();
    for mut shape in shapes {
        match shape_map.entry(shape.id.clone()) {
            Entry::Occupied(mut slot) => {
                if shape.position.is_unset() {
                    shape.position = slot.get().position;
                }
                slot.insert(shape);
                report.shapes_updated += 1;
            }
            Entry::Vacant(slot) => {
                slot.insert(shape);
                report.shapes_added += 1;
            }
        }
    }

    let mut connection_map: IndexMap<String, Connection> = current
        .connections
        .iter()
        .map(|c| (c.id.clone(), c.clone()))
        .collect();
    for connection in connections {
        match connection_map.entry(connection.id.clone()) {
            Entry::Occupied(mut slot) => {
                slot.insert(connection);
                report.connections_updated += 1;
            }
            Entry::Vacant(slot) => {
                report.new_connection_ids.push(connection.id.clone());
                slot.insert(connection);
            }
        }
    }

    let state = DiagramState::new(
        shape_map.into_values().collect(),
        connection_map.into_values().collect(),
    );
    (state, report)
}
