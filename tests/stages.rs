//! Tests for the individual pipeline stages: dedup, merge, reference checks
//! and placement.
mod common;
use goryu::dedup::deduplicate;
use goryu::integrity::enforce_references;
use goryu::merge::merge;
use goryu::placement::{PlacementReport, Placer};
use goryu::prelude::*;

// ===================
// Duplicate removal
// ===================

#[test]
fn test_same_content_different_ids() {
    let shapes = vec![
        Shape::new("a", "Order").with_attribute("id", "string").with_attribute("total", "number"),
        // Attribute order and types do not matter for the signature.
        Shape::new("b", "Order").with_attribute("total", "int").with_attribute("id", "uuid"),
    ];
    let mut warnings = Vec::new();
    let result = deduplicate(shapes, Vec::new(), &mut warnings);

    assert_eq!(result.shapes.len(), 1);
    assert_eq!(result.shapes[0].id, "a");
    assert_eq!(result.removed(), 1);
    assert_eq!(
        warnings,
        vec![Warning::DuplicateShape {
            id: "b".to_string(),
            kept: "a".to_string()
        }]
    );
}

#[test]
fn test_same_label_different_attributes_are_distinct() {
    let shapes = vec![
        Shape::new("a", "Order").with_attribute("id", "string"),
        Shape::new("b", "Order").with_attribute("total", "number"),
    ];
    let result = deduplicate(shapes, Vec::new(), &mut Vec::new());
    assert_eq!(result.shapes.len(), 2);
    assert_eq!(result.removed(), 0);
}

#[test]
fn test_repeated_id_keeps_first() {
    let shapes = vec![Shape::new("a", "Order"), Shape::new("a", "Invoice")];
    let mut warnings = Vec::new();
    let result = deduplicate(shapes, Vec::new(), &mut warnings);
    assert_eq!(result.shapes.len(), 1);
    assert_eq!(result.shapes[0].label, "Order");
    assert_eq!(
        warnings,
        vec![Warning::RepeatedShapeId {
            id: "a".to_string()
        }]
    );
}

#[test]
fn test_repeated_id_with_same_content_reports_the_id() {
    let shapes = vec![Shape::new("a", "Order"), Shape::new("a", "Order")];
    let mut warnings = Vec::new();
    deduplicate(shapes, Vec::new(), &mut warnings);
    assert!(matches!(&warnings[..], [Warning::RepeatedShapeId { id }] if id == "a"));
    assert!(!warnings[0].to_string().contains("same content"));
}

#[test]
fn test_connections_keyed_by_endpoints_and_kind() {
    let connections = vec![
        Connection::new("r1", "a", "b", ConnectionKind::Association),
        Connection::new("r2", "a", "b", ConnectionKind::Association),
        Connection::new("r3", "a", "b", ConnectionKind::Composition),
        Connection::new("r4", "b", "a", ConnectionKind::Association),
    ];
    let mut warnings = Vec::new();
    let result = deduplicate(Vec::new(), connections, &mut warnings);
    let kept: Vec<_> = result.connections.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(kept, vec!["r1", "r3", "r4"]);
    assert_eq!(result.connections_removed, 1);
    assert!(matches!(&warnings[..], [Warning::DuplicateConnection { id, .. }] if id == "r2"));
}

#[test]
fn test_repeated_connection_id_is_reported_as_such() {
    let connections = vec![
        Connection::new("r1", "a", "b", ConnectionKind::Association),
        Connection::new("r1", "b", "c", ConnectionKind::Dependency),
    ];
    let mut warnings = Vec::new();
    let result = deduplicate(Vec::new(), connections, &mut warnings);
    assert_eq!(result.connections_removed, 1);
    assert_eq!(result.connections[0].target, "b");
    assert!(matches!(&warnings[..], [Warning::RepeatedConnectionId { id }] if id == "r1"));
}

// ===================
// Merge
// ===================

fn current() -> DiagramState {
    DiagramState::new(
        vec![
            Shape::new("a", "Order").with_position(100.0, 100.0),
            Shape::new("b", "Customer").with_position(350.0, 100.0),
        ],
        vec![Connection::new("r1", "a", "b", ConnectionKind::Association)],
    )
}

#[test]
fn test_replace_keeps_slot_and_appends_new() {
    let proposal = vec![
        Shape::new("c", "Invoice"),
        Shape::new("a", "PurchaseOrder").with_position(600.0, 300.0),
    ];
    let (state, report) = merge(&current(), proposal, Vec::new());

    let ids: Vec<_> = state.shapes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(state.shapes[0].label, "PurchaseOrder");
    assert_eq!(state.shapes[0].position.x, 600.0);
    assert_eq!(report.shapes_added, 1);
    assert_eq!(report.shapes_updated, 1);
}

#[test]
fn test_replacement_is_a_full_overwrite() {
    let base = DiagramState::new(
        vec![Shape::new("a", "Order").with_attribute("total", "number")],
        Vec::new(),
    );
    let (state, _) = merge(&base, vec![Shape::new("a", "Order")], Vec::new());
    assert!(state.shapes[0].attributes.is_empty());
}

#[test]
fn test_unpositioned_replacement_inherits_position() {
    let (state, _) = merge(&current(), vec![Shape::new("b", "Client")], Vec::new());
    let b = state.shape("b").unwrap();
    assert_eq!(b.label, "Client");
    assert_eq!(b.position.x, 350.0);
}

#[test]
fn test_connections_merge_by_id() {
    let proposal = vec![
        Connection::new("r1", "a", "b", ConnectionKind::Composition),
        Connection::new("r2", "b", "a", ConnectionKind::Dependency),
    ];
    let (state, report) = merge(&current(), Vec::new(), proposal);
    assert_eq!(state.connections.len(), 2);
    assert_eq!(state.connections[0].kind, ConnectionKind::Composition);
    assert_eq!(report.connections_updated, 1);
    assert_eq!(report.new_connection_ids, vec!["r2".to_string()]);
}

#[test]
fn test_merge_is_idempotent() {
    let shapes = vec![Shape::new("c", "Invoice"), Shape::new("a", "Order")];
    let connections = vec![Connection::new("r2", "c", "a", ConnectionKind::Association)];
    let (once, _) = merge(&current(), shapes.clone(), connections.clone());
    let (twice, report) = merge(&once, shapes, connections);
    assert_eq!(once, twice);
    assert_eq!(report.shapes_added, 0);
    assert!(report.new_connection_ids.is_empty());
}

#[test]
fn test_does_not_touch_current_state() {
    let base = current();
    let snapshot = base.clone();
    let _ = merge(&base, vec![Shape::new("a", "Changed")], Vec::new());
    assert_eq!(base, snapshot);
}

// ===================
// Reference integrity
// ===================

#[test]
fn test_orphans_are_dropped_with_warning() {
    let state = DiagramState::new(
        vec![Shape::new("a", "Order"), Shape::new("b", "Customer")],
        vec![
            Connection::new("ok", "a", "b", ConnectionKind::Association),
            Connection::new("bad_target", "a", "ghost", ConnectionKind::Association),
            Connection::new("bad_source", "ghost", "b", ConnectionKind::Dependency),
        ],
    );
    let mut warnings = Vec::new();
    let state = enforce_references(state, &mut warnings);

    assert_eq!(state.connections.len(), 1);
    assert_eq!(state.connections[0].id, "ok");
    assert_eq!(warnings.len(), 2);
    assert!(
        warnings
            .iter()
            .all(|w| w.to_string().starts_with("Orphaned connection removed"))
    );
}

#[test]
fn test_self_loop_is_valid() {
    let state = DiagramState::new(
        vec![Shape::new("a", "Node")],
        vec![Connection::new("r", "a", "a", ConnectionKind::Association)],
    );
    let mut warnings = Vec::new();
    let state = enforce_references(state, &mut warnings);
    assert_eq!(state.connections.len(), 1);
    assert!(warnings.is_empty());
}

// ===================
// Placement
// ===================

fn place(shapes: Vec<Shape>) -> (DiagramState, PlacementReport) {
    let config = PlacementConfig::default();
    Placer::new(&config).place(DiagramState::new(shapes, Vec::new()))
}

#[test]
fn test_unset_shapes_fill_the_grid_row_by_row() {
    let shapes = (0..7).map(|i| Shape::new(i.to_string(), format!("S{i}"))).collect();
    let (state, report) = place(shapes);

    assert_eq!(report.placed, 7);
    assert_eq!(report.nudged, 0);
    assert_eq!(state.shapes[0].position, Position::new(100.0, 100.0));
    assert_eq!(state.shapes[1].position, Position::new(350.0, 100.0));
    assert_eq!(state.shapes[4].position, Position::new(1100.0, 100.0));
    // Sixth shape wraps to the second row.
    assert_eq!(state.shapes[5].position, Position::new(100.0, 300.0));
}

#[test]
fn test_placement_skips_occupied_cells() {
    let shapes = vec![
        Shape::new("existing", "Existing").with_position(100.0, 100.0),
        Shape::new("new", "New"),
    ];
    let (state, _) = place(shapes);
    assert_eq!(state.shapes[0].position, Position::new(100.0, 100.0));
    assert_eq!(state.shapes[1].position, Position::new(350.0, 100.0));
}

#[test]
fn test_exact_overlap_is_nudged_right() {
    let shapes = vec![
        Shape::new("a", "A").with_position(400.0, 400.0),
        Shape::new("b", "B").with_position(410.0, 395.0),
        Shape::new("c", "C").with_position(400.0, 400.0),
    ];
    let (state, report) = place(shapes);
    assert_eq!(report.nudged, 2);
    assert_eq!(state.shapes[0].position, Position::new(400.0, 400.0));
    assert_eq!(state.shapes[1].position, Position::new(660.0, 395.0));
    assert_eq!(state.shapes[2].position, Position::new(900.0, 400.0));
}

#[test]
fn test_distinct_positions_are_left_alone() {
    let shapes = vec![
        Shape::new("a", "A").with_position(100.0, 100.0),
        Shape::new("b", "B").with_position(200.0, 100.0),
    ];
    let (state, report) = place(shapes.clone());
    assert_eq!(report, PlacementReport::default());
    assert_eq!(state.shapes, shapes);
}

#[test]
fn test_grid_starting_at_origin_never_places_on_the_sentinel() {
    let config = PlacementConfig {
        origin_x: 0.0,
        origin_y: 0.0,
        ..Default::default()
    };
    let (state, _) =
        Placer::new(&config).place(DiagramState::new(vec![Shape::new("a", "A")], Vec::new()));
    assert_eq!(state.shapes[0].position, Position::new(250.0, 0.0));
}

#[test]
fn test_far_away_shapes_are_placed_on_the_grid() {
    // Adding a grid step to 1e19 is a no-op, and 5e21 saturates the cell index.
    let shapes = vec![
        Shape::new("a", "A").with_position(1e19, 100.0),
        Shape::new("b", "B").with_position(1e19, 100.0),
        Shape::new("c", "C").with_position(5e21, 5e21),
        Shape::new("d", "D").with_position(-5e21, 100.0),
    ];
    let (state, report) = place(shapes);

    assert_eq!(report.placed, 4);
    assert_eq!(report.nudged, 0);
    assert_eq!(state.shapes[0].position, Position::new(100.0, 100.0));
    assert_eq!(state.shapes[1].position, Position::new(350.0, 100.0));
    assert_eq!(state.shapes[2].position, Position::new(600.0, 100.0));
    assert_eq!(state.shapes[3].position, Position::new(850.0, 100.0));
}

#[test]
fn test_far_away_shape_does_not_block_grid_cells() {
    let shapes = vec![
        Shape::new("far", "Far").with_position(1e19, 1e19),
        Shape::new("near", "Near").with_position(100.0, 100.0),
    ];
    let (state, report) = place(shapes);
    assert_eq!(report.placed, 1);
    assert_eq!(state.shape("near").unwrap().position, Position::new(100.0, 100.0));
    assert_eq!(state.shape("far").unwrap().position, Position::new(350.0, 100.0));
}

#[test]
fn test_placed_shapes_stay_put_on_a_second_pass() {
    let shapes = vec![
        Shape::new("a", "A").with_position(1e19, 0.5),
        Shape::new("b", "B").with_position(400.0, 400.0),
        Shape::new("c", "C").with_position(400.0, 400.0),
    ];
    let config = PlacementConfig::default();
    let (once, _) = Placer::new(&config).place(DiagramState::new(shapes, Vec::new()));
    let (twice, report) = Placer::new(&config).place(once.clone());
    assert_eq!(once, twice);
    assert_eq!(report, PlacementReport::default());
}
