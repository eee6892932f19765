//! Common test utilities for building proposals and diagram states.
use goryu::prelude::*;
use serde_json::{Value, json};

/// A shape record in the canonical envelope format.
#[allow(dead_code)]
pub fn shape_record(id: &str, name: &str) -> Value {
    json!({ "type": "element", "data": { "id": id, "name": name } })
}

/// A shape record with attribute names and an explicit position.
#[allow(dead_code)]
pub fn positioned_shape_record(id: &str, name: &str, attributes: &[&str], x: f64, y: f64) -> Value {
    let attributes: Vec<Value> = attributes
        .iter()
        .map(|a| json!({ "name": a, "type": "string" }))
        .collect();
    json!({
        "type": "element",
        "data": { "id": id, "name": name, "attributes": attributes, "position": { "x": x, "y": y } }
    })
}

#[allow(dead_code)]
pub fn connection_record(id: &str, source: &str, target: &str, kind: &str) -> Value {
    json!({
        "type": "relationship",
        "data": { "id": id, "source": source, "target": target, "relationshipType": kind }
    })
}

/// Wraps records in the `elements` envelope.
#[allow(dead_code)]
pub fn proposal(records: Vec<Value>) -> Value {
    json!({ "elements": records })
}

/// Two positioned classes joined by one association.
///
/// `order` (100, 100) --r1--> `customer` (350, 100)
#[allow(dead_code)]
pub fn create_order_state() -> DiagramState {
    DiagramState::new(
        vec![
            Shape::new("order", "Order")
                .with_position(100.0, 100.0)
                .with_attribute("total", "number"),
            Shape::new("customer", "Customer").with_position(350.0, 100.0),
        ],
        vec![Connection::new(
            "r1",
            "order",
            "customer",
            ConnectionKind::Association,
        )],
    )
}

/// Runs the default pipeline and unwraps a `Done` outcome.
#[allow(dead_code)]
pub fn run(current: &DiagramState, response: &Value) -> (DiagramState, ProcessingStats) {
    Pipeline::new()
        .process(current, response)
        .into_result()
        .expect("Pipeline rejected the proposal")
}

/// Snapped cell of a position on the default 50-unit snapping grid.
#[allow(dead_code)]
pub fn snapped(position: Position) -> (i64, i64) {
    (
        (position.x / 50.0).round() as i64,
        (position.y / 50.0).round() as i64,
    )
}

/// A messy response in the shape generators actually produce: mixed
/// envelopes, nested payloads, a sentinel label and a dangling connection.
#[allow(dead_code)]
pub const MESSY_RESPONSE_JSON: &str = r##"{
  "items": [
    { "elementType": "class", "element": { "data": { "id": "c1", "label": "Invoice", "classType": "Abstract Class" },
      "attributes": ["+number: string", "- total: number", 7], "methods": ["#finalize(force: bool): void"] } },
    { "type": "element", "data": { "id": "c2", "className": "Payment", "kind": "interface",
      "position": { "x": 400, "y": 300 } } },
    { "type": "element", "data": { "id": "c3", "name": "Unnamed" } },
    { "type": "element", "data": { "name": "NoId" } },
    { "type": "relationship", "data": { "id": "r1", "sourceId": "c1", "targetId": "c2", "type": "uses",
      "multiplicity": { "source": "1", "target": "0..*" } } },
    { "type": "relationship", "data": { "id": "r2", "from": "c1", "to": "c3", "relationshipType": "composition" } },
    { "type": "widget", "data": { "id": "w1" } }
  ]
}"##;
