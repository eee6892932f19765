//! Extraction rules for generator payloads.
//!
//! Different generator versions put the same logical field in different places:
//! flat on the payload, wrapped one level under `data`, or under a legacy name.
//! Each logical field gets a [`FieldRule`]: an ordered list of JSON pointers
//! tried in priority order. The first location holding a non-null value wins,
//! even if a later location also holds one.

use serde_json::Value;

/// An ordered set of locations a single logical field may live at.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    field: &'static str,
    pointers: &'static [&'static str],
}

impl FieldRule {
    pub const fn new(field: &'static str, pointers: &'static [&'static str]) -> Self {
        Self { field, pointers }
    }

    /// The logical name reported in warnings.
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn pointers(&self) -> &'static [&'static str] {
        self.pointers
    }

    /// Returns the first non-null value found, in precedence order.
    pub fn extract<'a>(&self, payload: &'a Value) -> Option<&'a Value> {
        self.pointers
            .iter()
            .filter_map(|pointer| payload.pointer(pointer))
            .find(|value| !value.is_null())
    }

    /// Extracts a scalar as text. Numbers are accepted because generators
    /// regularly emit numeric identifiers; other types count as absent.
    pub fn extract_text(&self, payload: &Value) -> Option<String> {
        match self.extract(payload)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Like [`extract_text`](Self::extract_text), but blank strings count as absent.
    pub fn extract_non_blank(&self, payload: &Value) -> Option<String> {
        self.extract_text(payload)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Extracts a finite number. Numeric strings are accepted.
    pub fn extract_number(&self, payload: &Value) -> Option<f64> {
        let number = match self.extract(payload)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        number.is_finite().then_some(number)
    }

    /// Extracts a flag. `"true"`/`"false"` strings are accepted.
    pub fn extract_bool(&self, payload: &Value) -> Option<bool> {
        match self.extract(payload)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.trim().parse::<bool>().ok(),
            _ => None,
        }
    }

    pub fn extract_array<'a>(&self, payload: &'a Value) -> Option<&'a Vec<Value>> {
        self.extract(payload)?.as_array()
    }
}

// --- Proposal envelope ---

pub const ELEMENT_LIST: FieldRule = FieldRule::new("elements", &["/elements", "/items"]);
pub const RECORD_KIND: FieldRule = FieldRule::new("type", &["/type", "/elementType"]);
pub const RECORD_PAYLOAD: FieldRule = FieldRule::new("data", &["/data", "/element"]);

// --- Shapes ---

pub const SHAPE_ID: FieldRule = FieldRule::new(
    "id",
    &["/id", "/data/id", "/elementId", "/data/elementId"],
);
pub const SHAPE_LABEL: FieldRule = FieldRule::new(
    "name",
    &[
        "/name",
        "/label",
        "/data/name",
        "/data/label",
        "/className",
        "/data/className",
    ],
);
pub const SHAPE_KIND: FieldRule = FieldRule::new(
    "kind",
    &[
        "/classType",
        "/kind",
        "/data/classType",
        "/data/kind",
        "/type",
        "/data/type",
    ],
);
pub const SHAPE_ABSTRACT: FieldRule = FieldRule::new(
    "isAbstract",
    &[
        "/isAbstract",
        "/abstract",
        "/data/isAbstract",
        "/data/abstract",
    ],
);
pub const SHAPE_ATTRIBUTES: FieldRule = FieldRule::new(
    "attributes",
    &[
        "/attributes",
        "/properties",
        "/data/attributes",
        "/data/properties",
    ],
);
pub const SHAPE_OPERATIONS: FieldRule = FieldRule::new(
    "methods",
    &[
        "/methods",
        "/operations",
        "/data/methods",
        "/data/operations",
    ],
);
pub const POSITION_X: FieldRule = FieldRule::new(
    "position.x",
    &["/position/x", "/data/position/x", "/x", "/data/x"],
);
pub const POSITION_Y: FieldRule = FieldRule::new(
    "position.y",
    &["/position/y", "/data/position/y", "/y", "/data/y"],
);

// --- Shape members ---

pub const MEMBER_NAME: FieldRule = FieldRule::new("name", &["/name", "/label"]);
pub const MEMBER_TYPE: FieldRule = FieldRule::new("type", &["/type", "/dataType", "/attributeType"]);
pub const MEMBER_VISIBILITY: FieldRule =
    FieldRule::new("visibility", &["/visibility", "/access", "/accessModifier"]);
pub const OPERATION_RETURN: FieldRule =
    FieldRule::new("returnType", &["/returnType", "/return_type", "/type"]);
pub const OPERATION_PARAMETERS: FieldRule =
    FieldRule::new("parameters", &["/parameters", "/params", "/arguments"]);

// --- Connections ---

pub const CONNECTION_ID: FieldRule = FieldRule::new(
    "id",
    &["/id", "/data/id", "/relationshipId", "/data/relationshipId"],
);
pub const CONNECTION_SOURCE: FieldRule = FieldRule::new(
    "source",
    &[
        "/source",
        "/sourceId",
        "/from",
        "/data/source",
        "/data/sourceId",
        "/data/from",
    ],
);
pub const CONNECTION_TARGET: FieldRule = FieldRule::new(
    "target",
    &[
        "/target",
        "/targetId",
        "/to",
        "/data/target",
        "/data/targetId",
        "/data/to",
    ],
);
pub const CONNECTION_KIND: FieldRule = FieldRule::new(
    "relationshipType",
    &[
        "/relationshipType",
        "/type",
        "/kind",
        "/data/relationshipType",
        "/data/type",
        "/data/kind",
    ],
);
pub const SOURCE_MULTIPLICITY: FieldRule = FieldRule::new(
    "sourceMultiplicity",
    &[
        "/sourceMultiplicity",
        "/multiplicity/source",
        "/data/sourceMultiplicity",
        "/data/multiplicity/source",
    ],
);
pub const TARGET_MULTIPLICITY: FieldRule = FieldRule::new(
    "targetMultiplicity",
    &[
        "/targetMultiplicity",
        "/multiplicity/target",
        "/data/targetMultiplicity",
        "/data/multiplicity/target",
    ],
);
pub const CONNECTION_LABEL: FieldRule =
    FieldRule::new("label", &["/label", "/name", "/data/label", "/data/name"]);
