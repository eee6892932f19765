use super::{Connection, Shape};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// The complete set of shapes and connections an editor session holds.
///
/// The pipeline never mutates a caller's state; every run returns a fresh value
/// which the caller may adopt or discard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramState {
    #[serde(default, alias = "elements")]
    pub shapes: Vec<Shape>,
    #[serde(default, alias = "relationships")]
    pub connections: Vec<Connection>,
}

impl DiagramState {
    pub fn new(shapes: Vec<Shape>, connections: Vec<Connection>) -> Self {
        Self {
            shapes,
            connections,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.connections.is_empty()
    }

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn shape_ids(&self) -> AHashSet<&str> {
        self.shapes.iter().map(|s| s.id.as_str()).collect()
    }

    /// Load editor state from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
