use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MULTIPLICITY: &str = "1";

/// UML relationship kinds a connection can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionKind {
    #[default]
    Association,
    Aggregation,
    Composition,
    Inheritance,
    Realization,
    Dependency,
    Generalization,
}

impl ConnectionKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "association" | "associates" => Some(ConnectionKind::Association),
            "aggregation" | "aggregates" => Some(ConnectionKind::Aggregation),
            "composition" | "composes" => Some(ConnectionKind::Composition),
            "inheritance" | "extends" | "inherits" => Some(ConnectionKind::Inheritance),
            "realization" | "realisation" | "implementation" | "implements" => {
                Some(ConnectionKind::Realization)
            }
            "dependency" | "depends" | "uses" => Some(ConnectionKind::Dependency),
            "generalization" | "generalisation" => Some(ConnectionKind::Generalization),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionKind::Association => "association",
            ConnectionKind::Aggregation => "aggregation",
            ConnectionKind::Composition => "composition",
            ConnectionKind::Inheritance => "inheritance",
            ConnectionKind::Realization => "realization",
            ConnectionKind::Dependency => "dependency",
            ConnectionKind::Generalization => "generalization",
        };
        f.write_str(name)
    }
}

fn default_multiplicity() -> String {
    DEFAULT_MULTIPLICITY.to_string()
}

/// A diagram edge between two shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub kind: ConnectionKind,
    #[serde(default = "default_multiplicity", alias = "source_multiplicity")]
    pub source_multiplicity: String,
    #[serde(default = "default_multiplicity", alias = "target_multiplicity")]
    pub target_multiplicity: String,
    #[serde(default)]
    pub label: String,
}

/// Two connections with the same signature are indistinguishable on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionSignature {
    pub source: String,
    pub target: String,
    pub kind: ConnectionKind,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: ConnectionKind,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind,
            source_multiplicity: default_multiplicity(),
            target_multiplicity: default_multiplicity(),
            label: String::new(),
        }
    }

    pub fn signature(&self) -> ConnectionSignature {
        ConnectionSignature {
            source: self.source.clone(),
            target: self.target.clone(),
            kind: self.kind,
        }
    }
}
