use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2-D position on the diagram canvas.
///
/// The origin `(0, 0)` doubles as the "no real position given" sentinel; any
/// shape sitting there is re-placed by the placement stage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if this is the origin sentinel.
    pub fn is_unset(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns `true` if both coordinates lie in `[-limit, limit]`.
    pub fn is_within(&self, limit: f64) -> bool {
        self.x.abs() <= limit && self.y.abs() <= limit
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The kind of diagram node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    #[default]
    Class,
    AbstractClass,
    Interface,
    Enum,
}

impl ShapeKind {
    /// Parses a generator-supplied kind name. Matching ignores case, spaces,
    /// dashes and underscores so `"Abstract Class"` and `"abstract_class"` agree.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "class" => Some(ShapeKind::Class),
            "abstract" | "abstractclass" => Some(ShapeKind::AbstractClass),
            "interface" => Some(ShapeKind::Interface),
            "enum" | "enumeration" => Some(ShapeKind::Enum),
            _ => None,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Class => "class",
            ShapeKind::AbstractClass => "abstract class",
            ShapeKind::Interface => "interface",
            ShapeKind::Enum => "enum",
        };
        f.write_str(name)
    }
}

/// UML member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
    Package,
}

impl Visibility {
    /// Accepts both the word form and the UML symbol (`+ - # ~`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "+" | "public" => Some(Visibility::Public),
            "-" | "private" => Some(Visibility::Private),
            "#" | "protected" => Some(Visibility::Protected),
            "~" | "package" | "internal" => Some(Visibility::Package),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    #[serde(default, alias = "return_type")]
    pub return_type: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}(", self.visibility.symbol(), self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if param.type_name.is_empty() {
                write!(f, "{}", param.name)?;
            } else {
                write!(f, "{}: {}", param.name, param.type_name)?;
            }
        }
        write!(f, ")")?;
        if !self.return_type.is_empty() {
            write!(f, ": {}", self.return_type)?;
        }
        Ok(())
    }
}

/// A diagram node.
///
/// Shapes only come out of the sanitizer with a non-empty label that is not the
/// unnamed sentinel; the fields are public so editor state can be built
/// directly, but nothing in this crate ever fabricates a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: String,
    #[serde(default)]
    pub kind: ShapeKind,
    #[serde(alias = "name")]
    pub label: String,
    #[serde(default, alias = "is_abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default, alias = "methods")]
    pub operations: Vec<Operation>,
}

/// Content key used to spot the same shape proposed under different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeSignature {
    pub label: String,
    pub attributes: Vec<String>,
}

impl Shape {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ShapeKind::default(),
            label: label.into(),
            is_abstract: false,
            position: Position::ORIGIN,
            attributes: Vec::new(),
            operations: Vec::new(),
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            type_name: type_name.into(),
            visibility: Visibility::default(),
        });
        self
    }

    pub fn signature(&self) -> ShapeSignature {
        let mut attributes: Vec<String> = self.attributes.iter().map(|a| a.name.clone()).collect();
        attributes.sort();
        ShapeSignature {
            label: self.label.clone(),
            attributes,
        }
    }
}
