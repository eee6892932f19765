pub mod connection;
pub mod shape;
pub mod state;

pub use connection::*;
pub use shape::*;
pub use state::*;

use std::fmt;

/// Which side of the diagram a record or warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Shape,
    Connection,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Shape => f.write_str("shape"),
            ElementKind::Connection => f.write_str("connection"),
        }
    }
}
