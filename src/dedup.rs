//! Within-batch duplicate removal.
//!
//! The first occurrence of a signature or identifier in a batch is kept and
//! later ones are dropped, never merged. Proposals are only compared with each
//! other here; clashes with the current diagram are the merge engine's job.

use crate::error::Warning;
use crate::model::{Connection, Shape};
use ahash::{AHashMap, AHashSet};
use std::hash::Hash;

/// The surviving proposals and how many were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deduplicated {
    pub shapes: Vec<Shape>,
    pub connections: Vec<Connection>,
    pub shapes_removed: usize,
    pub connections_removed: usize,
}

impl Deduplicated {
    pub fn removed(&self) -> usize {
        self.shapes_removed + self.connections_removed
    }
}

/// Why a proposal was dropped as a duplicate.
enum Clash {
    /// The identifier was already used earlier in the batch.
    Id,
    /// Same content as the kept element with this identifier.
    Content(String),
}

/// Tracks first-seen signatures and identifiers for one element kind.
struct FirstSeen<K> {
    by_signature: AHashMap<K, String>,
    ids: AHashSet<String>,
}

impl<K: Hash + Eq> FirstSeen<K> {
    fn new() -> Self {
        Self {
            by_signature: AHashMap::new(),
            ids: AHashSet::new(),
        }
    }

    /// Returns how this element clashes with an earlier one, if it does, and
    /// otherwise records it as seen.
    fn check(&mut self, id: &str, signature: K) -> Option<Clash> {
        if self.ids.contains(id) {
            return Some(Clash::Id);
        }
        if let Some(kept) = self.by_signature.get(&signature) {
            return Some(Clash::Content(kept.clone()));
        }
        self.ids.insert(id.to_string());
        self.by_signature.insert(signature, id.to_string());
        None
    }
}

pub fn deduplicate(
    shapes: Vec<Shape>,
    connections: Vec<Connection>,
    warnings: &mut Vec<Warning>,
) -> Deduplicated {
    let mut result = Deduplicated::default();

    let mut seen = FirstSeen::new();
    for shape in shapes {
        match seen.check(&shape.id, shape.signature()) {
            None => result.shapes.push(shape),
            Some(clash) => {
                result.shapes_removed += 1;
                warnings.push(match clash {
                    Clash::Id => Warning::RepeatedShapeId { id: shape.id },
                    Clash::Content(kept) => Warning::DuplicateShape { id: shape.id, kept },
                });
            }
        }
    }

    let mut seen = FirstSeen::new();
    for connection in connections {
        match seen.check(&connection.id, connection.signature()) {
            None => result.connections.push(connection),
            Some(clash) => {
                result.connections_removed += 1;
                warnings.push(match clash {
                    Clash::Id => Warning::RepeatedConnectionId { id: connection.id },
                    Clash::Content(kept) => Warning::DuplicateConnection {
                        id: connection.id,
                        kept,
                    },
                });
            }
        }
    }

    result
}
