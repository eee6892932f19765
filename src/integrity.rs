use crate::error::Warning;
use crate::model::DiagramState;
use ahash::AHashSet;

/// Drops every connection whose source or target is not a shape in `state`,
/// with one warning per dropped connection. Runs after merge so a connection
/// may point at a shape introduced in the same batch.
pub fn enforce_references(state: DiagramState, warnings: &mut Vec<Warning>) -> DiagramState {
    let DiagramState {
        shapes,
        connections,
    } = state;

    let valid_ids: AHashSet<&str> = shapes.iter().map(|s| s.id.as_str()).collect();
    let (kept, orphaned): (Vec<_>, Vec<_>) = connections.into_iter().partition(|c| {
        valid_ids.contains(c.source.as_str()) && valid_ids.contains(c.target.as_str())
    });

    for connection in orphaned {
        log::trace!(id = connection.id; "Orphaned connection removed");
        warnings.push(Warning::OrphanedConnection {
            id: connection.id,
            source_id: connection.source,
            target_id: connection.target,
        });
    }

    DiagramState::new(shapes, kept)
}
