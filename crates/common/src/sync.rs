//! # Reference Collection Synchronizer
//!
//! Merges a freshly-queried set of references into an existing ordered
//! collection without disturbing entries that are still valid. Used by the
//! plural bind sources so re-running a bind pass converges instead of
//! rewriting the collection wholesale every redraw.

use bevy::prelude::*;

/// Converge `existing` onto the queried reference set.
///
/// A length mismatch means the underlying component set changed and stale
/// slots cannot be trusted, so the collection is rebuilt from scratch.
/// Otherwise each queried reference already present stays where it is and
/// each missing one is inserted at its query position; anything no longer
/// in the queried set is dropped and repeated entries collapse to their
/// first occurrence. Running this twice with the same query result is a
/// no-op the second time.
pub fn sync_refs(existing: &[Entity], queried: &[Entity]) -> Vec<Entity> {
    let mut merged: Vec<Entity> = if existing.len() != queried.len() {
        Vec::new()
    } else {
        existing.to_vec()
    };

    for (position, &reference) in queried.iter().enumerate() {
        if merged.contains(&reference) {
            continue;
        }
        let at = position.min(merged.len());
        merged.insert(at, reference);
    }

    let mut kept: Vec<Entity> = Vec::new();
    merged.retain(|reference| {
        if !queried.contains(reference) || kept.contains(reference) {
            return false;
        }
        kept.push(*reference);
        true
    });
    merged
}
