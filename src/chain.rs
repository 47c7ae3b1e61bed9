//! Chain resolution — rebuilding the linear rank ladder from unordered
//! parent-pointer rows.
//!
//! The store keeps ranks as a self-referential relation with no row order.
//! These functions re-derive the unique finest-first ordering for one axis,
//! or fail with [`TaxonomyError::StructuralInconsistency`] when the set is
//! not a single simple path (disconnection, branching, cycle, orphans).
//! A guessed ordering is never returned: corrupt hierarchy data is a
//! fix-it-in-the-store problem.

use std::collections::HashMap;

use crate::error::{Result, TaxonomyError};
use crate::rank::{Axis, Rank};

/// Find the foundation of the chain: the one rank no other rank references
/// as its axis parent.
///
/// A capstone's self-reference does not count as referencing, so a
/// one-element set is a valid chain whose foundation is its own capstone.
pub fn find_foundation(ranks: &HashMap<i32, Rank>, axis: Axis) -> Result<i32> {
    if ranks.is_empty() {
        return Err(TaxonomyError::StructuralInconsistency(
            "empty rank set".into(),
        ));
    }

    let mut referenced: HashMap<i32, bool> = ranks.keys().map(|&id| (id, false)).collect();
    for rank in ranks.values() {
        if rank.is_capstone(axis) {
            continue;
        }
        // Parents outside the set are left to resolve_chain to report.
        if let Some(seen) = referenced.get_mut(&rank.parent(axis)) {
            *seen = true;
        }
    }

    let mut unreferenced = referenced
        .iter()
        .filter(|(_, seen)| !**seen)
        .map(|(&id, _)| id);
    match (unreferenced.next(), unreferenced.next()) {
        (Some(id), None) => Ok(id),
        (None, _) => Err(TaxonomyError::StructuralInconsistency(
            "no foundation rank: every rank is referenced as a parent".into(),
        )),
        (Some(a), Some(b)) => Err(TaxonomyError::StructuralInconsistency(format!(
            "multiple foundation candidates (ranks {a} and {b}): chain is disconnected or branching"
        ))),
    }
}

/// Walk the parent relation from the foundation to the capstone, returning
/// rank ids ordered finest-first.
///
/// The walk must visit every rank in the set exactly once and terminate at
/// the capstone's self-loop; anything else is a structural fault.
pub fn resolve_chain(ranks: &HashMap<i32, Rank>, axis: Axis) -> Result<Vec<i32>> {
    let foundation = find_foundation(ranks, axis)?;

    let mut order = Vec::with_capacity(ranks.len());
    let mut current = &ranks[&foundation];
    order.push(current.id);

    while !current.is_capstone(axis) {
        if order.len() >= ranks.len() {
            return Err(TaxonomyError::StructuralInconsistency(format!(
                "chain walk exceeded {} ranks without reaching a capstone",
                ranks.len()
            )));
        }
        let parent = current.parent(axis);
        current = ranks.get(&parent).ok_or_else(|| {
            TaxonomyError::StructuralInconsistency(format!(
                "rank {} references parent {parent} outside the loaded set",
                current.id
            ))
        })?;
        if order.contains(&current.id) {
            return Err(TaxonomyError::StructuralInconsistency(format!(
                "cycle through rank {}",
                current.id
            )));
        }
        order.push(current.id);
    }

    if order.len() != ranks.len() {
        return Err(TaxonomyError::StructuralInconsistency(format!(
            "chain covers {} of {} ranks: orphan ranks unreachable from the foundation",
            order.len(),
            ranks.len()
        )));
    }

    Ok(order)
}
