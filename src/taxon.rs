//! Taxon records — the per-rank entity rows ("understandings" in the
//! source schema).

use serde::{Deserialize, Serialize};

/// One row from a per-rank entity table `taxonomy."<rank name>"`.
///
/// `parent` points at a row one rank coarser; `current` points at the row
/// (possibly this one) holding the currently accepted understanding of the
/// name. Immutable value — updates go through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxon {
    pub rank_id: i32,
    pub id: i64,
    pub name: String,
    pub author: String,
    pub year: i32,
    pub parent: i64,
    pub current: i64,
}

impl Taxon {
    /// Whether this row is its own accepted understanding.
    pub fn is_current(&self) -> bool {
        self.id == self.current
    }
}
