//! Rank records and the two parent axes they participate in.

use serde::{Deserialize, Serialize};

/// Selector for one of the two parent relations a rank carries.
///
/// `Direct` is the fine-grained ladder over all ranks; `Major` is the coarse
/// ladder restricted to ranks flagged `is_major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Direct,
    Major,
}

/// One taxonomic rank row, immutable once loaded.
///
/// `name` is the lowercase identifier that also addresses the per-rank data
/// table holding taxa of this rank. A capstone rank (the coarsest in a
/// chain) references itself on the corresponding axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    pub id: i32,
    pub name: String,
    pub is_major: bool,
    pub major_parent: i32,
    pub direct_parent: i32,
    pub display_name: String,
}

impl Rank {
    /// The next-coarser rank id along the given axis.
    pub fn parent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Direct => self.direct_parent,
            Axis::Major => self.major_parent,
        }
    }

    /// A capstone terminates its chain by referencing itself.
    pub fn is_capstone(&self, axis: Axis) -> bool {
        self.parent(axis) == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kingdom() -> Rank {
        Rank {
            id: 4,
            name: "kingdom".into(),
            is_major: true,
            major_parent: 4,
            direct_parent: 4,
            display_name: "Kingdom".into(),
        }
    }

    #[test]
    fn parent_selects_axis() {
        let r = Rank {
            id: 2,
            name: "genus".into(),
            is_major: true,
            major_parent: 4,
            direct_parent: 3,
            display_name: "Genus".into(),
        };
        assert_eq!(r.parent(Axis::Direct), 3);
        assert_eq!(r.parent(Axis::Major), 4);
    }

    #[test]
    fn capstone_self_references() {
        assert!(kingdom().is_capstone(Axis::Direct));
        assert!(kingdom().is_capstone(Axis::Major));
    }
}
