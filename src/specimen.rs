//! Type specimens — physical reference material anchoring a taxon name.

use serde::{Deserialize, Serialize};

/// One row from `taxonomy.type`. The fields mirror the physical label of
/// the specimen; creating one is rare and deliberate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpecimen {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub year: i32,
}
