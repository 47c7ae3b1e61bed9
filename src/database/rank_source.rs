//! Rank loader — the store side of the hierarchy cache.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::ports::RankSource;
use crate::rank::Rank;

use super::store_error;

#[derive(Debug, sqlx::FromRow)]
struct RankRow {
    id: i32,
    name: String,
    is_major: bool,
    major_parent: i32,
    direct_parent: i32,
    display_name: String,
}

impl From<RankRow> for Rank {
    fn from(row: RankRow) -> Self {
        Rank {
            id: row.id,
            name: row.name,
            is_major: row.is_major,
            major_parent: row.major_parent,
            direct_parent: row.direct_parent,
            display_name: row.display_name,
        }
    }
}

/// Postgres-backed [`RankSource`].
pub struct PgRankSource {
    pool: PgPool,
}

impl PgRankSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RankSource for PgRankSource {
    async fn load_ranks(&self, major_only: bool) -> Result<Vec<Rank>> {
        // The major-only restriction happens here, server-side, so the
        // returned set is closed under the major-parent relation.
        let sql = if major_only {
            "SELECT id, name, is_major, major_parent, direct_parent, display_name \
             FROM taxonomy.rank WHERE is_major = TRUE"
        } else {
            "SELECT id, name, is_major, major_parent, direct_parent, display_name \
             FROM taxonomy.rank"
        };

        let rows = sqlx::query_as::<_, RankRow>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Rank::from).collect())
    }
}
