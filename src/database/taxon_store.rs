//! Per-rank entity tables.
//!
//! Taxa are not stored generically: each rank owns a table
//! `taxonomy."<name>"` and a link table `taxonomy."<name>_type"` whose
//! first column is also named after the rank. Rank names come exclusively
//! from `taxonomy.rank` via the hierarchy cache, so identifier
//! interpolation stays within trusted values.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{Result, TaxonomyError};
use crate::ports::TaxonStore;
use crate::rank::Rank;
use crate::taxon::Taxon;

use super::store_error;

#[derive(Debug, sqlx::FromRow)]
struct TaxonRow {
    id: i64,
    name: String,
    author: String,
    year: i32,
    parent: i64,
    current: i64,
}

impl TaxonRow {
    fn into_taxon(self, rank: &Rank) -> Taxon {
        Taxon {
            rank_id: rank.id,
            id: self.id,
            name: self.name,
            author: self.author,
            year: self.year,
            parent: self.parent,
            current: self.current,
        }
    }
}

const TAXON_COLUMNS: &str = "id, name, author, year, parent, current";

/// Postgres-backed [`TaxonStore`].
pub struct PgTaxonStore {
    pool: PgPool,
}

impl PgTaxonStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaxonStore for PgTaxonStore {
    async fn search_by_name(&self, rank: &Rank, pattern: &str) -> Result<Vec<Taxon>> {
        let sql = format!(
            r#"SELECT {TAXON_COLUMNS} FROM taxonomy."{}" WHERE name ILIKE $1"#,
            rank.name
        );
        let rows = sqlx::query_as::<_, TaxonRow>(&sql)
            .bind(format!("%{pattern}%"))
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(|r| r.into_taxon(rank)).collect())
    }

    async fn find_by_id(&self, rank: &Rank, id: i64) -> Result<Option<Taxon>> {
        let sql = format!(
            r#"SELECT {TAXON_COLUMNS} FROM taxonomy."{}" WHERE id = $1"#,
            rank.name
        );
        let row = sqlx::query_as::<_, TaxonRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(row.map(|r| r.into_taxon(rank)))
    }

    async fn direct_children(
        &self,
        child_rank: &Rank,
        parent_id: i64,
        current_only: bool,
    ) -> Result<Vec<Taxon>> {
        let mut sql = format!(
            r#"SELECT {TAXON_COLUMNS} FROM taxonomy."{}" WHERE parent = $1"#,
            child_rank.name
        );
        if current_only {
            sql.push_str(" AND id = current");
        }
        let rows = sqlx::query_as::<_, TaxonRow>(&sql)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(|r| r.into_taxon(child_rank)).collect())
    }

    async fn set_current(&self, rank: &Rank, id: i64, current: i64) -> Result<()> {
        // The store enforces that `current` references an existing row;
        // a violated foreign key comes back as a store error.
        let sql = format!(
            r#"UPDATE taxonomy."{}" SET current = $1 WHERE id = $2"#,
            rank.name
        );
        let result = sqlx::query(&sql)
            .bind(current)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        if result.rows_affected() == 0 {
            return Err(TaxonomyError::NotFound(format!("{} {id}", rank.name)));
        }
        Ok(())
    }

    async fn type_ids(&self, rank: &Rank, taxon_id: i64) -> Result<Vec<i64>> {
        let sql = format!(
            r#"SELECT type FROM taxonomy."{0}_type" WHERE "{0}" = $1"#,
            rank.name
        );
        let rows: Vec<(i64,)> = sqlx::query_as(&sql)
            .bind(taxon_id)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn assign_type(&self, rank: &Rank, taxon_id: i64, specimen_id: i64) -> Result<()> {
        let sql = format!(
            r#"INSERT INTO taxonomy."{0}_type" ("{0}", type) VALUES ($1, $2)"#,
            rank.name
        );
        sqlx::query(&sql)
            .bind(taxon_id)
            .bind(specimen_id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(())
    }
}
