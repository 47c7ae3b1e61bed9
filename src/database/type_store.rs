//! The shared `taxonomy.type` table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::ports::SpecimenStore;
use crate::specimen::TypeSpecimen;

use super::store_error;

#[derive(Debug, sqlx::FromRow)]
struct SpecimenRow {
    id: i64,
    full_name: String,
    author: String,
    year: i32,
}

impl From<SpecimenRow> for TypeSpecimen {
    fn from(row: SpecimenRow) -> Self {
        TypeSpecimen {
            id: row.id,
            name: row.full_name,
            author: row.author,
            year: row.year,
        }
    }
}

/// Postgres-backed [`SpecimenStore`].
pub struct PgSpecimenStore {
    pool: PgPool,
}

impl PgSpecimenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpecimenStore for PgSpecimenStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<TypeSpecimen>> {
        let row = sqlx::query_as::<_, SpecimenRow>(
            "SELECT id, full_name, author, year FROM taxonomy.type WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.map(TypeSpecimen::from))
    }

    async fn create(&self, name: &str, author: &str, year: i32) -> Result<TypeSpecimen> {
        let row = sqlx::query_as::<_, SpecimenRow>(
            "INSERT INTO taxonomy.type (full_name, author, year) \
             VALUES ($1, $2, $3) \
             RETURNING id, full_name, author, year",
        )
        .bind(name)
        .bind(author)
        .bind(year)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(TypeSpecimen::from(row))
    }
}
