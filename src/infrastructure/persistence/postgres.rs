//! PostgreSQL mapping store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingStore, StoreError};

/// Mapping store backed by PostgreSQL.
///
/// `try_insert` relies on the primary key constraint: `ON CONFLICT DO
/// NOTHING` makes the reservation atomic across concurrent connections.
///
/// Queries use the runtime API (not the `query!` macros) so the crate builds
/// without a development database.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_mapping(row: &sqlx::postgres::PgRow) -> Result<Mapping, sqlx::Error> {
    Ok(Mapping {
        code: row.try_get("code")?,
        long_url: row.try_get("long_url")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl MappingStore for PgStore {
    async fn try_insert(&self, code: &str, long_url: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO mappings (code, long_url) VALUES ($1, $2) ON CONFLICT (code) DO NOTHING",
        )
        .bind(code)
        .bind(long_url)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn lookup(&self, code: &str) -> Result<Option<Mapping>, StoreError> {
        let row = sqlx::query("SELECT code, long_url, created_at FROM mappings WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(row_to_mapping)
            .transpose()
            .map_err(Into::into)
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Mapping>, StoreError> {
        let row = sqlx::query(
            "SELECT code, long_url, created_at FROM mappings \
             WHERE long_url = $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(long_url)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(row_to_mapping)
            .transpose()
            .map_err(Into::into)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mappings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
