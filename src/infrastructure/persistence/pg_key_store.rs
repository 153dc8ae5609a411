//! PostgreSQL implementation of the key store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::domain::repositories::KeyStore;
use crate::error::AppError;

/// Unique constraint that makes key assignment atomic.
const SHORT_KEY_CONSTRAINT: &str = "url_entries_short_key_key";

#[derive(FromRow)]
struct UrlEntryRow {
    id: i64,
    short_key: String,
    long_url: String,
    created_at: DateTime<Utc>,
}

impl From<UrlEntryRow> for UrlEntry {
    fn from(r: UrlEntryRow) -> Self {
        UrlEntry::new(r.id, r.short_key, r.long_url, r.created_at)
    }
}

/// PostgreSQL repository for short key entries.
///
/// Uniqueness is enforced by the `url_entries_short_key_key` constraint, so a
/// concurrent insert of the same key fails instead of overwriting.
pub struct PgKeyStore {
    pool: Arc<PgPool>,
}

impl PgKeyStore {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn is_short_key_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() && matches!(db_err.constraint(), Some(SHORT_KEY_CONSTRAINT))
}

#[async_trait]
impl KeyStore for PgKeyStore {
    async fn save(&self, new_entry: NewUrlEntry) -> Result<UrlEntry, AppError> {
        let result = sqlx::query_as::<_, UrlEntryRow>(
            r#"
            INSERT INTO url_entries (short_key, long_url)
            VALUES ($1, $2)
            RETURNING id, short_key, long_url, created_at
            "#,
        )
        .bind(&new_entry.short_key)
        .bind(&new_entry.long_url)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_short_key_violation(&e) => Err(AppError::conflict(
                "Short key already exists",
                json!({ "short_key": new_entry.short_key }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_short_key(&self, short_key: &str) -> Result<Option<UrlEntry>, AppError> {
        let row = sqlx::query_as::<_, UrlEntryRow>(
            r#"
            SELECT id, short_key, long_url, created_at
            FROM url_entries
            WHERE short_key = $1
            "#,
        )
        .bind(short_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlEntry::from))
    }

    async fn exists_by_short_key(&self, short_key: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM url_entries WHERE short_key = $1)")
                .bind(short_key)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn delete_by_short_key(&self, short_key: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM url_entries WHERE short_key = $1")
            .bind(short_key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_entries")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
