//! PostgreSQL entry store
//!
//! Entries live in the `entries` table created by `migrations/`. The database
//! assigns UUID identifiers and enforces uniqueness of `name` and `number`
//! through the `entries_name_key` and `entries_number_key` constraints.
//! The `version` column is bumped on every update and never leaves this module.

use async_trait::async_trait;
use phonebook_common::{Entry, EntryFields};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use uuid::Uuid;

use super::{EntryStore, StoreError, StoreResult};
use crate::config::DatabaseConfig;

const NUMBER_UNIQUE_CONSTRAINT: &str = "entries_number_key";

#[derive(Debug, sqlx::FromRow)]
struct EntryRecord {
    id: Uuid,
    name: String,
    number: String,
    #[allow(dead_code)]
    version: i32,
}

impl From<EntryRecord> for Entry {
    fn from(record: EntryRecord) -> Self {
        Entry {
            id: record.id.to_string(),
            name: record.name,
            number: record.number,
        }
    }
}

/// Entry store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgEntryStore {
    pool: PgPool,
}

impl PgEntryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the connection pool described by `config`
    ///
    /// An unreachable server is reported as `StoreError::Unavailable`.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let url = config.url.as_deref().ok_or_else(|| {
            StoreError::Unavailable("DATABASE_URL is required for the postgres store".to_string())
        })?;

        tracing::info!(
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(url)
            .await?;

        tracing::info!("Database connection pool established");
        Ok(Self::new(pool))
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }
}

fn parse_id(raw: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| StoreError::cast("UUID", raw))
}

/// Translate unique violations into `Duplicate`, keyed by constraint name
fn map_write_error(err: sqlx::Error, fields: &EntryFields) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(NUMBER_UNIQUE_CONSTRAINT) => {
                    StoreError::duplicate("number", fields.number.clone())
                },
                _ => StoreError::duplicate("name", fields.name.clone()),
            };
        }
    }
    StoreError::from(err)
}

#[async_trait]
impl EntryStore for PgEntryStore {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> StoreResult<Vec<Entry>> {
        let records = sqlx::query_as::<_, EntryRecord>(
            "SELECT id, name, number, version FROM entries ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Entry::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Entry>> {
        let id = parse_id(id)?;
        let record = sqlx::query_as::<_, EntryRecord>(
            "SELECT id, name, number, version FROM entries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Entry::from))
    }

    #[tracing::instrument(skip_all)]
    async fn insert(&self, fields: EntryFields) -> StoreResult<Entry> {
        let record = sqlx::query_as::<_, EntryRecord>(
            r#"
            INSERT INTO entries (name, number)
            VALUES ($1, $2)
            RETURNING id, name, number, version
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &fields))?;

        Ok(record.into())
    }

    #[tracing::instrument(skip_all)]
    async fn update_by_id(&self, id: &str, fields: EntryFields) -> StoreResult<Option<Entry>> {
        let id = parse_id(id)?;
        let record = sqlx::query_as::<_, EntryRecord>(
            r#"
            UPDATE entries
            SET name = $2, number = $3, version = version + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, number, version
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &fields))?;

        Ok(record.map(Entry::from))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let id = parse_id(id)?;
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
