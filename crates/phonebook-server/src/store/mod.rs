//! Entry Store abstraction
//!
//! Handlers never touch a concrete backend; they receive a [`SharedStore`]
//! and run one asynchronous operation per request. Two backends exist:
//!
//! - [`memory::MemoryStore`]: process-local, numeric identifiers from an
//!   [`identifier::IdSequence`], used for development and tests
//! - [`postgres::PgEntryStore`]: PostgreSQL via SQLx, UUID identifiers
//!   assigned by the database
//!
//! Identifiers cross this boundary as strings. Each backend parses the token
//! itself and reports a token it cannot parse as [`StoreError::Cast`].

pub mod identifier;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use phonebook_common::{Entry, EntryFields};
use std::sync::Arc;
use thiserror::Error;

use crate::config::{Config, StoreBackend};

pub use memory::MemoryStore;
pub use postgres::PgEntryStore;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store handle shared by every request
pub type SharedStore = Arc<dyn EntryStore>;

/// Failures reported by an entry store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The identifier token is not valid for this backend
    #[error("Cast to {kind} failed for value \"{value}\"")]
    Cast { kind: &'static str, value: String },

    /// A uniqueness constraint on `name` or `number` was violated
    #[error("{field} already in phonebook")]
    Duplicate { field: &'static str, value: String },

    /// The backend could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connectivity failures become `Unavailable`; everything else stays `Database`
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            other => StoreError::Database(other),
        }
    }
}

impl StoreError {
    pub fn cast(kind: &'static str, value: impl Into<String>) -> Self {
        Self::Cast {
            kind,
            value: value.into(),
        }
    }

    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        Self::Duplicate {
            field,
            value: value.into(),
        }
    }
}

/// A collection of phonebook entries
///
/// Every operation is atomic on its own; nothing here spans more than one
/// call. Implementations must enforce uniqueness of both `name` and `number`.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries in store-native order
    async fn find_all(&self) -> StoreResult<Vec<Entry>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Entry>>;

    /// Persist a new entry; the store assigns its identifier
    async fn insert(&self, fields: EntryFields) -> StoreResult<Entry>;

    /// Replace `name` and `number` of an existing entry, returning the
    /// post-update entry or `None` if no entry has that id
    async fn update_by_id(&self, id: &str, fields: EntryFields) -> StoreResult<Option<Entry>>;

    /// Remove an entry, returning whether anything was removed
    async fn delete_by_id(&self, id: &str) -> StoreResult<bool>;

    async fn count(&self) -> StoreResult<u64>;

    /// Cheap connectivity check
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}

/// Build the store selected by configuration
///
/// The PostgreSQL pool is created once here and reused for the life of the
/// process; pending migrations are applied before the store is returned.
pub async fn open(config: &Config) -> anyhow::Result<SharedStore> {
    match config.store.backend {
        StoreBackend::Memory => {
            let store = if config.store.seed {
                MemoryStore::with_sample_entries()
            } else {
                MemoryStore::new()
            };
            tracing::info!(seeded = config.store.seed, "Using in-memory entry store");
            Ok(Arc::new(store))
        },
        StoreBackend::Postgres => {
            let store = PgEntryStore::connect(&config.database).await?;
            store.migrate().await?;
            tracing::info!("Using PostgreSQL entry store");
            Ok(Arc::new(store))
        },
    }
}
