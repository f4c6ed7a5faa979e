use phonebook_common::Entry;
use serde::{Deserialize, Serialize};

use crate::store::{SharedStore, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEntryQuery {
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetEntryError {
    #[error("id is required")]
    IdRequired,
    #[error("entry '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GetEntryQuery {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn validate(&self) -> Result<(), GetEntryError> {
        if self.id.trim().is_empty() {
            return Err(GetEntryError::IdRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: SharedStore, query: GetEntryQuery) -> Result<Entry, GetEntryError> {
    query.validate()?;

    let found = store.find_by_id(&query.id).await?;
    found.ok_or(GetEntryError::NotFound(query.id))
}
