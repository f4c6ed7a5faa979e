use phonebook_common::Entry;
use serde::{Deserialize, Serialize};

use crate::store::{SharedStore, StoreError};

/// Returns every entry in store order; no filtering or pagination
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListEntriesQuery;

#[derive(Debug, thiserror::Error)]
pub enum ListEntriesError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: SharedStore, _query: ListEntriesQuery) -> Result<Vec<Entry>, ListEntriesError> {
    let entries = store.find_all().await?;
    tracing::debug!(count = entries.len(), "Listed entries");
    Ok(entries)
}
