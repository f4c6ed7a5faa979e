use serde::{Deserialize, Serialize};

use crate::store::{SharedStore, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEntryCommand {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEntryResponse {
    pub id: String,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteEntryError {
    #[error("id is required")]
    IdRequired,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DeleteEntryCommand {
    pub fn validate(&self) -> Result<(), DeleteEntryError> {
        if self.id.trim().is_empty() {
            return Err(DeleteEntryError::IdRequired);
        }
        Ok(())
    }
}

/// Removing an id that does not exist succeeds with `deleted: false`
#[tracing::instrument(skip(store))]
pub async fn handle(
    store: SharedStore,
    command: DeleteEntryCommand,
) -> Result<DeleteEntryResponse, DeleteEntryError> {
    command.validate()?;

    let deleted = store.delete_by_id(&command.id).await?;

    if deleted {
        tracing::info!(entry_id = %command.id, "Entry deleted");
    } else {
        tracing::debug!(entry_id = %command.id, "Nothing to delete");
    }

    Ok(DeleteEntryResponse {
        id: command.id,
        deleted,
    })
}
