//! Update entry command
//!
//! Replaces `name` and `number` of an existing entry. The same field rules as
//! for adding apply, and the store's uniqueness constraint still holds.

use phonebook_common::validation::validate_payload;
use phonebook_common::{Entry, EntryFields, EntryPayload, FieldError};
use serde::{Deserialize, Serialize};

use crate::store::{SharedStore, StoreError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEntryCommand {
    /// Set from the path parameter
    #[serde(skip)]
    pub id: String,

    #[serde(flatten)]
    pub payload: EntryPayload,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateEntryError {
    #[error("id is required")]
    IdRequired,

    #[error(transparent)]
    Validation(#[from] FieldError),

    #[error("entry '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UpdateEntryCommand {
    pub fn validate(&self) -> Result<EntryFields, UpdateEntryError> {
        if self.id.trim().is_empty() {
            return Err(UpdateEntryError::IdRequired);
        }
        Ok(validate_payload(&self.payload)?)
    }
}

#[tracing::instrument(skip(store, command), fields(id = %command.id))]
pub async fn handle(store: SharedStore, command: UpdateEntryCommand) -> Result<Entry, UpdateEntryError> {
    let fields = command.validate()?;

    match store.update_by_id(&command.id, fields).await? {
        Some(entry) => {
            tracing::info!(entry_id = %entry.id, "Entry updated");
            Ok(entry)
        },
        None => Err(UpdateEntryError::NotFound(command.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn command(id: &str, name: &str, number: &str) -> UpdateEntryCommand {
        UpdateEntryCommand {
            id: id.to_string(),
            payload: EntryPayload::new(name, number),
        }
    }

    #[tokio::test]
    async fn test_handle_updates_in_place() {
        let store: SharedStore = Arc::new(MemoryStore::with_sample_entries());
        let entry = handle(store.clone(), command("2", "Harriet", "11111"))
            .await
            .unwrap();
        assert_eq!(entry.id, "2");
        assert_eq!(entry.number, "11111");
        assert_eq!(
            store.find_by_id("2").await.unwrap().unwrap().number,
            "11111"
        );
    }

    #[tokio::test]
    async fn test_handle_missing_entry() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let result = handle(store, command("42", "Harriet", "11111")).await;
        assert!(matches!(result, Err(UpdateEntryError::NotFound(ref id)) if id == "42"));
    }

    #[tokio::test]
    async fn test_handle_applies_validation() {
        let store: SharedStore = Arc::new(MemoryStore::with_sample_entries());
        let result = handle(store.clone(), command("1", "Bi", "12345")).await;
        assert!(matches!(result, Err(UpdateEntryError::Validation(_))));
        assert_eq!(store.find_by_id("1").await.unwrap().unwrap().name, "Bill");
    }

    #[test]
    fn test_validate_requires_id() {
        assert!(matches!(
            command(" ", "Ada", "12345").validate(),
            Err(UpdateEntryError::IdRequired)
        ));
    }
}
