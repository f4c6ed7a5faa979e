//! Add entry command
//!
//! - Command: the raw request body, validated before anything touches the store
//! - Handler: validates, then inserts; name/number uniqueness is left to the
//!   store's own constraint so the check and the write cannot race

use phonebook_common::validation::validate_payload;
use phonebook_common::{Entry, EntryFields, EntryPayload, FieldError};
use serde::{Deserialize, Serialize};

use crate::store::{SharedStore, StoreError};

/// Command to add a new entry
///
/// # Examples
///
/// ```rust,ignore
/// let command = CreateEntryCommand::new("Ada Lovelace", "040-123456");
/// let entry = create::handle(store, command).await?;
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEntryCommand {
    #[serde(flatten)]
    pub payload: EntryPayload,
}

/// Errors that can occur when adding an entry
#[derive(Debug, thiserror::Error)]
pub enum CreateEntryError {
    #[error(transparent)]
    Validation(#[from] FieldError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CreateEntryCommand {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            payload: EntryPayload::new(name, number),
        }
    }

    /// Validates the command
    ///
    /// # Errors
    ///
    /// - `name` missing or shorter than 3 characters
    /// - `number` missing or shorter than 5 characters
    pub fn validate(&self) -> Result<EntryFields, CreateEntryError> {
        Ok(validate_payload(&self.payload)?)
    }
}

impl From<EntryPayload> for CreateEntryCommand {
    fn from(payload: EntryPayload) -> Self {
        Self { payload }
    }
}

/// Handler for adding entries
///
/// # Errors
///
/// - Validation errors, in field order
/// - `StoreError::Duplicate` if the name or number is already in the phonebook
/// - Store errors if the write fails
#[tracing::instrument(skip(store, command), fields(name = ?command.payload.name))]
pub async fn handle(store: SharedStore, command: CreateEntryCommand) -> Result<Entry, CreateEntryError> {
    let fields = command.validate()?;

    tracing::info!("Adding entry");

    let entry = store.insert(fields).await?;

    tracing::info!(entry_id = %entry.id, "Entry added");

    Ok(entry)
}
