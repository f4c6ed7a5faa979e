pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateEntryCommand, CreateEntryError};
pub use delete::{DeleteEntryCommand, DeleteEntryError, DeleteEntryResponse};
pub use update::{UpdateEntryCommand, UpdateEntryError};
