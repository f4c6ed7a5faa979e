//! Phonebook Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, validation rules and logging for the phonebook workspace.
//!
//! # Overview
//!
//! - **Types**: the wire shape of an entry as it crosses the HTTP boundary
//! - **Validation**: field rules applied by the server and mirrored by the CLI
//! - **Logging**: tracing subscriber setup shared by every binary
//!
//! # Example
//!
//! ```
//! use phonebook_common::types::EntryPayload;
//! use phonebook_common::validation::validate_payload;
//!
//! let payload = EntryPayload::new("Ada Lovelace", "040-123456");
//! let fields = validate_payload(&payload).unwrap();
//! assert_eq!(fields.name, "Ada Lovelace");
//! ```

pub mod logging;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use types::{Entry, EntryPayload, ErrorBody};
pub use validation::{EntryFields, FieldError};
