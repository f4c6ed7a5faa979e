//! Error types for the phonebook CLI
//!
//! Messages are user facing; server-side rejections are passed through with
//! the server's own `error` text.

use phonebook_common::FieldError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// The server rejected the request
    #[error("Server rejected the request: {0}")]
    Api(String),

    /// No entry has the given id
    #[error("No entry with id '{0}'. Run 'phonebook list' to see stored entries.")]
    NotFound(String),

    /// Input failed the same field rules the server applies
    #[error("Invalid entry: {0}")]
    Validation(#[from] FieldError),

    /// The server answered with something other than what was expected
    #[error("Unexpected server response ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    /// HTTP request failed
    #[error("Network request failed: {0}. Check that the phonebook server is running and --server-url is correct.")]
    Http(#[from] reqwest::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
