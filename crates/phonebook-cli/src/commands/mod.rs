//! CLI command implementations
//!
//! Each subcommand group has its own module with plain async functions taking
//! the shared [`ApiClient`](crate::api::ApiClient).

pub mod entries;
pub mod info;
