//! API client module
//!
//! HTTP client for the phonebook server.

pub mod client;
pub mod endpoints;

pub use client::ApiClient;
