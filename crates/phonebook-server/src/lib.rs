//! Phonebook Server Library
//!
//! HTTP service for a small phonebook: a flat collection of people, each with
//! a name and a phone number.
//!
//! # Overview
//!
//! - **Entry API**: list, get, add, update and delete under `/api/entries`
//! - **Info page**: `/info` reports how many entries are stored
//! - **Stores**: in-memory or PostgreSQL, chosen at startup behind [`store::EntryStore`]
//! - **Static assets**: an optional directory served ahead of the API
//! - **Middleware**: CORS, tracing spans and a one-line request log
//!
//! # Architecture
//!
//! Each feature is a vertical slice with **commands** (writes) and
//! **queries** (reads), each a plain `handle(store, request)` function with
//! its own error type. Routes convert those errors into [`ApiError`], which
//! owns the mapping to HTTP status codes and bodies.
//!
//! # Example
//!
//! ```no_run
//! use phonebook_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod store;

pub use error::{ApiError, ApiResult};
