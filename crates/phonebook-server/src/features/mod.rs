//! Feature slices of the phonebook API
//!
//! Each feature is a vertical slice:
//! - `commands/` - write operations (create, update, delete)
//! - `queries/` - read operations (list, get, info)
//! - `routes.rs` - HTTP route definitions

pub mod entries;

use axum::Router;

use crate::store::SharedStore;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Entry store chosen at startup
    pub store: SharedStore,
}

/// Creates the router with every feature route mounted
///
/// - `/api/entries` - Entry CRUD
/// - `/info` - Entry count page
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/api/entries", entries::entries_routes().with_state(state.store.clone()))
        .merge(entries::info_routes().with_state(state.store))
}
