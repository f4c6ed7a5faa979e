//! Entry API routes
//!
//! # Route Structure
//!
//! - `GET /api/entries` - List every entry
//! - `POST /api/entries` - Add an entry
//! - `GET /api/entries/:id` - Get a single entry
//! - `PUT /api/entries/:id` - Replace name and number of an entry
//! - `DELETE /api/entries/:id` - Remove an entry
//! - `GET /info` - Entry count and current time as HTML
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .nest("/api/entries", entries_routes())
//!     .with_state(store);
//! ```

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use phonebook_common::{Entry, EntryPayload};

use super::{
    commands::{
        create, delete, update, CreateEntryCommand, CreateEntryError, DeleteEntryCommand,
        DeleteEntryError, UpdateEntryCommand, UpdateEntryError,
    },
    queries::{
        get as get_entry_query, info, list, GetEntryError, GetEntryQuery, InfoError, InfoQuery,
        ListEntriesError, ListEntriesQuery,
    },
};
use crate::api::unknown_endpoint;
use crate::error::{ApiError, ApiResult};
use crate::store::SharedStore;

// ============================================================================
// Router Configuration
// ============================================================================

pub fn entries_routes() -> Router<SharedStore> {
    Router::new()
        .route(
            "/",
            get(list_entries)
                .post(create_entry)
                .fallback(unknown_endpoint),
        )
        .route(
            "/:id",
            get(get_entry)
                .put(update_entry)
                .delete(delete_entry)
                .fallback(unknown_endpoint),
        )
}

pub fn info_routes() -> Router<SharedStore> {
    Router::new().route("/info", get(phonebook_info).fallback(unknown_endpoint))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// `POST /api/entries`
///
/// Responds with the stored entry, including its assigned `id`.
#[tracing::instrument(skip(store, body))]
async fn create_entry(
    State(store): State<SharedStore>,
    body: Result<Json<EntryPayload>, JsonRejection>,
) -> ApiResult<Json<Entry>> {
    let Json(payload) = body?;
    let entry = create::handle(store, CreateEntryCommand::from(payload)).await?;
    Ok(Json(entry))
}

/// `PUT /api/entries/:id`
#[tracing::instrument(skip(store, body))]
async fn update_entry(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    body: Result<Json<EntryPayload>, JsonRejection>,
) -> ApiResult<Json<Entry>> {
    let Json(payload) = body?;
    let entry = update::handle(store, UpdateEntryCommand { id, payload }).await?;
    Ok(Json(entry))
}

/// `DELETE /api/entries/:id`
///
/// Always 204 once the id is well formed, whether or not anything was removed.
#[tracing::instrument(skip(store))]
async fn delete_entry(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    delete::handle(store, DeleteEntryCommand { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(store))]
async fn list_entries(State(store): State<SharedStore>) -> ApiResult<Json<Vec<Entry>>> {
    let entries = list::handle(store, ListEntriesQuery).await?;
    Ok(Json(entries))
}

#[tracing::instrument(skip(store))]
async fn get_entry(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Entry>> {
    let entry = get_entry_query::handle(store, GetEntryQuery::new(id)).await?;
    Ok(Json(entry))
}

#[tracing::instrument(skip(store))]
async fn phonebook_info(State(store): State<SharedStore>) -> ApiResult<impl IntoResponse> {
    let response = info::handle(store, InfoQuery).await?;
    Ok(Html(response.to_html()))
}

// ============================================================================
// Error Conversions
// ============================================================================

impl From<CreateEntryError> for ApiError {
    fn from(err: CreateEntryError) -> Self {
        match err {
            CreateEntryError::Validation(e) => e.into(),
            CreateEntryError::Store(e) => e.into(),
        }
    }
}

impl From<UpdateEntryError> for ApiError {
    fn from(err: UpdateEntryError) -> Self {
        match err {
            UpdateEntryError::IdRequired => ApiError::Validation(err.to_string()),
            UpdateEntryError::Validation(e) => e.into(),
            UpdateEntryError::NotFound(_) => ApiError::NotFound,
            UpdateEntryError::Store(e) => e.into(),
        }
    }
}

impl From<DeleteEntryError> for ApiError {
    fn from(err: DeleteEntryError) -> Self {
        match err {
            DeleteEntryError::IdRequired => ApiError::Validation(err.to_string()),
            DeleteEntryError::Store(e) => e.into(),
        }
    }
}

impl From<GetEntryError> for ApiError {
    fn from(err: GetEntryError) -> Self {
        match err {
            GetEntryError::IdRequired => ApiError::Validation(err.to_string()),
            GetEntryError::NotFound(_) => ApiError::NotFound,
            GetEntryError::Store(e) => e.into(),
        }
    }
}

impl From<ListEntriesError> for ApiError {
    fn from(err: ListEntriesError) -> Self {
        let ListEntriesError::Store(e) = err;
        e.into()
    }
}

impl From<InfoError> for ApiError {
    fn from(err: InfoError) -> Self {
        let InfoError::Store(e) = err;
        e.into()
    }
}
