//! Phonebook info query
//!
//! Produces the count of stored entries together with the moment the count
//! was taken. Rendering into HTML happens in the route.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{SharedStore, StoreError};

/// Format of the timestamp line, e.g. `Fri Oct 16 2026 09:15:02 GMT+0000`
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InfoQuery;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub count: u64,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum InfoError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InfoResponse {
    pub fn to_html(&self) -> String {
        format!(
            "<div>Phonebook has info for {} people</div><div>{}</div>",
            self.count,
            self.generated_at.format(TIMESTAMP_FORMAT)
        )
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: SharedStore, _query: InfoQuery) -> Result<InfoResponse, InfoError> {
    let count = store.count().await?;
    Ok(InfoResponse {
        count,
        generated_at: Utc::now(),
    })
}
