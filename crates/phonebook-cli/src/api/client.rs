//! HTTP API client for the phonebook server

use phonebook_common::{Entry, EntryPayload, ErrorBody};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use crate::api::endpoints;
use crate::error::{CliError, Result};

// ============================================================================
// API Client Constants
// ============================================================================

/// Default timeout for API requests in seconds.
/// Can be overridden via PHONEBOOK_API_TIMEOUT_SECS environment variable.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Default server URL when not specified via flag or environment variable.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3001";

/// API client for the phonebook server
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let timeout_secs = std::env::var("PHONEBOOK_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        Self::with_timeout(base_url, Duration::from_secs(timeout_secs))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(CliError::config("server URL must not be empty"));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Check server health
    pub async fn health_check(&self) -> Result<bool> {
        let url = endpoints::health_url(&self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// List every entry
    pub async fn list_entries(&self) -> Result<Vec<Entry>> {
        let url = endpoints::entries_url(&self.base_url);
        tracing::debug!(url = %url, "Listing entries");

        let response = self.client.get(&url).send().await?;
        let response = check(response).await?;

        Ok(response.json().await?)
    }

    /// Fetch one entry; `None` when the server has no entry with that id
    pub async fn get_entry(&self, id: &str) -> Result<Option<Entry>> {
        let url = endpoints::entry_url(&self.base_url, id);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check(response).await?;

        Ok(Some(response.json().await?))
    }

    pub async fn create_entry(&self, payload: &EntryPayload) -> Result<Entry> {
        let url = endpoints::entries_url(&self.base_url);

        let response = self.client.post(&url).json(payload).send().await?;
        let response = check(response).await?;

        Ok(response.json().await?)
    }

    /// Replace name and number of an entry; `None` when the id is unknown
    pub async fn update_entry(&self, id: &str, payload: &EntryPayload) -> Result<Option<Entry>> {
        let url = endpoints::entry_url(&self.base_url, id);

        let response = self.client.put(&url).json(payload).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check(response).await?;

        Ok(Some(response.json().await?))
    }

    pub async fn delete_entry(&self, id: &str) -> Result<()> {
        let url = endpoints::entry_url(&self.base_url, id);

        let response = self.client.delete(&url).send().await?;
        check(response).await?;

        Ok(())
    }

    /// The info page as returned by the server (HTML)
    pub async fn info(&self) -> Result<String> {
        let url = endpoints::info_url(&self.base_url);

        let response = self.client.get(&url).send().await?;
        let response = check(response).await?;

        Ok(response.text().await?)
    }
}

/// Pass successful responses through, turn everything else into a `CliError`
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    if status.is_client_error() {
        if let Ok(error) = serde_json::from_str::<ErrorBody>(&body) {
            return Err(CliError::api(error.error));
        }
    }

    Err(CliError::UnexpectedResponse {
        status: status.as_u16(),
        body,
    })
}
