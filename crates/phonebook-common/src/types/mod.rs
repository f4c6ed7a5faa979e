//! Wire types shared by the server and the CLI

use serde::{Deserialize, Deserializer, Serialize};

/// A phonebook entry as exposed over the API
///
/// `id` is always the string form of whatever identifier the store assigned;
/// store bookkeeping fields never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub number: String,
}

/// Request body for creating or replacing an entry
///
/// Both fields are optional at the parsing stage so that a missing field is
/// reported as a validation failure rather than a JSON error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPayload {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Accepts either a JSON string or a JSON number
    #[serde(default, deserialize_with = "string_or_number")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

impl EntryPayload {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            number: Some(number.into()),
        }
    }
}

/// Body of every 4xx response produced by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}
