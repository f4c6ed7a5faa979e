//! Field rules for phonebook entries
//!
//! The server applies these before anything reaches the store; the CLI runs
//! the same checks so obviously bad input never leaves the terminal.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. `name` present
//! 2. `name` at least [`NAME_MIN_LENGTH`] characters
//! 3. `number` present
//! 4. `number` at least [`NUMBER_MIN_LENGTH`] characters

use thiserror::Error;

use crate::types::EntryPayload;

/// Minimum length of a name, in characters.
pub const NAME_MIN_LENGTH: usize = 3;

/// Minimum length of a phone number, in characters.
pub const NUMBER_MIN_LENGTH: usize = 5;

/// A single field rule violation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field} missing")]
    Missing { field: &'static str },

    #[error("{field} '{value}' is shorter than the minimum allowed length ({min_length})")]
    TooShort {
        field: &'static str,
        value: String,
        min_length: usize,
    },
}

impl FieldError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Missing { field } | FieldError::TooShort { field, .. } => field,
        }
    }
}

/// Validated entry fields, ready to hand to a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub name: String,
    pub number: String,
}

/// Validate a single required text field
pub fn validate_field(
    field: &'static str,
    value: Option<&str>,
    min_length: usize,
) -> Result<String, FieldError> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Err(FieldError::Missing { field }),
    };

    if value.chars().count() < min_length {
        return Err(FieldError::TooShort {
            field,
            value: value.to_string(),
            min_length,
        });
    }

    Ok(value.to_string())
}

/// Validate a name
pub fn validate_name(name: Option<&str>) -> Result<String, FieldError> {
    validate_field("name", name, NAME_MIN_LENGTH)
}

/// Validate a phone number
pub fn validate_number(number: Option<&str>) -> Result<String, FieldError> {
    validate_field("number", number, NUMBER_MIN_LENGTH)
}

/// Validate a full request payload
pub fn validate_payload(payload: &EntryPayload) -> Result<EntryFields, FieldError> {
    let name = validate_name(payload.name.as_deref())?;
    let number = validate_number(payload.number.as_deref())?;
    Ok(EntryFields { name, number })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_payload_valid() {
        let fields = validate_payload(&EntryPayload::new("Ada", "12345")).unwrap();
        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.number, "12345");
    }

    #[test]
    fn test_missing_name_reported_first() {
        let err = validate_payload(&EntryPayload::default()).unwrap_err();
        assert_eq!(err, FieldError::Missing { field: "name" });
        assert_eq!(err.to_string(), "name missing");
    }

    #[test]
    fn test_blank_name_is_missing() {
        let payload = EntryPayload::new("   ", "12345");
        assert_eq!(
            validate_payload(&payload).unwrap_err(),
            FieldError::Missing { field: "name" }
        );
    }

    #[test]
    fn test_short_name() {
        let err = validate_payload(&EntryPayload::new("Al", "12345")).unwrap_err();
        assert_eq!(err.field(), "name");
        assert_eq!(
            err.to_string(),
            "name 'Al' is shorter than the minimum allowed length (3)"
        );
    }

    #[test]
    fn test_missing_number() {
        let payload = EntryPayload {
            name: Some("Ada".to_string()),
            number: None,
        };
        assert_eq!(validate_payload(&payload).unwrap_err().to_string(), "number missing");
    }

    #[test]
    fn test_short_number() {
        let err = validate_payload(&EntryPayload::new("Ada", "1234")).unwrap_err();
        assert_eq!(err.field(), "number");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // three characters, six bytes
        assert!(validate_name(Some("Åsa")).is_ok());
        assert!(validate_name(Some("Ås")).is_err());
    }

    proptest! {
        #[test]
        fn prop_names_below_minimum_rejected(name in "[a-zA-Z]{1,2}") {
            prop_assert!(validate_name(Some(&name)).is_err());
        }

        #[test]
        fn prop_numbers_at_minimum_accepted(number in "[0-9-]{5,20}") {
            prop_assert_eq!(validate_number(Some(&number)).unwrap(), number);
        }
    }
}
