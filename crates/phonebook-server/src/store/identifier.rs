//! Identifier policy for the in-memory store

use super::{StoreError, StoreResult};

/// Smallest identifier strictly greater than every id in `ids` (1 when empty)
pub fn next_after_max<I>(ids: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    ids.into_iter().max().map_or(1, |max| max + 1)
}

/// Strictly monotonic identifier source
///
/// Unlike recomputing `max + 1` on every insert, an id handed out once is
/// never handed out again, even after the entry holding it is deleted.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequence that continues after the given existing ids
    pub fn starting_after<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        Self {
            next: next_after_max(ids),
        }
    }

    /// Hand out the next identifier
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The identifier the next call to [`IdSequence::next_id`] will return
    pub fn peek(&self) -> u64 {
        self.next
    }
}

/// Parse an identifier token from a request path
///
/// Only a bare run of ASCII digits is accepted; signs and surrounding
/// whitespace are rejected.
pub fn parse_numeric_id(raw: &str) -> StoreResult<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::cast("number", raw));
    }
    raw.parse::<u64>()
        .map_err(|_| StoreError::cast("number", raw))
}
