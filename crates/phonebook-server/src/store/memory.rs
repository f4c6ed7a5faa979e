//! In-memory entry store

use async_trait::async_trait;
use phonebook_common::{Entry, EntryFields};
use tokio::sync::RwLock;

use super::identifier::{parse_numeric_id, IdSequence};
use super::{EntryStore, StoreError, StoreResult};

/// Stored form of an entry; `revision` counts updates and stays internal
#[derive(Debug, Clone)]
struct EntryRecord {
    id: u64,
    name: String,
    number: String,
    revision: u32,
}

impl EntryRecord {
    fn to_entry(&self) -> Entry {
        Entry {
            id: self.id.to_string(),
            name: self.name.clone(),
            number: self.number.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    records: Vec<EntryRecord>,
    ids: IdSequence,
}

impl State {
    /// Reject `fields` if a record other than `except` holds the same name or
    /// number. Names are checked across every record before any number.
    fn check_unique(&self, fields: &EntryFields, except: Option<u64>) -> StoreResult<()> {
        let mut others = self.records.iter().filter(|r| Some(r.id) != except);

        if others.clone().any(|r| r.name == fields.name) {
            return Err(StoreError::duplicate("name", fields.name.clone()));
        }
        if others.any(|r| r.number == fields.number) {
            return Err(StoreError::duplicate("number", fields.number.clone()));
        }

        Ok(())
    }
}

/// Process-local store backed by a vector behind an async `RwLock`
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the given entries with ids 1..=n
    pub fn with_entries<I, N, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<String>,
    {
        let mut state = State::default();
        for (name, number) in entries {
            let id = state.ids.next_id();
            state.records.push(EntryRecord {
                id,
                name: name.into(),
                number: number.into(),
                revision: 0,
            });
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// The three sample entries the phonebook ships with in development
    pub fn with_sample_entries() -> Self {
        Self::with_entries([("Bill", "12345"), ("Harriet", "345467"), ("Luke", "456735")])
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn find_all(&self) -> StoreResult<Vec<Entry>> {
        let state = self.state.read().await;
        Ok(state.records.iter().map(EntryRecord::to_entry).collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Entry>> {
        let id = parse_numeric_id(id)?;
        let state = self.state.read().await;
        Ok(state
            .records
            .iter()
            .find(|r| r.id == id)
            .map(EntryRecord::to_entry))
    }

    async fn insert(&self, fields: EntryFields) -> StoreResult<Entry> {
        let mut state = self.state.write().await;
        state.check_unique(&fields, None)?;

        let record = EntryRecord {
            id: state.ids.next_id(),
            name: fields.name,
            number: fields.number,
            revision: 0,
        };
        let entry = record.to_entry();
        state.records.push(record);

        Ok(entry)
    }

    async fn update_by_id(&self, id: &str, fields: EntryFields) -> StoreResult<Option<Entry>> {
        let id = parse_numeric_id(id)?;
        let mut state = self.state.write().await;

        if !state.records.iter().any(|r| r.id == id) {
            return Ok(None);
        }
        state.check_unique(&fields, Some(id))?;

        let record = state.records.iter_mut().find(|r| r.id == id);
        Ok(record.map(|record| {
            record.name = fields.name;
            record.number = fields.number;
            record.revision += 1;
            tracing::trace!(id = record.id, revision = record.revision, "Entry revised");
            record.to_entry()
        }))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<bool> {
        let id = parse_numeric_id(id)?;
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        Ok(state.records.len() != before)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.state.read().await.records.len() as u64)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
