pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateEntryCommand, CreateEntryError, DeleteEntryCommand, DeleteEntryError,
    DeleteEntryResponse, UpdateEntryCommand, UpdateEntryError,
};

pub use queries::{
    GetEntryError, GetEntryQuery, InfoError, InfoQuery, InfoResponse, ListEntriesError,
    ListEntriesQuery,
};

pub use routes::{entries_routes, info_routes};
