pub mod get;
pub mod info;
pub mod list;

pub use get::{GetEntryError, GetEntryQuery};
pub use info::{InfoError, InfoQuery, InfoResponse};
pub use list::{ListEntriesError, ListEntriesQuery};
