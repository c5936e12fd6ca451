pub mod models;
pub mod service;

pub use models::{CreateEntryDto, Entry, EntryKind, EntryResponse, NewEntry};
pub use service::EntryService;
