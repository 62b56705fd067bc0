//! Record-storage collaborator for the project intake tracker.
//!
//! The workflow engine never talks to a backend directly; it consumes the
//! [`ProjectStore`] and [`HistoryStore`] traits defined here and produces
//! partial-field payloads for `update`. The [`MemoryStore`] implementation
//! backs tests and embedders that need no external storage.

pub mod memory;
pub mod query;
pub mod store;

pub use memory::MemoryStore;
pub use query::{ProjectListParams, ProjectPage, SortField, SortOrder};
pub use store::{HistoryStore, ProjectStore};
