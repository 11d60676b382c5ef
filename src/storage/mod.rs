//! PulseTrack Storage
//!
//! This module persists `AppState` across restarts:
//!
//! - **backend**: The `KeyValueStore` trait and the file/memory media
//! - **sqlite**: SQLite-backed `KeyValueStore`
//! - **document**: Whole-state snapshot/restore under one fixed key
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Save:  AppState → serde_json → KeyValueStore::set("pulseTrackData")
//! Load:  KeyValueStore::get("pulseTrackData") → lenient decode → AppState
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use pulsetrack::model::AppState;
//! use pulsetrack::storage::{FileStore, PersistentStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = PersistentStore::new(FileStore::open("./pulsetrack_data")?);
//!
//!     let state = store.load()?;
//!     println!("{} entries on record", state.total_entries());
//!
//!     store.save(&AppState::new())?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod document;
pub mod error;
pub mod sqlite;

pub use backend::{open_backend, BackendKind, FileStore, KeyValueStore, MemoryStore};
pub use document::{PersistentStore, DEFAULT_KEY};
pub use error::{StorageError, StorageResult};
pub use sqlite::SqliteStore;
