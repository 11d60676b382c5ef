//! # PulseTrack
//!
//! A local-first tracker for workouts, calorie intake and body weight.
//! Every change is persisted immediately to a local key-value store and the
//! whole view is re-rendered from the new state.
//!
//! ## Modules
//!
//! - [`model`]: Entry records and the `AppState` container
//! - [`builder`]: Typed form input and entry construction
//! - [`storage`]: Key-value media and whole-state persistence
//! - [`summary`]: Workout count, calorie total, latest weight
//! - [`render`]: View model projection, HTML and text output
//! - [`dispatch`]: The `Tracker` and its fixed event pipeline
//! - [`export`]: CSV export
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulsetrack::builder::{NumericPolicy, WorkoutForm};
//! use pulsetrack::dispatch::{SystemClock, Tracker};
//! use pulsetrack::render::LastFrame;
//! use pulsetrack::storage::{FileStore, PersistentStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PersistentStore::new(FileStore::open("./pulsetrack_data")?);
//!     let mut tracker = Tracker::open(store, LastFrame::new(), SystemClock, NumericPolicy::Reject)?;
//!
//!     let mut form = WorkoutForm {
//!         name: "Morning run".into(),
//!         duration: "30".into(),
//!         intensity: "medium".into(),
//!         notes: String::new(),
//!     };
//!     tracker.submit_workout(&mut form)?;
//!
//!     if let Some(view) = tracker.view().frame() {
//!         println!("{}", view.to_text());
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod dispatch;
pub mod export;
pub mod format;
pub mod model;
pub mod render;
pub mod storage;
pub mod summary;

// Re-export top-level types for convenience
pub use model::{AppState, CalorieEntry, Intensity, WeightEntry, WorkoutEntry};

pub use builder::{
    BuildError, BuildResult, CalorieForm, EntryBuilder, NumericPolicy, WeightForm, WorkoutForm,
    NO_NOTES,
};

pub use storage::{
    BackendKind, FileStore, KeyValueStore, MemoryStore, PersistentStore, SqliteStore,
    StorageError, StorageResult,
};

pub use summary::{compute_summary, Summary};

pub use render::{render_all, LastFrame, ListView, RenderedView, Row, SummaryView, ViewSink};

pub use dispatch::{
    Clock, DispatchError, DispatchResult, Event, FixedClock, SystemClock, Tracker, Trigger,
};

pub use export::{write_csv, ExportError, ExportKind};

pub use config::{Config, ConfigError, InputConfig, LoggingConfig, StorageConfig};
