//! PulseTrack data model
//!
//! - **entries**: The three entry kinds (workout, calorie, weight)
//! - **state**: `AppState`, the in-memory aggregate of all three collections
//! - **date**: Date formatting and lenient date parsing for ordering
//!
//! Entries are immutable once created. The only mutations are prepending a
//! new entry to its collection or clearing every collection at once.

pub mod date;
pub mod entries;
pub mod state;

pub use date::{format_date, parse_date, DATE_FORMAT};
pub use entries::{CalorieEntry, Intensity, WeightEntry, WorkoutEntry};
pub use state::AppState;
