//! Application state
//!
//! `AppState` holds the three entry collections, newest entry first. It is
//! an explicit value owned by the tracker rather than a process-wide
//! singleton; the serialized form of this struct is the persisted document.

use crate::model::entries::{lenient, CalorieEntry, WeightEntry, WorkoutEntry};
use serde::{Deserialize, Serialize};

/// The in-memory aggregate of all entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default, deserialize_with = "lenient::collection")]
    pub workouts: Vec<WorkoutEntry>,
    #[serde(default, deserialize_with = "lenient::collection")]
    pub calories: Vec<CalorieEntry>,
    #[serde(default, deserialize_with = "lenient::collection")]
    pub weights: Vec<WeightEntry>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a workout at the front of its collection
    pub fn prepend_workout(&mut self, entry: WorkoutEntry) {
        self.workouts.insert(0, entry);
    }

    /// Insert a calorie entry at the front of its collection
    pub fn prepend_calorie(&mut self, entry: CalorieEntry) {
        self.calories.insert(0, entry);
    }

    /// Insert a weight entry at the front of its collection
    pub fn prepend_weight(&mut self, entry: WeightEntry) {
        self.weights.insert(0, entry);
    }

    /// Replace all three collections with empty ones
    pub fn clear(&mut self) {
        self.workouts = Vec::new();
        self.calories = Vec::new();
        self.weights = Vec::new();
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty() && self.calories.is_empty() && self.weights.is_empty()
    }

    /// Number of entries across all collections
    pub fn total_entries(&self) -> usize {
        self.workouts.len() + self.calories.len() + self.weights.len()
    }
}
