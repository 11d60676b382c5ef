//! Summary panel values
//!
//! Derived fresh from `AppState` on every render; nothing here is stored.

use crate::format::{format_grouped, format_number};
use crate::model::{parse_date, AppState, WeightEntry};
use serde::Serialize;
use std::cmp::Ordering;

/// Unit suffix for weights
pub const WEIGHT_UNIT: &str = "lbs";

/// Shown when there is no weight on record
pub const NO_WEIGHT: &str = "--";

/// Aggregates shown in the summary panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub workout_count: usize,
    /// Sum of all calorie entries. NaN if any entry's calories are NaN.
    pub calorie_total: f64,
    /// Weight of the most recently dated entry
    pub latest_weight: Option<f64>,
}

impl Summary {
    pub fn workouts_display(&self) -> String {
        self.workout_count.to_string()
    }

    pub fn calories_display(&self) -> String {
        format_grouped(self.calorie_total)
    }

    pub fn weight_display(&self) -> String {
        match self.latest_weight {
            Some(weight) => format!("{} {}", format_number(weight), WEIGHT_UNIT),
            None => NO_WEIGHT.to_string(),
        }
    }
}

/// Compute the summary for the current state
pub fn compute_summary(state: &AppState) -> Summary {
    Summary {
        workout_count: state.workouts.len(),
        calorie_total: state.calories.iter().map(|entry| entry.calories).sum(),
        latest_weight: latest_weight(&state.weights).map(|entry| entry.weight),
    }
}

/// The entry with the most recent date
///
/// Sorts a copy newest-date-first with a stable sort, so among equal dates
/// the entry earliest in the collection (the most recently added) wins.
/// Entries whose date does not parse sort after every dated entry.
pub fn latest_weight(weights: &[WeightEntry]) -> Option<&WeightEntry> {
    let mut sorted: Vec<&WeightEntry> = weights.iter().collect();
    sorted.sort_by(|a, b| newest_first(&a.date, &b.date));
    sorted.into_iter().next()
}

fn newest_first(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
