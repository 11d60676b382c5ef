//! Entry builders
//!
//! Turns raw form input into typed entries. Each entry kind has a form
//! struct holding the raw field values exactly as the UI captured them, and
//! `EntryBuilder` converts a form into an entry:
//!
//! - text fields are trimmed
//! - blank notes become [`NO_NOTES`]
//! - missing dates become today's date
//! - numeric fields are coerced according to the [`NumericPolicy`]
//!
//! Building is a pure transform. Inserting the entry and persisting it is
//! the dispatcher's job.

use crate::model::{format_date, parse_date, CalorieEntry, Intensity, WeightEntry, WorkoutEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Placeholder stored for blank notes
pub const NO_NOTES: &str = "No notes added.";

/// What to do with numeric input that does not parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Refuse the submission
    #[default]
    Reject,
    /// Store `0`
    Zero,
    /// Store NaN (blank input stores `0`), matching the legacy web tracker
    PassThrough,
}

impl std::fmt::Display for NumericPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericPolicy::Reject => write!(f, "reject"),
            NumericPolicy::Zero => write!(f, "zero"),
            NumericPolicy::PassThrough => write!(f, "pass_through"),
        }
    }
}

impl FromStr for NumericPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "reject" => Ok(NumericPolicy::Reject),
            "zero" => Ok(NumericPolicy::Zero),
            "pass_through" | "passthrough" => Ok(NumericPolicy::PassThrough),
            other => Err(format!("unknown numeric policy: {}", other)),
        }
    }
}

/// Reasons a form cannot become an entry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a number, got {raw:?}")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("date {0:?} is not a valid date")]
    InvalidDate(String),

    #[error("unknown intensity {0:?} (expected low, medium or high)")]
    UnknownIntensity(String),
}

/// Result type alias for builder operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Raw workout form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutForm {
    pub name: String,
    pub duration: String,
    pub intensity: String,
    pub notes: String,
}

impl WorkoutForm {
    /// Field names the form submits
    pub const FIELDS: [&'static str; 4] = ["name", "duration", "intensity", "notes"];

    /// Collect values by field name; unknown names are ignored
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut form = Self::default();
        for (name, value) in fields {
            match name {
                "name" => form.name = value.to_string(),
                "duration" => form.duration = value.to_string(),
                "intensity" => form.intensity = value.to_string(),
                "notes" => form.notes = value.to_string(),
                _ => {}
            }
        }
        form
    }

    /// Blank every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Raw calorie form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalorieForm {
    pub meal: String,
    pub calories: String,
    pub time: String,
}

impl CalorieForm {
    pub const FIELDS: [&'static str; 3] = ["meal", "calories", "time"];

    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut form = Self::default();
        for (name, value) in fields {
            match name {
                "meal" => form.meal = value.to_string(),
                "calories" => form.calories = value.to_string(),
                "time" => form.time = value.to_string(),
                _ => {}
            }
        }
        form
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Raw weight form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightForm {
    pub weight: String,
    pub date: String,
    pub notes: String,
}

impl WeightForm {
    pub const FIELDS: [&'static str; 3] = ["weight", "date", "notes"];

    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut form = Self::default();
        for (name, value) in fields {
            match name {
                "weight" => form.weight = value.to_string(),
                "date" => form.date = value.to_string(),
                "notes" => form.notes = value.to_string(),
                _ => {}
            }
        }
        form
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Converts forms into entries
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryBuilder {
    policy: NumericPolicy,
}

impl EntryBuilder {
    pub fn new(policy: NumericPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> NumericPolicy {
        self.policy
    }

    pub fn build_workout(&self, form: &WorkoutForm) -> BuildResult<WorkoutEntry> {
        Ok(WorkoutEntry {
            name: form.name.trim().to_string(),
            duration: self.coerce_number("duration", &form.duration)?,
            intensity: self.coerce_intensity(&form.intensity)?,
            notes: notes_or_placeholder(&form.notes),
        })
    }

    /// Calorie entries are always dated `today`
    pub fn build_calorie(&self, form: &CalorieForm, today: NaiveDate) -> BuildResult<CalorieEntry> {
        Ok(CalorieEntry {
            meal: form.meal.trim().to_string(),
            calories: self.coerce_number("calories", &form.calories)?,
            time: form.time.trim().to_string(),
            date: format_date(today),
        })
    }

    /// Weight entries take the form's date, or `today` when it is blank
    pub fn build_weight(&self, form: &WeightForm, today: NaiveDate) -> BuildResult<WeightEntry> {
        Ok(WeightEntry {
            weight: self.coerce_number("weight", &form.weight)?,
            date: self.coerce_date(&form.date, today)?,
            notes: notes_or_placeholder(&form.notes),
        })
    }

    fn coerce_number(&self, field: &'static str, raw: &str) -> BuildResult<f64> {
        let trimmed = raw.trim();
        if let Some(value) = trimmed.parse::<f64>().ok().filter(|v| v.is_finite()) {
            return Ok(value);
        }

        match self.policy {
            NumericPolicy::Reject if trimmed.is_empty() => Err(BuildError::MissingField(field)),
            NumericPolicy::Reject => Err(BuildError::InvalidNumber {
                field,
                raw: raw.to_string(),
            }),
            NumericPolicy::Zero => Ok(0.0),
            NumericPolicy::PassThrough if trimmed.is_empty() => Ok(0.0),
            // Non-finite values persist as `null` and reload as NaN, so
            // `inf` and `nan` are stored as NaN up front
            NumericPolicy::PassThrough => Ok(f64::NAN),
        }
    }

    fn coerce_date(&self, raw: &str, today: NaiveDate) -> BuildResult<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(format_date(today));
        }

        match parse_date(trimmed) {
            Some(dt) => Ok(format_date(dt.date())),
            None => match self.policy {
                NumericPolicy::Reject => Err(BuildError::InvalidDate(trimmed.to_string())),
                NumericPolicy::Zero => Ok(format_date(today)),
                NumericPolicy::PassThrough => Ok(trimmed.to_string()),
            },
        }
    }

    fn coerce_intensity(&self, raw: &str) -> BuildResult<Intensity> {
        let trimmed = raw.trim();
        if let Some(intensity) = Intensity::parse(trimmed) {
            return Ok(intensity);
        }

        match self.policy {
            NumericPolicy::Reject if trimmed.is_empty() => Err(BuildError::MissingField("intensity")),
            NumericPolicy::Reject => Err(BuildError::UnknownIntensity(trimmed.to_string())),
            _ => Ok(Intensity::Other(trimmed.to_string())),
        }
    }
}

fn notes_or_placeholder(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        NO_NOTES.to_string()
    } else {
        trimmed.to_string()
    }
}
