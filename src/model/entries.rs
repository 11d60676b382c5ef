//! Entry records
//!
//! - `WorkoutEntry`: a completed workout (name, duration, intensity, notes)
//! - `CalorieEntry`: a meal with its calorie count
//! - `WeightEntry`: a body weight measurement
//!
//! Deserialization is lenient: a document written by another front-end may
//! omit fields, use `null`, or store numbers as strings. Missing text becomes
//! `""` and missing or unreadable numbers become NaN, so one odd entry never
//! discards the rest of the document.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// How hard a workout was
///
/// Values outside the known set are kept verbatim in `Other` so documents
/// written elsewhere survive a load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Intensity {
    Low,
    Medium,
    High,
    Other(String),
}

impl Intensity {
    /// Parse one of the known intensities (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Intensity::Low),
            "medium" => Some(Intensity::Medium),
            "high" => Some(Intensity::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
            Intensity::Other(raw) => raw,
        }
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity::Other(String::new())
    }
}

impl From<String> for Intensity {
    fn from(value: String) -> Self {
        Intensity::parse(&value).unwrap_or(Intensity::Other(value))
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Intensity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Intensity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::text(deserializer).map(Intensity::from)
    }
}

/// A logged workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Duration in minutes
    #[serde(default = "lenient::missing_number", deserialize_with = "lenient::number")]
    pub duration: f64,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,
}

/// A logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub meal: String,
    #[serde(default = "lenient::missing_number", deserialize_with = "lenient::number")]
    pub calories: f64,
    /// Free-form time of day, usually `HH:MM`, may be empty
    #[serde(default, deserialize_with = "lenient::text")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
}

/// A logged body weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    #[serde(default = "lenient::missing_number", deserialize_with = "lenient::number")]
    pub weight: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,
}

/// Tolerant field decoders shared by the entry types and `AppState`
pub(crate) mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn missing_number() -> f64 {
        f64::NAN
    }

    /// Numbers, numeric strings, and `null` (how non-finite values are written)
    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    /// A missing, `null` or non-array collection is an empty one
    ///
    /// Elements are decoded one at a time; an element that is not an entry
    /// is skipped without affecting its neighbours or the other collections.
    pub fn collection<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items,
            Value::Null => return Ok(Vec::new()),
            other => {
                tracing::warn!(found = %other, "Collection is not an array, treating it as empty");
                return Ok(Vec::new());
            }
        };

        Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .collect())
    }
}
