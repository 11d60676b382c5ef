//! Persisted document
//!
//! The whole `AppState` is stored as one JSON object under one fixed key:
//!
//! ```text
//! pulseTrackData → { "workouts": [...], "calories": [...], "weights": [...] }
//! ```
//!
//! There is no version marker. Unknown fields are ignored and missing ones
//! default to empty, so documents from older or newer front-ends load as-is.

use crate::model::AppState;
use crate::storage::backend::KeyValueStore;
use crate::storage::error::StorageResult;

/// Key the document lives under
pub const DEFAULT_KEY: &str = "pulseTrackData";

/// Snapshot/restore of `AppState` through a key-value medium
#[derive(Debug)]
pub struct PersistentStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> PersistentStore<S> {
    /// Store under the default key
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Serialize the full state and write it under the key
    pub fn save(&mut self, state: &AppState) -> StorageResult<()> {
        let content = serde_json::to_string(state)?;
        self.backend.set(&self.key, &content)?;
        tracing::debug!(
            key = %self.key,
            bytes = content.len(),
            entries = state.total_entries(),
            "Saved state"
        );
        Ok(())
    }

    /// Read the state back
    ///
    /// A missing key yields an empty state. A document that cannot be
    /// decoded is logged and also yields an empty state; the stored bytes
    /// stay untouched until the next save replaces them.
    pub fn load(&self) -> StorageResult<AppState> {
        let Some(content) = self.backend.get(&self.key)? else {
            tracing::debug!(key = %self.key, "No stored state, starting empty");
            return Ok(AppState::new());
        };

        let state = decode_document(&content).unwrap_or_else(|reason| {
            tracing::warn!(key = %self.key, %reason, "Stored state is malformed, starting empty");
            AppState::new()
        });

        tracing::info!(
            workouts = state.workouts.len(),
            calories = state.calories.len(),
            weights = state.weights.len(),
            "Loaded state"
        );
        Ok(state)
    }

    /// Delete the stored document
    pub fn remove(&mut self) -> StorageResult<()> {
        self.backend.remove(&self.key)
    }
}

/// Decode a stored document, explaining why when it is unusable
fn decode_document(content: &str) -> Result<AppState, String> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;

    if !value.is_object() {
        return Err(format!("expected a JSON object, found {}", json_kind(&value)));
    }

    serde_json::from_value(value).map_err(|e| e.to_string())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
