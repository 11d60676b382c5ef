//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::builder::NumericPolicy;
use crate::storage::{open_backend, BackendKind, KeyValueStore, StorageResult, DEFAULT_KEY};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how the document is persisted
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_key")]
    pub key: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("pulsetrack").to_string_lossy().to_string())
        .unwrap_or_else(|| "./pulsetrack_data".to_string())
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: default_data_dir(),
            key: default_key(),
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~` expanded
    pub fn data_path(&self) -> PathBuf {
        match self.data_dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.data_dir)),
            None => PathBuf::from(&self.data_dir),
        }
    }

    /// Open the configured backend
    pub fn open_backend(&self) -> StorageResult<Box<dyn KeyValueStore>> {
        open_backend(self.backend, &self.data_path())
    }
}

/// Form input handling
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub numeric_policy: NumericPolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first readable file among `paths`, falling back to the
    /// environment alone
    pub fn load_first(paths: &[PathBuf]) -> Self {
        for path in paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("pulsetrack").join("config.toml")),
            Some(PathBuf::from("./pulsetrack.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Storage overrides
        if let Some(data_dir) = var("PULSETRACK_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Some(backend) = var("PULSETRACK_BACKEND") {
            match backend.parse() {
                Ok(kind) => self.storage.backend = kind,
                Err(e) => tracing::warn!("Ignoring PULSETRACK_BACKEND: {}", e),
            }
        }

        // Input overrides
        if let Some(policy) = var("PULSETRACK_NUMERIC_POLICY") {
            match policy.parse() {
                Ok(policy) => self.input.numeric_policy = policy,
                Err(e) => tracing::warn!("Ignoring PULSETRACK_NUMERIC_POLICY: {}", e),
            }
        }

        // Logging overrides
        if let Some(level) = var("PULSETRACK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("PULSETRACK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# PulseTrack Configuration
#
# Environment variables override these settings:
# - PULSETRACK_DATA_DIR
# - PULSETRACK_BACKEND
# - PULSETRACK_NUMERIC_POLICY
# - PULSETRACK_LOG_LEVEL
# - PULSETRACK_LOG_FORMAT

[storage]
# Persistence medium: file, sqlite or memory
backend = "file"

# Directory holding the stored document
data_dir = "~/.local/share/pulsetrack"

# Key the document is stored under
key = "pulseTrackData"

[input]
# What to do with numbers that do not parse:
#   reject       - refuse the entry (default)
#   zero         - store 0
#   pass_through - store NaN and keep unparsed text as entered
numeric_policy = "reject"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage.backend, BackendKind::File);
        assert_eq!(config.storage.key, "pulseTrackData");
        assert_eq!(config.input.numeric_policy, NumericPolicy::Reject);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.storage.backend, BackendKind::File);
        assert_eq!(config.input.numeric_policy, NumericPolicy::Reject);
        assert_eq!(config.logging.format, "pretty");

        let home = dirs::home_dir().unwrap_or_default();
        if home.as_os_str().is_empty() {
            return;
        }
        assert_eq!(
            config.storage.data_path(),
            home.join(".local/share/pulsetrack")
        );
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [storage]
            backend = "sqlite"

            [input]
            numeric_policy = "pass_through"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, BackendKind::Sqlite);
        assert_eq!(config.storage.key, "pulseTrackData");
        assert_eq!(config.input.numeric_policy, NumericPolicy::PassThrough);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();

        let missing = Config::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[storage]\nbackend = \"floppy\"\n").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_first_skips_broken_files() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[storage\n").unwrap();
        std::fs::write(&good, "[storage]\nkey = \"fromFile\"\n").unwrap();

        let config = Config::load_first(&[dir.path().join("absent.toml"), broken, good]);
        assert_eq!(config.storage.key, "fromFile");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PULSETRACK_DATA_DIR", "/tmp/pt"),
            ("PULSETRACK_BACKEND", "memory"),
            ("PULSETRACK_NUMERIC_POLICY", "zero"),
            ("PULSETRACK_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.storage.data_path(), PathBuf::from("/tmp/pt"));
        assert_eq!(config.storage.backend, BackendKind::Memory);
        assert_eq!(config.input.numeric_policy, NumericPolicy::Zero);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|name| (name == "PULSETRACK_BACKEND").then(|| "tape".to_string()));
        assert_eq!(config.storage.backend, BackendKind::File);
    }

    #[test]
    fn test_open_configured_backend() {
        let dir = tempdir().unwrap();
        let config = StorageConfig {
            backend: BackendKind::Sqlite,
            data_dir: dir.path().to_string_lossy().to_string(),
            key: default_key(),
        };

        let mut backend = config.open_backend().unwrap();
        backend.set(&config.key, "{}").unwrap();
        assert!(dir.path().join("pulsetrack.db").exists());
    }
}
