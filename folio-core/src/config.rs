use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory inside a site that holds Folio's config and database.
pub const FOLIO_DIR: &str = ".folio";

/// Config file name inside [`FOLIO_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level Folio configuration, matching `.folio/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub folio: FolioSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub latency: LatencySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolioSection {
    pub version: String,
}

impl Default for FolioSection {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
        }
    }
}

/// Where and under which slot keys data is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Database file name, relative to the `.folio` directory.
    pub database: String,
    pub projects_key: String,
    pub session_key: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            database: "folio.db".to_string(),
            projects_key: "projects".to_string(),
            session_key: "auth_user".to_string(),
        }
    }
}

/// Simulated latency per operation class, in milliseconds. Zero disables it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencySection {
    pub read_ms: u64,
    pub write_ms: u64,
    pub login_ms: u64,
}

impl LatencySection {
    pub fn read(&self) -> Duration {
        Duration::from_millis(self.read_ms)
    }

    pub fn write(&self) -> Duration {
        Duration::from_millis(self.write_ms)
    }

    pub fn login(&self) -> Duration {
        Duration::from_millis(self.login_ms)
    }
}

impl FolioConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config for a site directory. A missing file yields defaults.
    pub fn load(site_dir: &Path) -> Result<Self, ConfigError> {
        let path = site_dir.join(FOLIO_DIR).join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Render the config as TOML, as written by `folio init`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let storage = &self.storage;
        if storage.database.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.database is empty".into()));
        }
        if storage.projects_key.trim().is_empty() || storage.session_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage keys must be non-empty".into()));
        }
        if storage.projects_key == storage.session_key {
            return Err(ConfigError::Invalid(format!(
                "projects_key and session_key must differ (both `{}`)",
                storage.projects_key
            )));
        }
        Ok(())
    }

    /// Absolute path of the database file for a site directory.
    pub fn database_path(&self, site_dir: &Path) -> std::path::PathBuf {
        site_dir.join(FOLIO_DIR).join(&self.storage.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_browser_slot_names() {
        let config = FolioConfig::default();
        assert_eq!(config.storage.projects_key, "projects");
        assert_eq!(config.storage.session_key, "auth_user");
        assert_eq!(config.latency.write(), Duration::ZERO);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = FolioConfig::from_toml("[latency]\nwrite_ms = 500\n").unwrap();
        assert_eq!(config.latency.write_ms, 500);
        assert_eq!(config.latency.read_ms, 0);
        assert_eq!(config.storage.database, "folio.db");
    }

    #[test]
    fn identical_keys_are_rejected() {
        let err = FolioConfig::from_toml(
            "[storage]\nprojects_key = \"slot\"\nsession_key = \"slot\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = FolioConfig::from_toml("[storage\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = FolioConfig::default();
        config.latency.login_ms = 800;
        let text = config.to_toml().unwrap();
        assert_eq!(FolioConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FolioConfig::load(dir.path()).unwrap();
        assert_eq!(config, FolioConfig::default());
        assert_eq!(
            config.database_path(dir.path()),
            dir.path().join(".folio").join("folio.db")
        );
    }
}
