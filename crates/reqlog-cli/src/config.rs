//! Global CLI configuration management
//!
//! Stores connection defaults in ~/.reqlog/config.json

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Database used when nothing else is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./requests.db?mode=ro";

/// API root that stored request paths are relative to
pub const DEFAULT_BASE_URL: &str = "https://api.moonshot.cn";

/// Global CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReqlogConfig {
    /// Request log database URL
    #[serde(default)]
    pub database_url: Option<String>,
    /// Base URL used when reconstructing request URLs
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the config file path
    fn get_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".reqlog").join("config.json"))
    }

    /// Load the configuration from disk
    pub fn load() -> Result<ReqlogConfig> {
        let path = Self::get_config_path()?;
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file, defaulting when it is missing
    pub fn load_from(path: &Path) -> Result<ReqlogConfig> {
        if !path.exists() {
            return Ok(ReqlogConfig::default());
        }

        let json =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;

        let config: ReqlogConfig = serde_json::from_str(&json)
            .context(format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }
}

/// Effective settings after merging flags, environment and the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub base_url: String,
}

impl Settings {
    /// Flags and environment win over the config file, which wins over defaults
    pub fn resolve(
        database_url: Option<String>,
        base_url: Option<String>,
        file: ReqlogConfig,
    ) -> Self {
        Self {
            database_url: database_url
                .or(file.database_url)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            base_url: base_url
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigManager::load_from(&dir.path().join("config.json")).unwrap();

        assert!(config.database_url.is_none());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"database_url":"postgres://log@db/requests"}"#).unwrap();

        let config = ConfigManager::load_from(&path).unwrap();
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://log@db/requests")
        );
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(ConfigManager::load_from(&path).is_err());
    }

    #[test]
    fn test_resolve_precedence() {
        let file = ReqlogConfig {
            database_url: Some("sqlite://file.db".to_string()),
            base_url: Some("https://file.example".to_string()),
        };

        let settings = Settings::resolve(Some("sqlite://flag.db".to_string()), None, file);
        assert_eq!(settings.database_url, "sqlite://flag.db");
        assert_eq!(settings.base_url, "https://file.example");

        let settings = Settings::resolve(None, None, ReqlogConfig::default());
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }
}
