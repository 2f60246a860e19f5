//! Application configuration management.
//!
//! The configuration file is written by the user and never modified by
//! the program. It holds the API secret pair and the location of the
//! account state file.
//!
//! Lookup order: `$BANKDATA_CONFIG`, then `./conf.json`, then
//! `~/.config/bankdata/conf.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Application name used for the config directory path
const APP_NAME: &str = "bankdata";

/// Config file name
const CONFIG_FILE: &str = "conf.json";

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "BANKDATA_CONFIG";

/// Where the bank sends the user after authorizing a requisition.
const DEFAULT_REDIRECT_URL: &str = "http://localhost";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub secret_id: String,
    pub secret_key: String,
    #[serde(rename = "account_file")]
    pub account_file_path: PathBuf,
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,
}

fn default_redirect_url() -> String {
    DEFAULT_REDIRECT_URL.to_string()
}

impl Config {
    /// Load the config from the resolved location.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load the config from an explicit path. Missing or malformed files are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Ok(local);
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_reads_required_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.json");
        std::fs::write(
            &path,
            r#"{"secret_id": "id-1", "secret_key": "key-1", "account_file": "account.json"}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.secret_id, "id-1");
        assert_eq!(config.secret_key, "key-1");
        assert_eq!(config.account_file_path, PathBuf::from("account.json"));
        assert_eq!(config.redirect_url, "http://localhost");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_load_from_missing_field_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.json");
        std::fs::write(&path, r#"{"secret_id": "id-1"}"#).unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
