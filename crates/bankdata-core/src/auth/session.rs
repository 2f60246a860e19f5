use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Mutable per-user state, persisted between invocations.
///
/// Absent values are omitted from the file and come back as `None`.
/// Concurrent invocations writing the same file are not supported; the
/// last writer wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    #[serde(rename = "access", default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(rename = "refresh", default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(rename = "requisition", default, skip_serializing_if = "Option::is_none")]
    pub requisition_id: Option<String>,
    #[serde(rename = "account", default, skip_serializing_if = "Option::is_none")]
    pub linked_account_id: Option<String>,
}

impl AccountState {
    /// Load state from disk. A missing file is a first run; an unreadable
    /// one is reported and replaced on the next save.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No account file, starting fresh");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read account file {}", path.display()))?;
        match serde_json::from_str(&contents) {
            Ok(state) => {
                debug!(path = %path.display(), "Account loaded");
                Ok(state)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid account file, starting fresh");
                Ok(Self::default())
            }
        }
    }

    /// Save state to disk, overwriting the previous file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write account file {}", path.display()))?;
        debug!(path = %path.display(), "Account saved");
        Ok(())
    }

    /// The access token, if one is stored. Empty strings count as absent.
    pub fn access(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// The refresh token, if one is stored. Empty strings count as absent.
    pub fn refresh(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_keeps_absent_fields_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("account.json");
        let state = AccountState {
            access_token: Some("acc".to_string()),
            refresh_token: Some("ref".to_string()),
            requisition_id: None,
            linked_account_id: None,
        };

        state.save(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("requisition"));
        assert!(!raw.contains("\"account\""));

        let loaded = AccountState::load(&path).unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.requisition_id, None);
        assert_eq!(loaded.linked_account_id, None);
    }

    #[test]
    fn test_round_trip_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("account.json");
        let state = AccountState {
            access_token: Some("acc".to_string()),
            refresh_token: Some("ref".to_string()),
            requisition_id: Some("req".to_string()),
            linked_account_id: Some("acct".to_string()),
        };
        state.save(&path).unwrap();
        assert_eq!(AccountState::load(&path).unwrap(), state);
    }

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = AccountState::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(state, AccountState::default());
        assert_eq!(state.access(), None);
    }

    #[test]
    fn test_corrupt_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("account.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(AccountState::load(&path).unwrap(), AccountState::default());
    }

    #[test]
    fn test_reads_legacy_file_with_empty_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("account.json");
        std::fs::write(&path, r#"{"access": "", "refresh": ""}"#).unwrap();
        let state = AccountState::load(&path).unwrap();
        assert_eq!(state.access_token.as_deref(), Some(""));
        assert_eq!(state.access(), None);
        assert_eq!(state.refresh(), None);
    }
}
