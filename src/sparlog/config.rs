use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const REMOTE_CONFIG_FILENAME: &str = "remote.json";
const DEFAULT_COLLECTION: &str = "sparlog_entries";

/// Connection settings for the shared document store, read once at bootstrap
/// from `remote.json` in the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub api_url: String,
    pub api_key: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl RemoteConfig {
    /// A missing, unreadable, malformed, or credential-less file is the
    /// normal "remote disabled" state, not an error. The `Option` result is
    /// what gets injected into the storage abstraction at bootstrap.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Option<RemoteConfig> {
        let path = data_dir.as_ref().join(REMOTE_CONFIG_FILENAME);
        let content = fs::read_to_string(path).ok()?;
        let config: RemoteConfig = serde_json::from_str(&content).ok()?;
        if config.api_url.trim().is_empty() || config.api_key.trim().is_empty() {
            return None;
        }
        Some(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_disables_remote() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(RemoteConfig::load(dir.path()), None);
    }

    #[test]
    fn malformed_json_disables_remote() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(REMOTE_CONFIG_FILENAME), "{ not json").unwrap();
        assert_eq!(RemoteConfig::load(dir.path()), None);
    }

    #[test]
    fn missing_credential_disables_remote() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(REMOTE_CONFIG_FILENAME),
            r#"{"api_url": "https://store.example.com", "api_key": ""}"#,
        )
        .unwrap();
        assert_eq!(RemoteConfig::load(dir.path()), None);
    }

    #[test]
    fn valid_config_loads_with_default_collection() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(REMOTE_CONFIG_FILENAME),
            r#"{"api_url": "https://store.example.com", "api_key": "k-123"}"#,
        )
        .unwrap();
        let config = RemoteConfig::load(dir.path()).unwrap();
        assert_eq!(config.api_url, "https://store.example.com");
        assert_eq!(config.collection, DEFAULT_COLLECTION);
    }
}
