//! Test utilities for Advisor Chat
//!
//! Temporary directories, throwaway sled stores, and sample config.

use crate::storage::SledStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content and return its path
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Open a sled store inside a fresh temporary directory
///
/// Keep the `TempDir` alive for as long as the store is used.
pub fn temp_sled_store() -> (SledStore, TempDir) {
    let dir = temp_dir();
    let store =
        SledStore::open(dir.path().join("conversation.sled")).expect("Failed to open sled store");
    (store, dir)
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
relay:
  bind: 127.0.0.1:0
  upstream_url: http://127.0.0.1:4010/v1/chat/completions
  api_key_env: ADVISOR_TEST_API_KEY
client:
  relay_url: http://127.0.0.1:8787/
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::KeyValueStore;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_temp_sled_store_is_usable() {
        let (store, _dir) = temp_sled_store();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_test_config_yaml() {
        let config: Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert_eq!(config.relay.api_key_env, "ADVISOR_TEST_API_KEY");
        assert!(config.validate().is_ok());
    }
}
