use super::KeyValueStore;
use crate::error::{AdvisorError, Result};
use sled::Db;
use std::path::Path;

/// Durable store backed by an embedded `sled` database
///
/// Every write is flushed before returning so a crash right after
/// `set` does not lose the conversation.
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// Open or create a store at `path`
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Storage` if the database cannot be opened
    ///
    /// # Examples
    ///
    /// ```
    /// use advisor_chat::storage::{KeyValueStore, SledStore};
    ///
    /// # fn main() -> advisor_chat::error::Result<()> {
    /// let dir = tempfile::tempdir()?;
    /// let store = SledStore::open(dir.path().join("conversation.sled"))?;
    /// store.set("greeting", "hello")?;
    /// assert_eq!(store.get("greeting")?, Some("hello".to_string()));
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AdvisorError::Storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        let db = sled::open(path)
            .map_err(|e| AdvisorError::Storage(format!("Failed to open database: {}", e)))?;
        tracing::debug!(path = %path.display(), "Opened conversation store");
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| AdvisorError::Storage(format!("Get failed: {}", e)))?;

        match value {
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    AdvisorError::Storage(format!("Stored value is not UTF-8: {}", e))
                })?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| AdvisorError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| AdvisorError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}
