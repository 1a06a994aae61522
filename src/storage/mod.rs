//! Durable key/value storage for the conversation client
//!
//! The conversation client persists two JSON documents (the message list and
//! the user profile) under fixed keys. Any backend that can get and set a
//! string by key satisfies [`KeyValueStore`].

use crate::error::{AdvisorError, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub mod memory;
pub mod sled_store;

pub use memory::MemoryStore;
pub use sled_store::SledStore;

/// Key holding the JSON array of conversation messages
pub const MESSAGES_KEY: &str = "loreal_chat_messages_v1";

/// Key holding the JSON profile object `{name}`
pub const PROFILE_KEY: &str = "loreal_chat_profile_v1";

/// String key/value store used for client-side persistence
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Default database location inside the platform data directory
///
/// # Errors
///
/// Returns `AdvisorError::Storage` if no home directory can be determined
pub fn default_store_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "advisor", "advisor-chat")
        .ok_or_else(|| AdvisorError::Storage("Could not determine data directory".into()))?;
    Ok(proj_dirs.data_dir().join("conversation.sled"))
}
