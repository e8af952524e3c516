//! Persisted client state.
//!
//! Values are opaque strings stored under a key. The endpoint config is the
//! only key the hub writes today.

mod file;
mod memory;
mod store;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use store::{resolve_config, ConfigStore, CONFIG_STORAGE_KEY};

use common::HubResult;
use std::path::PathBuf;

/// Key/value backend for persisted settings
pub trait ConfigStorage: Send + Sync {
    fn read(&self, key: &str) -> HubResult<Option<String>>;

    fn write(&self, key: &str, value: &str) -> HubResult<()>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> HubResult<()>;

    /// Where `key` lives, for backends that have a location
    fn location(&self, _key: &str) -> Option<PathBuf> {
        None
    }
}
