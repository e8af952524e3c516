use super::ConfigStorage;
use common::HubResult;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Process-local storage, used by tests and `--no-persist` style runs
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.values.lock().insert(key.to_string(), value.to_string());
        storage
    }
}

impl ConfigStorage for MemoryStorage {
    fn read(&self, key: &str) -> HubResult<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> HubResult<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> HubResult<()> {
        self.values.lock().remove(key);
        Ok(())
    }
}
