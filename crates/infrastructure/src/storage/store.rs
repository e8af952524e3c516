use super::ConfigStorage;
use common::{HubError, HubResult};
use domain::{ConfigField, ConfigRepository, DomainError, DomainResult, EndpointConfig, PartialEndpointConfig};
use parking_lot::RwLock;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Storage key of the persisted endpoint config
pub const CONFIG_STORAGE_KEY: &str = "qaToolsEndpointConfig";

/// Merge a persisted blob over `defaults`.
///
/// Missing blob gives the defaults. A malformed blob, or JSON that is not an
/// object, is logged and ignored.
pub fn resolve_config(persisted: Option<&str>, defaults: &EndpointConfig) -> EndpointConfig {
    let Some(blob) = persisted else {
        return defaults.clone();
    };

    match PartialEndpointConfig::parse(blob) {
        Ok(partial) => partial.merge_over(defaults),
        Err(e) => {
            warn!(error = %e, "Ignoring malformed persisted endpoint config, using defaults");
            defaults.clone()
        }
    }
}

/// Single access point for the endpoint config.
///
/// Reads are served from an in-memory cache; every write replaces the cache
/// with what was written. Other processes writing the same storage are not
/// observed until [`ConfigStore::reload`]; the last writer wins.
pub struct ConfigStore<S: ConfigStorage> {
    storage: S,
    defaults: EndpointConfig,
    cache: RwLock<Option<EndpointConfig>>,
}

impl<S: ConfigStorage> ConfigStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_defaults(storage, EndpointConfig::default())
    }

    pub fn with_defaults(storage: S, defaults: EndpointConfig) -> Self {
        Self {
            storage,
            defaults,
            cache: RwLock::new(None),
        }
    }

    pub fn defaults(&self) -> &EndpointConfig {
        &self.defaults
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Resolved config. Storage read failures fall back to defaults.
    pub fn get(&self) -> EndpointConfig {
        if let Some(cached) = self.cache.read().as_ref() {
            return cached.clone();
        }

        let persisted = match self.storage.read(CONFIG_STORAGE_KEY) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "Could not read persisted endpoint config");
                None
            }
        };
        let resolved = resolve_config(persisted.as_deref(), &self.defaults);

        *self.cache.write() = Some(resolved.clone());
        debug!(base_url = %resolved.base_url, "Endpoint config loaded");
        resolved
    }

    /// Persist the full config and replace the cache
    pub fn set(&self, config: &EndpointConfig) -> HubResult<()> {
        let json = config
            .to_json()
            .map_err(|e| HubError::Serialization(e.to_string()))?;
        self.storage.write(CONFIG_STORAGE_KEY, &json)?;
        *self.cache.write() = Some(config.clone());
        info!(base_url = %config.base_url, "Endpoint configuration saved");
        Ok(())
    }

    pub fn set_field(&self, field: ConfigField, value: &str) -> HubResult<EndpointConfig> {
        let mut config = self.get();
        config.set(field, value);
        self.set(&config)?;
        Ok(config)
    }

    /// Remove the persisted override
    pub fn reset(&self) -> HubResult<EndpointConfig> {
        self.storage.remove(CONFIG_STORAGE_KEY)?;
        *self.cache.write() = None;
        info!("Endpoint configuration reset to defaults");
        Ok(self.get())
    }

    /// Drop the cache so the next `get` re-reads storage
    pub fn reload(&self) -> EndpointConfig {
        *self.cache.write() = None;
        self.get()
    }

    /// Persisted blob as stored, if any
    pub fn raw(&self) -> HubResult<Option<String>> {
        self.storage.read(CONFIG_STORAGE_KEY)
    }

    pub fn location(&self) -> Option<PathBuf> {
        self.storage.location(CONFIG_STORAGE_KEY)
    }
}

impl<S: ConfigStorage> ConfigRepository for ConfigStore<S> {
    fn get(&self) -> EndpointConfig {
        ConfigStore::get(self)
    }

    fn set(&self, config: &EndpointConfig) -> DomainResult<()> {
        ConfigStore::set(self, config).map_err(|e| DomainError::Storage(e.to_string()))
    }

    fn reset(&self) -> DomainResult<()> {
        ConfigStore::reset(self)
            .map(|_| ())
            .map_err(|e| DomainError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_resolve_config_cases() {
        let defaults = EndpointConfig::default();
        assert_eq!(resolve_config(None, &defaults), defaults);
        assert_eq!(resolve_config(Some("not json"), &defaults), defaults);
        assert_eq!(resolve_config(Some("[1,2]"), &defaults), defaults);

        let resolved = resolve_config(Some(r#"{"baseUrl":"https://qa.test"}"#), &defaults);
        assert_eq!(resolved.base_url, "https://qa.test");
        assert_eq!(resolved.chatbot_endpoint, defaults.chatbot_endpoint);
    }

    #[test]
    fn test_get_caches_until_write() {
        let store = ConfigStore::new(MemoryStorage::with_value(
            CONFIG_STORAGE_KEY,
            r#"{"baseUrl":"https://one.test"}"#,
        ));
        assert_eq!(store.get().base_url, "https://one.test");

        // Out-of-band change is not seen through the cache
        store
            .storage()
            .write(CONFIG_STORAGE_KEY, r#"{"baseUrl":"https://two.test"}"#)
            .unwrap();
        assert_eq!(store.get().base_url, "https://one.test");
        assert_eq!(store.reload().base_url, "https://two.test");
    }

    #[test]
    fn test_set_replaces_cache_and_is_stable() {
        let store = ConfigStore::new(MemoryStorage::new());
        let mut config = store.get();
        config.lighthouse_endpoint = "/lh".into();

        store.set(&config).unwrap();
        let first = store.raw().unwrap().unwrap();
        store.set(&config).unwrap();
        let second = store.raw().unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(store.get().lighthouse_endpoint, "/lh");
    }

    #[test]
    fn test_reset_returns_defaults() {
        let store = ConfigStore::new(MemoryStorage::new());
        store.set_field(ConfigField::BaseUrl, "https://x.test").unwrap();
        let config = store.reset().unwrap();
        assert_eq!(config, EndpointConfig::default());
        assert!(store.raw().unwrap().is_none());
    }
}
