//! Repository abstractions. Domain defines the contracts; storage crates
//! implement them.

use crate::config::{ConfigField, EndpointConfig};
use crate::errors::DomainResult;

/// Access to the persisted endpoint configuration
pub trait ConfigRepository: Send + Sync {
    /// Resolved config; never fails, falls back to defaults
    fn get(&self) -> EndpointConfig;

    /// Persist the full config
    fn set(&self, config: &EndpointConfig) -> DomainResult<()>;

    /// Drop the persisted override and return to defaults
    fn reset(&self) -> DomainResult<()>;

    /// Update one field and persist the result
    fn set_field(&self, field: ConfigField, value: &str) -> DomainResult<EndpointConfig> {
        let mut config = self.get();
        config.set(field, value);
        self.set(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemory(Mutex<Option<EndpointConfig>>);

    impl ConfigRepository for InMemory {
        fn get(&self) -> EndpointConfig {
            self.0.lock().unwrap().clone().unwrap_or_default()
        }

        fn set(&self, config: &EndpointConfig) -> DomainResult<()> {
            *self.0.lock().unwrap() = Some(config.clone());
            Ok(())
        }

        fn reset(&self) -> DomainResult<()> {
            *self.0.lock().unwrap() = None;
            Ok(())
        }
    }

    #[test]
    fn test_set_field_persists() {
        let repo = InMemory::default();
        let updated = repo.set_field(ConfigField::BaseUrl, "https://qa.local").unwrap();
        assert_eq!(updated.base_url, "https://qa.local");
        assert_eq!(repo.get().base_url, "https://qa.local");

        repo.reset().unwrap();
        assert_eq!(repo.get(), EndpointConfig::default());
    }
}
