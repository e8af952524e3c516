//! Infrastructure layer: persisted endpoint configuration and application
//! settings.

pub mod config;
pub mod paths;
pub mod storage;

pub use config::{
    EndpointConfigValidator, HubSettings, LoggingSettings, MonitorSettings, NetworkSettings,
    SettingsLoader, SettingsSource, ValidationWarning,
};
pub use paths::default_hub_home;
pub use storage::{
    resolve_config, ConfigStorage, ConfigStore, FileStorage, MemoryStorage, CONFIG_STORAGE_KEY,
};
