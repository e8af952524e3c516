pub mod loader;
pub mod settings;
pub mod validator;

pub use loader::{SettingsLoader, SettingsSource};
pub use settings::{HubSettings, LoggingSettings, MonitorSettings, NetworkSettings};
pub use validator::{EndpointConfigValidator, ValidationWarning};
