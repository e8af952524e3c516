use super::settings::HubSettings;
use anyhow::{bail, Result};
use domain::{ConfigField, EndpointConfig};
use std::fmt;
use tracing::warn;

/// A problem worth showing next to a config field. Never blocks a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub field: ConfigField,
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.key(), self.message)
    }
}

#[derive(Debug, Default)]
pub struct EndpointConfigValidator;

impl EndpointConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &EndpointConfig) -> Vec<ValidationWarning> {
        let warnings: Vec<ValidationWarning> = config
            .entries()
            .filter_map(|(field, value)| Self::check_field(field, value))
            .collect();

        for warning in &warnings {
            warn!(field = warning.field.key(), "{}", warning.message);
        }
        warnings
    }

    fn check_field(field: ConfigField, value: &str) -> Option<ValidationWarning> {
        let message = if value.trim().is_empty() {
            Some("value is empty".to_string())
        } else if field.is_base_url() {
            let is_http = value.starts_with("http://") || value.starts_with("https://");
            if !is_http {
                Some(format!("'{value}' is not an http(s) URL"))
            } else if value.ends_with('/') {
                Some("trailing '/' will produce double slashes in request URLs".to_string())
            } else {
                None
            }
        } else if !value.starts_with('/') {
            Some(format!("path '{value}' should start with '/'"))
        } else {
            None
        };

        message.map(|message| ValidationWarning { field, message })
    }

    /// Settings that cannot work at all are rejected
    pub fn validate_settings(&self, settings: &HubSettings) -> Result<()> {
        if settings.network.request_timeout_secs == 0 {
            bail!("network.request_timeout_secs must be greater than 0");
        }
        if settings.monitor.page_size == 0 {
            bail!("monitor.page_size must be greater than 0");
        }
        if settings.monitor.refresh_interval_secs < 5 {
            warn!(
                "monitor.refresh_interval_secs = {} is very aggressive",
                settings.monitor.refresh_interval_secs
            );
        }
        Ok(())
    }
}
