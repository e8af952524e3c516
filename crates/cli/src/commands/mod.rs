pub mod config;
pub mod dashboard;
pub mod endpoints;
pub mod help;
pub mod integrations;
pub mod pipelines;
pub mod tools;

pub use config::ConfigCommand;
pub use dashboard::DashboardCommand;
pub use endpoints::EndpointsCommand;
pub use help::FaqCommand;
pub use integrations::{FilesCommand, JiraCommand, UrlCommand};
pub use pipelines::PipelinesCommand;
pub use tools::{ChatCommand, JsonCompareCommand, PromptCommand, RunCommand, ToolsCommand};

use crate::util;
use anyhow::{anyhow, Context, Result};
use client::{ClientError, HubClient};
use common::HubError;
use domain::EndpointConfig;
use infrastructure::{ConfigStore, FileStorage, HubSettings};
use std::sync::Arc;
use tracing::warn;

/// Shared by every command: settings, the persisted endpoint config and
/// the one-off `--base-url` override.
pub struct HubContext {
    pub settings: HubSettings,
    store: Arc<ConfigStore<FileStorage>>,
    base_url: Option<String>,
}

impl HubContext {
    pub fn new(settings: HubSettings, base_url: Option<String>) -> Self {
        let store = ConfigStore::new(FileStorage::new(util::hub_home(&settings)));
        Self {
            settings,
            store: Arc::new(store),
            base_url: base_url.filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn store(&self) -> &Arc<ConfigStore<FileStorage>> {
        &self.store
    }

    pub fn base_url_override(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Persisted config with the override applied; the override is never saved
    pub fn endpoint_config(&self) -> EndpointConfig {
        let mut config = self.store.get();
        if let Some(url) = &self.base_url {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        config
    }

    pub fn client(&self) -> Result<HubClient> {
        HubClient::with_timeout(self.endpoint_config(), self.settings.request_timeout())
            .context("Failed to create HTTP client")
    }
}

/// Logs the full error and keeps the short user-facing text
pub(crate) fn request_failed(err: ClientError) -> anyhow::Error {
    warn!(code = err.error_code(), "Request failed: {}", err);
    anyhow!(HubError::from(err).user_message())
}
