use super::settings::HubSettings;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsSource {
    File(PathBuf),
    Default,
}

/// `QAHUB_*` variables, prefix stripped and lowercased by envy
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    home: Option<PathBuf>,
    log_level: Option<String>,
    log_json: Option<bool>,
    request_timeout_secs: Option<u64>,
    refresh_interval_secs: Option<u64>,
}

pub struct SettingsLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
    load_dotenv: bool,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self {
            config_paths: Self::default_config_paths(),
            env_prefix: "QAHUB_".to_string(),
            load_dotenv: true,
        }
    }

    /// Only the given files, no standard locations
    pub fn with_paths_only(mut self, paths: Vec<PathBuf>) -> Self {
        self.config_paths = paths;
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn without_dotenv(mut self) -> Self {
        self.load_dotenv = false;
        self
    }

    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("qahub.toml"), PathBuf::from("qahub.json")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("qahub").join("qahub.toml"));
            paths.push(config_dir.join("qahub").join("qahub.json"));
        }

        paths
    }

    pub async fn load(&self) -> Result<HubSettings> {
        self.load_with_source().await.map(|(settings, _)| settings)
    }

    /// First readable file wins, then environment overrides are applied
    pub async fn load_with_source(&self) -> Result<(HubSettings, SettingsSource)> {
        if self.load_dotenv {
            dotenv::dotenv().ok();
        }

        let mut settings = HubSettings::default();
        let mut source = SettingsSource::Default;

        for path in &self.config_paths {
            if !path.exists() {
                continue;
            }
            match self.load_file(path).await {
                Ok(file_settings) => {
                    info!("Loaded settings from: {}", path.display());
                    settings = file_settings;
                    source = SettingsSource::File(path.clone());
                    break;
                }
                Err(e) => {
                    warn!("Failed to load settings from {}: {:#}", path.display(), e);
                }
            }
        }

        let settings = self.apply_env_overrides(settings);
        debug!(?source, "Settings resolved");
        Ok((settings, source))
    }

    async fn load_file(&self, path: &Path) -> Result<HubSettings> {
        let content = fs::read_to_string(path)
            .await
            .context("Failed to read settings file")?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "json" => serde_json::from_str(&content).context("Failed to parse JSON settings"),
            _ => toml::from_str(&content).context("Failed to parse TOML settings"),
        }
    }

    fn apply_env_overrides(&self, mut settings: HubSettings) -> HubSettings {
        let overrides = match envy::prefixed(self.env_prefix.as_str()).from_env::<EnvOverrides>() {
            Ok(overrides) => overrides,
            Err(e) => {
                warn!("Ignoring invalid {}* environment overrides: {}", self.env_prefix, e);
                EnvOverrides::default()
            }
        };

        if let Some(home) = overrides.home.filter(|p| !p.as_os_str().is_empty()) {
            settings.home_dir = Some(home);
        }
        if let Some(level) = overrides.log_level {
            settings.logging.level = level;
        }
        if let Some(json) = overrides.log_json {
            settings.logging.json = json;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            settings.network.request_timeout_secs = secs;
        }
        if let Some(secs) = overrides.refresh_interval_secs {
            settings.monitor.refresh_interval_secs = secs;
        }

        settings
    }
}
