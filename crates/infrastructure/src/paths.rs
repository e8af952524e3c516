use std::path::PathBuf;

/// Environment variable that relocates the hub home directory
pub const HUB_HOME_ENV: &str = "QAHUB_HOME";

/// `$QAHUB_HOME`, else `<config dir>/qahub`, else `./.qahub`
pub fn default_hub_home() -> PathBuf {
    if let Ok(home) = std::env::var(HUB_HOME_ENV) {
        if !home.trim().is_empty() {
            return PathBuf::from(home);
        }
    }
    dirs::config_dir()
        .map(|dir| dir.join("qahub"))
        .unwrap_or_else(|| PathBuf::from(".qahub"))
}
