use domain::{ConfigField, ConfigRepository, EndpointConfig};
use infrastructure::{
    ConfigStore, FileStorage, HubSettings, SettingsLoader, SettingsSource, CONFIG_STORAGE_KEY,
};
use tempfile::TempDir;
use tokio::fs;

fn isolated_loader(path: std::path::PathBuf, prefix: &str) -> SettingsLoader {
    SettingsLoader::new()
        .with_paths_only(vec![path])
        .with_env_prefix(prefix)
        .without_dotenv()
}

#[tokio::test]
async fn test_settings_default_when_no_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let loader = isolated_loader(temp_dir.path().join("qahub.toml"), "QAHUB_TEST_NONE_");

    let (settings, source) = loader.load_with_source().await?;

    assert_eq!(settings, HubSettings::default());
    assert_eq!(source, SettingsSource::Default);
    assert_eq!(settings.monitor.page_size, 8);
    assert_eq!(settings.network.request_timeout_secs, 30);
    Ok(())
}

#[tokio::test]
async fn test_settings_from_toml() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("qahub.toml");

    let toml_content = r#"
home_dir = "/srv/qahub"

[logging]
level = "debug"

[monitor]
refresh_interval_secs = 60
"#;
    fs::write(&path, toml_content).await?;

    let (settings, source) = isolated_loader(path.clone(), "QAHUB_TEST_TOML_")
        .load_with_source()
        .await?;

    assert_eq!(source, SettingsSource::File(path));
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.monitor.refresh_interval_secs, 60);
    assert_eq!(settings.monitor.page_size, 8);
    assert_eq!(settings.hub_home(), std::path::PathBuf::from("/srv/qahub"));
    Ok(())
}

#[tokio::test]
async fn test_settings_from_json_and_broken_file_falls_through() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let broken = temp_dir.path().join("qahub.toml");
    let json = temp_dir.path().join("qahub.json");
    fs::write(&broken, "this is [not toml").await?;
    fs::write(&json, r#"{"network": {"request_timeout_secs": 5}}"#).await?;

    let settings = SettingsLoader::new()
        .with_paths_only(vec![broken, json])
        .with_env_prefix("QAHUB_TEST_JSON_")
        .without_dotenv()
        .load()
        .await?;

    assert_eq!(settings.network.request_timeout_secs, 5);
    Ok(())
}

#[tokio::test]
async fn test_env_overrides_win() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("qahub.toml");
    fs::write(&path, "[logging]\nlevel = \"info\"\n").await?;

    std::env::set_var("QAHUB_TEST_ENV_LOG_LEVEL", "trace");
    std::env::set_var("QAHUB_TEST_ENV_REQUEST_TIMEOUT_SECS", "12");
    std::env::set_var("QAHUB_TEST_ENV_HOME", temp_dir.path());

    let settings = isolated_loader(path, "QAHUB_TEST_ENV_").load().await?;

    assert_eq!(settings.logging.level, "trace");
    assert_eq!(settings.network.request_timeout_secs, 12);
    assert_eq!(settings.hub_home(), temp_dir.path());
    Ok(())
}

#[test]
fn test_config_store_persists_to_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    let store = ConfigStore::new(FileStorage::new(temp_dir.path()));
    assert_eq!(store.get(), EndpointConfig::default());

    store.set_field(ConfigField::BaseUrl, "https://qa.example.com")?;
    store.set_field(ConfigField::Chatbot, "/assistant")?;

    let on_disk = std::fs::read_to_string(temp_dir.path().join(format!("{CONFIG_STORAGE_KEY}.json")))?;
    assert!(on_disk.contains("\"baseUrl\":\"https://qa.example.com\""));

    // A fresh store over the same directory sees the saved values
    let reopened = ConfigStore::new(FileStorage::new(temp_dir.path()));
    let config = reopened.get();
    assert_eq!(config.base_url, "https://qa.example.com");
    assert_eq!(config.chatbot_endpoint, "/assistant");
    assert_eq!(config.tool_url("chatbot"), "https://qa.example.com/assistant");
    Ok(())
}

#[test]
fn test_config_store_recovers_from_corrupt_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join(format!("{CONFIG_STORAGE_KEY}.json")),
        "{\"baseUrl\": ",
    )?;

    let store = ConfigStore::new(FileStorage::new(temp_dir.path()));
    assert_eq!(store.get(), EndpointConfig::default());

    // Saving over the corrupt blob repairs it
    store.set(&EndpointConfig::default())?;
    assert_eq!(store.reload(), EndpointConfig::default());
    Ok(())
}

#[test]
fn test_store_through_repository_trait() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let repo: Box<dyn ConfigRepository> =
        Box::new(ConfigStore::new(FileStorage::new(temp_dir.path())));

    let updated = repo.set_field(ConfigField::JiraIntegration, "/jira")?;
    assert_eq!(updated.jira_integration_endpoint, "/jira");
    repo.reset()?;
    assert_eq!(repo.get().jira_integration_endpoint, "/jira-integration");
    Ok(())
}
