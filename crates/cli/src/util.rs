use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use infrastructure::HubSettings;
use std::path::PathBuf;
use std::time::Duration;

/// Set to any value to disable spinners (tests, CI logs)
pub const NO_ANIM_ENV: &str = "QAHUB_NO_ANIM";

/// Hub home from settings, created on first use
pub fn hub_home(settings: &HubSettings) -> PathBuf {
    let dir = settings.hub_home();
    std::fs::create_dir_all(&dir).ok();
    dir
}

pub fn log_file(settings: &HubSettings) -> PathBuf {
    hub_home(settings).join("qahub.log")
}

/// Spinner on stderr; hidden when animations are off or stderr is not a terminal
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let animated = std::env::var_os(NO_ANIM_ENV).is_none() && console::user_attended_stderr();
    let bar = if animated {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };

    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
    {
        bar.set_style(spinner_style);
    }
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

pub fn success(message: impl std::fmt::Display) {
    println!("{} {}", style("✅").green(), message);
}

pub fn warning(message: impl std::fmt::Display) {
    println!("{} {}", style("⚠").yellow(), style(message).yellow());
}

pub fn heading(title: &str) {
    println!("{}", style(title).cyan().bold());
}

/// Pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
