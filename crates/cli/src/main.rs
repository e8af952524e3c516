use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::{init_structured_logging, parse_level, LogSink, LoggingConfig};
use console::style;
use infrastructure::{EndpointConfigValidator, HubSettings, SettingsLoader};
use tracing::debug;

mod commands;
mod util;

use commands::{
    ChatCommand, ConfigCommand, DashboardCommand, EndpointsCommand, FaqCommand, FilesCommand,
    HubContext, JiraCommand, JsonCompareCommand, PipelinesCommand, PromptCommand, RunCommand,
    ToolsCommand, UrlCommand,
};

#[derive(Parser)]
#[command(name = "qahub")]
#[command(about = "QA Hub - endpoint monitor, QA AI tools and build pipelines")]
#[command(version)]
struct Cli {
    /// Backend base URL for this run only; the saved config is untouched
    #[arg(long, global = true, env = "QAHUB_BASE_URL")]
    base_url: Option<String>,

    /// error, warn, info, debug or trace
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Endpoint configuration
    Config(ConfigCommand),
    /// Endpoint monitor
    #[command(alias = "ep")]
    Endpoints(EndpointsCommand),
    /// List the QA tools
    Tools(ToolsCommand),
    /// Show the prompt a tool would send
    Prompt(PromptCommand),
    /// Run a QA tool
    Run(RunCommand),
    /// Load a Jira story
    Jira(JiraCommand),
    /// Summarize a web page
    Url(UrlCommand),
    /// Upload files for a tool
    Files(FilesCommand),
    /// Compare two JSON files
    JsonCompare(JsonCompareCommand),
    /// Chat with the QA chatbot
    Chat(ChatCommand),
    /// Build pipelines
    Pipelines(PipelinesCommand),
    /// FAQ and support contacts
    Faq(FaqCommand),
    /// Interactive dashboard (default)
    #[command(alias = "ui")]
    Dashboard(DashboardCommand),
}

fn init_logging(cli: &Cli, settings: &HubSettings, interactive: bool) -> Result<()> {
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(settings.logging.level.as_str());

    // The dashboard owns the terminal, so its log goes to a file
    let sink = if interactive {
        LogSink::File(util::log_file(settings))
    } else {
        LogSink::Stderr
    };

    init_structured_logging(LoggingConfig {
        level: parse_level(level),
        json_output: settings.logging.json,
        color_output: console::colors_enabled_stderr(),
        sink,
    })
}

async fn run(cli: Cli) -> Result<()> {
    let settings = SettingsLoader::new()
        .load()
        .await
        .context("Failed to load settings")?;

    let interactive = matches!(cli.command, None | Some(Commands::Dashboard(_)));
    init_logging(&cli, &settings, interactive)?;
    EndpointConfigValidator::new()
        .validate_settings(&settings)
        .context("Invalid settings")?;
    debug!(home = %settings.hub_home().display(), "Settings loaded");

    let ctx = HubContext::new(settings, cli.base_url.clone());

    match cli.command {
        Some(Commands::Config(cmd)) => cmd.execute(&ctx).await,
        Some(Commands::Endpoints(cmd)) => cmd.execute(&ctx).await,
        Some(Commands::Tools(cmd)) => cmd.execute(&ctx).await,
        Some(Commands::Prompt(cmd)) => cmd.execute(&ctx).await,
        Some(Commands::Run(cmd)) => cmd.execute(&ctx).await,
        Some(Commands::Jira(cmd)) => cmd.execute(&ctx).await,
        Some(Commands::Url(cmd)) => cmd.execute(&ctx).await,
        Some(Commands::Files(cmd)) => cmd.execute(&ctx).await,
        Some(Commands::JsonCompare(cmd)) => cmd.execute(&ctx).await,
        Some(Commands::Chat(cmd)) => cmd.execute(&ctx).await,
        Some(Commands::Pipelines(cmd)) => cmd.execute(&ctx).await,
        Some(Commands::Faq(cmd)) => cmd.execute(),
        Some(Commands::Dashboard(cmd)) => cmd.execute(&ctx).await,
        None => DashboardCommand { page_size: None }.execute(&ctx).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", style("❌").red(), e);
        std::process::exit(1);
    }
}
