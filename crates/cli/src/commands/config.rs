use super::{request_failed, HubContext};
use crate::util;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use console::style;
use domain::{ConfigField, EndpointConfig};
use infrastructure::EndpointConfigValidator;
use tracing::info;

#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show the endpoint configuration
    #[command(alias = "list")]
    Show {
        /// Print the stored JSON document
        #[arg(long)]
        json: bool,
    },

    /// Print one field (e.g. baseUrl, chatbot, test-generator)
    Get { field: String },

    /// Update one field and save
    Set { field: String, value: String },

    /// Drop saved changes and return to the defaults
    Reset,

    /// Where the configuration is stored
    Path,

    /// Check the configuration and settings for problems
    #[command(alias = "check")]
    Validate,

    /// Probe the backend health endpoint
    Test,
}

impl ConfigCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Show { json } => show(ctx, *json),
            ConfigSubcommand::Get { field } => {
                let field = parse_field(field)?;
                println!("{}", ctx.store().get().get(field));
                Ok(())
            }
            ConfigSubcommand::Set { field, value } => set(ctx, field, value),
            ConfigSubcommand::Reset => {
                let config = ctx.store().reset().context("Failed to reset configuration")?;
                util::success(format!(
                    "Configuration reset to defaults (base URL {})",
                    config.base_url
                ));
                Ok(())
            }
            ConfigSubcommand::Path => {
                match ctx.store().location() {
                    Some(path) => println!("{}", path.display()),
                    None => println!("(in memory)"),
                }
                Ok(())
            }
            ConfigSubcommand::Validate => validate(ctx),
            ConfigSubcommand::Test => test_connection(ctx).await,
        }
    }
}

fn parse_field(name: &str) -> Result<ConfigField> {
    name.parse::<ConfigField>().with_context(|| {
        let known: Vec<&str> = ConfigField::ALL.iter().map(|f| f.key()).collect();
        format!("Known fields: {}", known.join(", "))
    })
}

fn show(ctx: &HubContext, json: bool) -> Result<()> {
    let config = ctx.store().get();
    if json {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let saved = ctx
        .store()
        .raw()
        .context("Failed to read stored configuration")?
        .is_some();

    util::heading("Endpoint configuration");
    println!(
        "  source: {}",
        if saved { "saved overrides" } else { "defaults" }
    );
    if let Some(url) = ctx.base_url_override() {
        println!("  {} --base-url {} applies to this run only", style("note:").yellow(), url);
    }
    println!();
    print_entries(&config);
    Ok(())
}

fn print_entries(config: &EndpointConfig) {
    for (field, value) in config.entries() {
        println!(
            "  {:<26} {:<24} {}",
            style(field.label()).bold(),
            style(field.key()).dim(),
            value
        );
    }
}

fn set(ctx: &HubContext, field: &str, value: &str) -> Result<()> {
    let field = parse_field(field)?;
    let config = ctx
        .store()
        .set_field(field, value)
        .context("Failed to save configuration")?;
    info!(field = field.key(), "Config field updated");
    util::success(format!("{} = {}", field.key(), config.get(field)));

    for warning in EndpointConfigValidator::new().validate(&config) {
        if warning.field == field {
            util::warning(warning);
        }
    }
    Ok(())
}

fn validate(ctx: &HubContext) -> Result<()> {
    // Settings were already checked at startup
    let warnings = EndpointConfigValidator::new().validate(&ctx.endpoint_config());
    if warnings.is_empty() {
        util::success("Configuration looks good");
    } else {
        for warning in &warnings {
            util::warning(warning);
        }
        println!("{} warning(s)", warnings.len());
    }
    Ok(())
}

async fn test_connection(ctx: &HubContext) -> Result<()> {
    let client = ctx.client()?;
    let base_url = client.config().base_url.clone();
    let spinner = util::spinner(format!("Connecting to {base_url}..."));
    let result = client.test_connection().await;
    spinner.finish_and_clear();

    result.map_err(request_failed)?;
    util::success(format!("Connected to {base_url}"));
    Ok(())
}
