use super::{request_failed, HubContext};
use crate::util;
use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use domain::{BuildApp, BuildEnv, BuildStatus, PipelineSnapshot};

#[derive(Debug, Args)]
pub struct PipelinesCommand {
    #[command(subcommand)]
    pub command: PipelinesSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum PipelinesSubcommand {
    /// Recent builds and success figures
    Status {
        #[arg(long)]
        json: bool,
    },

    /// Start a build
    Trigger {
        /// tsdm or navigator
        #[arg(long, default_value = "tsdm")]
        app: BuildApp,

        /// qa or prod
        #[arg(long, default_value = "qa")]
        env: BuildEnv,
    },
}

impl PipelinesCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        let client = ctx.client()?;
        match &self.command {
            PipelinesSubcommand::Status { json } => {
                let spinner = util::spinner("Loading build pipelines...");
                let snapshot = client.fetch_pipelines().await;
                spinner.finish_and_clear();
                let snapshot = snapshot.map_err(request_failed)?;

                if *json {
                    return util::print_json(&snapshot);
                }
                print_snapshot(&snapshot);
                Ok(())
            }
            PipelinesSubcommand::Trigger { app, env } => {
                let label = format!("{} build for {}", env.as_str().to_uppercase(), app.display_name());
                let spinner = util::spinner(format!("Triggering {label}..."));
                let reply = client.trigger_build(*app, *env).await;
                spinner.finish_and_clear();
                let reply = reply.map_err(request_failed)?;

                let message = reply
                    .message
                    .unwrap_or_else(|| format!("{label} triggered"));
                match reply.build_id {
                    Some(id) => util::success(format!("{message} (build {id})")),
                    None => util::success(message),
                }
                Ok(())
            }
        }
    }
}

fn print_snapshot(snapshot: &PipelineSnapshot) {
    let stats = snapshot.effective_stats();
    util::heading("Build pipelines");
    println!(
        "  successful: {}   failed: {}   avg time: {}   success rate: {}",
        stats.successful_builds.unwrap_or(0),
        stats.failed_builds.unwrap_or(0),
        stats.avg_build_time.as_deref().unwrap_or("n/a"),
        stats
            .success_rate
            .map(|rate| format!("{rate:.0}%"))
            .unwrap_or_else(|| "n/a".to_string())
    );
    println!();

    if snapshot.builds.is_empty() {
        println!("No recent builds");
        return;
    }

    println!(
        "{:<10} {:<12} {:<6} {:<10} {:<16} {}",
        "Build", "App", "Env", "Status", "Started", "Duration"
    );
    for build in &snapshot.builds {
        let status = format!("{:<10}", build.status.as_str());
        let status = match build.status {
            BuildStatus::Success => style(status).green(),
            BuildStatus::Failed => style(status).red(),
            BuildStatus::Running => style(status).yellow(),
            BuildStatus::Other => style(status).dim(),
        };
        println!(
            "{:<10} {:<12} {:<6} {} {:<16} {}",
            build.id, build.app, build.env, status, build.time, build.duration
        );
    }
}
