use super::{request_failed, HubContext};
use crate::util;
use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use client::{ExportTarget, HubClient, TestCaseExport, ToolRequest};
use console::style;
use domain::{
    compare_json, compose_prompt, find_tool, json_analyzer_input, parse_json_input, ChatTranscript,
    ComparisonRow, DomainError, PromptContext, ToolDescriptor, TOOLS,
};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// List the QA tools and where their requests go
#[derive(Debug, Args)]
pub struct ToolsCommand {
    #[arg(long)]
    pub json: bool,
}

impl ToolsCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        if self.json {
            return util::print_json(&TOOLS);
        }

        let config = ctx.endpoint_config();
        util::heading("QA AI Tools");
        for tool in TOOLS.iter() {
            println!(
                "  {:<18} {:<26} {}",
                style(tool.id).bold(),
                tool.name,
                style(format!("[{}]", tool.integration)).dim()
            );
            println!("  {:<18} {}", "", tool.description);
            println!("  {:<18} {}", "", style(config.tool_url(tool.id)).dim());
        }
        Ok(())
    }
}

/// Text input for a tool, inline or from a file
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Requirements, HTML, URL or other tool input
    #[arg(long, short = 'i', conflicts_with = "input_file")]
    pub input: Option<String>,

    /// Read the input from a file
    #[arg(long)]
    pub input_file: Option<PathBuf>,
}

impl InputArgs {
    pub async fn read(&self) -> Result<String> {
        match (&self.input, &self.input_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            (None, None) => Ok(String::new()),
        }
    }
}

/// Jira and web page context pulled in before the prompt is built
#[derive(Debug, Args)]
pub struct ContextArgs {
    /// Jira story to load, e.g. QA-123
    #[arg(long)]
    pub story: Option<String>,

    /// Web page to load
    #[arg(long)]
    pub url: Option<String>,
}

impl ContextArgs {
    fn is_empty(&self) -> bool {
        self.story.is_none() && self.url.is_none()
    }

    async fn load(&self, client: &HubClient, mut context: PromptContext) -> Result<PromptContext> {
        if let Some(story_id) = &self.story {
            let spinner = util::spinner(format!("Fetching Jira story {story_id}..."));
            let story = client.fetch_jira_story(story_id).await;
            spinner.finish_and_clear();
            let story = story.map_err(request_failed)?;
            info!(story = %story.id, "Jira story loaded");
            context = context.jira(story);
        }
        if let Some(url) = &self.url {
            let spinner = util::spinner(format!("Processing {url}..."));
            let insight = client.process_url(url).await;
            spinner.finish_and_clear();
            context = context.url(insight.map_err(request_failed)?);
        }
        Ok(context)
    }
}

pub(crate) fn lookup_tool(id: &str) -> Result<&'static ToolDescriptor> {
    match find_tool(id) {
        Some(tool) => Ok(tool),
        None => {
            let known: Vec<&str> = TOOLS.iter().map(|t| t.id).collect();
            bail!("Unknown tool '{id}'. Available: {}", known.join(", "))
        }
    }
}

/// Print the prompt a tool would send, without sending it
#[derive(Debug, Args)]
pub struct PromptCommand {
    pub tool: String,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub context: ContextArgs,

    /// Name of an attached file (repeatable)
    #[arg(long = "file")]
    pub files: Vec<String>,
}

impl PromptCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        let tool = lookup_tool(&self.tool)?;
        let input = self.input.read().await?;

        let mut context = PromptContext::with_input(input).files(self.files.iter().cloned());
        if !self.context.is_empty() {
            context = self.context.load(&ctx.client()?, context).await?;
        }

        let prompt = compose_prompt(tool.id, &context).unwrap_or_default();
        println!("{prompt}");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportChoice {
    Jira,
    Qtest,
}

impl From<ExportChoice> for ExportTarget {
    fn from(choice: ExportChoice) -> Self {
        match choice {
            ExportChoice::Jira => ExportTarget::Jira,
            ExportChoice::Qtest => ExportTarget::QTest,
        }
    }
}

/// Send input to a QA tool and print the reply
#[derive(Debug, Args)]
pub struct RunCommand {
    pub tool: String,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub context: ContextArgs,

    /// Push the generated test cases (test-generator only)
    #[arg(long, value_enum)]
    pub export: Option<ExportChoice>,

    /// Print the full backend response
    #[arg(long)]
    pub raw: bool,
}

impl RunCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        let tool = lookup_tool(&self.tool)?;
        match tool.id {
            "json-analyzer" => bail!("Use `qahub json-compare <first> <second>` for the JSON Analyzer"),
            "chatbot" => {
                let message = self.input.read().await?;
                let chat = ChatCommand {
                    message: Some(message),
                    transcript: None,
                };
                return chat.execute(ctx).await;
            }
            _ => {}
        }
        if self.export.is_some() && tool.id != "test-generator" {
            bail!("--export is only available for the Test Generator");
        }

        let client = ctx.client()?;
        let input = self.input.read().await?;
        let context = self
            .context
            .load(&client, PromptContext::with_input(input.clone()))
            .await?;
        if input.trim().is_empty() && context.has_no_context() {
            return Err(DomainError::EmptyInput("Input".into()).into());
        }

        let prompt = compose_prompt(tool.id, &context).unwrap_or_default();
        debug!(tool = tool.id, prompt_len = prompt.len(), "Prompt composed");

        let request = ToolRequest::new(tool.id, prompt).with_input(&input);
        let spinner = util::spinner(format!("Running {}...", tool.name));
        let reply = client.invoke_tool(&request).await;
        spinner.finish_and_clear();
        let reply = reply.map_err(request_failed)?;

        if self.raw {
            util::print_json(&reply.raw)?;
        } else {
            println!("{}", reply.text);
        }

        if let Some(choice) = self.export {
            let target = ExportTarget::from(choice);
            let export = TestCaseExport {
                test_cases: reply.text,
                jira_data: context.jira,
                requirements: input,
            };
            let spinner = util::spinner(format!("Creating test cases in {target}..."));
            let ids = client.export_test_cases(target, &export).await;
            spinner.finish_and_clear();
            let ids = ids.map_err(request_failed)?;

            let created = if ids.is_empty() {
                "Created successfully".to_string()
            } else {
                ids.join(", ")
            };
            util::success(format!("Test cases created in {target}: {created}"));
        }
        Ok(())
    }
}

/// Compare two JSON documents key by key
#[derive(Debug, Args)]
pub struct JsonCompareCommand {
    pub first: PathBuf,
    pub second: PathBuf,

    /// Compare here without calling the JSON Analyzer
    #[arg(long)]
    pub local: bool,
}

async fn read_json_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

impl JsonCompareCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        let json1 = read_json_file(&self.first).await?;
        let json2 = read_json_file(&self.second).await?;

        if self.local {
            let first = parse_json_input("JSON 1", &json1)?;
            let second = parse_json_input("JSON 2", &json2)?;
            print_rows(&compare_json(&first, &second));
            return Ok(());
        }

        let input = json_analyzer_input(&json1, &json2)?;
        let prompt = compose_prompt("json-analyzer", &PromptContext::with_input(input))
            .unwrap_or_default();

        let client = ctx.client()?;
        let spinner = util::spinner("Analyzing JSON...");
        let analysis = client.analyze_json(&prompt, &json1, &json2).await;
        spinner.finish_and_clear();
        let analysis = analysis.map_err(request_failed)?;

        println!("{}", analysis.text);
        println!();
        print_rows(&analysis.rows);
        if analysis.computed_locally {
            println!("{}", style("(table computed locally)").dim());
        }
        Ok(())
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let head: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

fn print_rows(rows: &[ComparisonRow]) {
    if rows.is_empty() {
        println!("No top-level fields to compare");
        return;
    }

    println!(
        "{:<20} {:<24} {:<24} {:<18} {}",
        "Field", "JSON 1", "JSON 2", "Comparison", "Issues"
    );
    for row in rows {
        let line = format!(
            "{:<20} {:<24} {:<24} {:<18} {}",
            clip(&row.field, 20),
            clip(&row.json1_value, 24),
            clip(&row.json2_value, 24),
            row.comparison,
            row.issues
        );
        if row.is_same() {
            println!("{line}");
        } else {
            println!("{}", style(line).yellow());
        }
    }

    let differing = rows.iter().filter(|r| !r.is_same()).count();
    println!();
    println!("{} field(s), {} differ", rows.len(), differing);
}

/// Talk to the QA chatbot: one message, or interactive when none is given
#[derive(Debug, Args)]
pub struct ChatCommand {
    pub message: Option<String>,

    /// Save the conversation as JSON when the session ends
    #[arg(long)]
    pub transcript: Option<PathBuf>,
}

impl ChatCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        let client = ctx.client()?;
        let mut transcript = ChatTranscript::new();

        match &self.message {
            Some(message) => {
                let reply = exchange(&client, &mut transcript, message).await?;
                println!("{reply}");
            }
            None => interactive(&client, &mut transcript).await?,
        }

        if let Some(path) = &self.transcript {
            tokio::fs::write(path, transcript.to_json()?)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            util::success(format!("Transcript saved to {}", path.display()));
        }
        Ok(())
    }
}

/// Sends one message with the turns before it and records both sides
async fn exchange(
    client: &HubClient,
    transcript: &mut ChatTranscript,
    message: &str,
) -> Result<String> {
    let message = message.trim();
    if message.is_empty() {
        return Err(DomainError::EmptyInput("Message".into()).into());
    }

    let history = transcript.recent().to_vec();
    let prompt = compose_prompt("chatbot", &PromptContext::with_input(message)).unwrap_or_default();
    transcript.push_user(message);

    let spinner = util::spinner("Thinking...");
    let reply = client.send_chat(&prompt, message, &history).await;
    spinner.finish_and_clear();
    let reply = reply.map_err(request_failed)?;

    transcript.push_bot(reply.clone());
    Ok(reply)
}

async fn interactive(client: &HubClient, transcript: &mut ChatTranscript) -> Result<()> {
    util::heading("QA Chatbot");
    println!("{}", style("Type a message, or 'exit' to leave").dim());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style("you>").green().bold());
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        // A failed turn is reported and the session goes on
        match exchange(client, transcript, line).await {
            Ok(reply) => println!("{} {}", style("bot>").cyan().bold(), reply),
            Err(e) => eprintln!("{} {:#}", style("❌").red(), e),
        }
    }
    Ok(())
}
