use super::tools::{lookup_tool, InputArgs};
use super::{request_failed, HubContext};
use crate::util;
use anyhow::{bail, Result};
use clap::Args;
use client::FileUpload;
use domain::{compose_prompt, PromptContext};
use std::path::PathBuf;

/// Load a Jira story
#[derive(Debug, Args)]
pub struct JiraCommand {
    pub story_id: String,

    #[arg(long)]
    pub json: bool,
}

impl JiraCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        let client = ctx.client()?;
        let spinner = util::spinner(format!("Fetching Jira story {}...", self.story_id));
        let story = client.fetch_jira_story(&self.story_id).await;
        spinner.finish_and_clear();
        let story = story.map_err(request_failed)?;

        if self.json {
            return util::print_json(&story);
        }

        util::heading(&format!("{}: {}", story.id, story.title));
        if let Some(status) = &story.status {
            println!("  status:   {status}");
        }
        if let Some(assignee) = &story.assignee {
            println!("  assignee: {assignee}");
        }
        println!();
        println!("{}", story.description);
        if !story.acceptance_criteria.is_empty() {
            println!();
            println!("Acceptance criteria:");
            for criterion in &story.acceptance_criteria {
                println!("  - {criterion}");
            }
        }
        Ok(())
    }
}

/// Summarize a web page through the URL processing endpoint
#[derive(Debug, Args)]
pub struct UrlCommand {
    pub url: String,

    #[arg(long)]
    pub json: bool,
}

impl UrlCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        let client = ctx.client()?;
        let spinner = util::spinner(format!("Processing {}...", self.url));
        let insight = client.process_url(&self.url).await;
        spinner.finish_and_clear();
        let insight = insight.map_err(request_failed)?;

        if self.json {
            return util::print_json(&insight);
        }

        util::heading(if insight.title.is_empty() {
            insight.url.as_str()
        } else {
            insight.title.as_str()
        });
        println!("  url:           {}", insight.url);
        if let Some(status) = &insight.status {
            println!("  status:        {status}");
        }
        if let Some(checked) = &insight.last_checked {
            println!("  last checked:  {checked}");
        }
        let meta = &insight.metadata;
        if let Some(code) = meta.status_code {
            println!("  status code:   {code}");
        }
        if let Some(time) = &meta.response_time {
            println!("  response time: {time}");
        }
        if let Some(content_type) = &meta.content_type {
            println!("  content type:  {content_type}");
        }
        Ok(())
    }
}

/// Upload files for a tool to process
#[derive(Debug, Args)]
pub struct FilesCommand {
    pub tool: String,

    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub input: InputArgs,
}

impl FilesCommand {
    pub async fn execute(&self, ctx: &HubContext) -> Result<()> {
        let tool = lookup_tool(&self.tool)?;
        if self.paths.is_empty() {
            bail!("Select at least one file");
        }

        let mut files = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            files.push(FileUpload::read(path).await?);
        }

        let input = self.input.read().await?;
        let context =
            PromptContext::with_input(input).files(files.iter().map(|f| f.name.clone()));
        let prompt = compose_prompt(tool.id, &context).unwrap_or_default();

        let client = ctx.client()?;
        let spinner = util::spinner(format!("Uploading {} file(s)...", files.len()));
        let reply = client.upload_files(tool.id, tool.name, &prompt, files).await;
        spinner.finish_and_clear();
        let reply = reply.map_err(request_failed)?;

        util::success(reply.text());
        Ok(())
    }
}
