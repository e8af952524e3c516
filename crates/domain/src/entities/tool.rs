//! Tool catalog entries

use serde::Serialize;
use std::fmt;

/// Which context integration a tool panel offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolIntegration {
    Jira,
    Url,
    Chat,
}

impl fmt::Display for ToolIntegration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToolIntegration::Jira => "jira",
            ToolIntegration::Url => "url",
            ToolIntegration::Chat => "chat",
        })
    }
}

/// A QA tool as listed in the tools panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub integration: ToolIntegration,
}

/// Prompt templates for one tool. `{content}` in the user template and
/// `{title}`, `{description}`, `{acceptanceCriteria}` in the Jira prompt are
/// placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPromptSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub system_prompt: &'static str,
    pub user_prompt_template: &'static str,
    pub file_processing_prompt: Option<&'static str>,
    pub url_processing_prompt: Option<&'static str>,
    pub jira_processing_prompt: Option<&'static str>,
}
