//! Context fetched from Jira or a web page and fed into prompts

use serde::{Deserialize, Serialize};

/// Story returned by the Jira integration endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraStory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UrlMetadata {
    pub response_time: Option<String>,
    pub status_code: Option<u16>,
    pub content_type: Option<String>,
}

/// Page summary returned by the URL processing endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlInsight {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<String>,
    #[serde(default)]
    pub metadata: UrlMetadata,
}

/// Optional inputs to prompt composition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptContext {
    pub user_input: Option<String>,
    pub jira: Option<JiraStory>,
    pub url: Option<UrlInsight>,
    pub file_names: Vec<String>,
}

impl PromptContext {
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            user_input: Some(input.into()),
            ..Self::default()
        }
    }

    pub fn jira(mut self, story: JiraStory) -> Self {
        self.jira = Some(story);
        self
    }

    pub fn url(mut self, insight: UrlInsight) -> Self {
        self.url = Some(insight);
        self
    }

    pub fn files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// True when nothing beyond plain user input is attached
    pub fn has_no_context(&self) -> bool {
        self.jira.is_none() && self.url.is_none() && self.file_names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jira_story_from_backend() {
        let json = r#"{
            "id": "QA-101",
            "title": "Login",
            "description": "Users sign in",
            "acceptanceCriteria": ["Valid creds log in", "Invalid creds rejected"],
            "status": "In Progress"
        }"#;
        let story: JiraStory = serde_json::from_str(json).unwrap();
        assert_eq!(story.acceptance_criteria.len(), 2);
        assert_eq!(story.status.as_deref(), Some("In Progress"));
        assert!(story.assignee.is_none());
    }

    #[test]
    fn test_url_insight_tolerates_missing_metadata() {
        let insight: UrlInsight =
            serde_json::from_str(r#"{"url":"https://example.com","title":"Example"}"#).unwrap();
        assert_eq!(insight.metadata, UrlMetadata::default());

        let insight: UrlInsight = serde_json::from_str(
            r#"{"url":"https://example.com","metadata":{"statusCode":200,"contentType":"text/html"}}"#,
        )
        .unwrap();
        assert_eq!(insight.metadata.status_code, Some(200));
    }

    #[test]
    fn test_url_insight_requires_url() {
        assert!(serde_json::from_str::<UrlInsight>(r#"{"title":"x"}"#).is_err());
    }

    #[test]
    fn test_context_builder() {
        let ctx = PromptContext::with_input("checkout").files(["a.txt", "b.md"]);
        assert_eq!(ctx.file_names, vec!["a.txt", "b.md"]);
        assert!(!ctx.has_no_context());
        assert!(PromptContext::with_input("x").has_no_context());
    }
}
