//! Jira, URL and file context plus test case export and build triggers

use crate::error::{ClientError, ClientResult};
use crate::hub_client::HubClient;
use domain::{require_input, ConfigField, JiraStory, UrlInsight};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// A file read into memory for the file processing endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn read(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ClientError::Transport(format!("Failed to read {}: {e}", path.display()))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FileProcessingReply {
    #[serde(default)]
    pub message: Option<String>,
}

impl FileProcessingReply {
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("Files processed successfully")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Jira,
    QTest,
}

impl ExportTarget {
    fn path(&self) -> &'static str {
        match self {
            ExportTarget::Jira => "/api/jira/create-test-cases",
            ExportTarget::QTest => "/api/qtest/create-test-cases",
        }
    }

    fn ids_key(&self) -> &'static str {
        match self {
            ExportTarget::Jira => "ticketIds",
            ExportTarget::QTest => "testCaseIds",
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportTarget::Jira => f.write_str("Jira"),
            ExportTarget::QTest => f.write_str("QTest"),
        }
    }
}

/// Generated test cases pushed to a test management system
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseExport {
    pub test_cases: String,
    pub jira_data: Option<JiraStory>,
    pub requirements: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTriggerReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub build_id: Option<String>,
}

impl HubClient {
    pub async fn fetch_jira_story(&self, story_id: &str) -> ClientResult<JiraStory> {
        let story_id = require_input("Story ID", story_id)?.trim();
        let url = self.config().url_for(ConfigField::JiraIntegration);
        debug!("Fetching Jira story {} from {}", story_id, url);

        let body = serde_json::json!({ "storyId": story_id });
        let story: JiraStory = self
            .send_json("jira_integration", self.http().post(&url).json(&body))
            .await?;
        info!(story = %story.id, "Jira story loaded");
        Ok(story)
    }

    pub async fn process_url(&self, target: &str) -> ClientResult<UrlInsight> {
        let target = require_input("URL", target)?.trim();
        let url = self.config().url_for(ConfigField::UrlProcessing);
        debug!("Processing {} via {}", target, url);

        let body = serde_json::json!({ "url": target });
        self.send_json("url_processing", self.http().post(&url).json(&body))
            .await
    }

    /// Multipart upload: `file_0..file_n` plus `toolId`, `toolName`, `prompt`
    pub async fn upload_files(
        &self,
        tool_id: &str,
        tool_name: &str,
        prompt: &str,
        files: Vec<FileUpload>,
    ) -> ClientResult<FileProcessingReply> {
        if files.is_empty() {
            return Err(domain::DomainError::EmptyInput("Files".to_string()).into());
        }

        let url = self.config().url_for(ConfigField::FileProcessing);
        info!(count = files.len(), "Uploading files for {}", tool_id);

        let mut form = Form::new();
        for (i, file) in files.into_iter().enumerate() {
            let part = Part::bytes(file.bytes).file_name(file.name);
            form = form.part(format!("file_{i}"), part);
        }
        let form = form
            .text("toolId", tool_id.to_string())
            .text("toolName", tool_name.to_string())
            .text("prompt", prompt.to_string());

        let text = self
            .send_text("file_processing", self.http().post(&url).multipart(form))
            .await?;
        if text.trim().is_empty() {
            return Ok(FileProcessingReply::default());
        }
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Returns the ids the target system assigned; may be empty
    pub async fn export_test_cases(
        &self,
        target: ExportTarget,
        export: &TestCaseExport,
    ) -> ClientResult<Vec<String>> {
        require_input("Test cases", &export.test_cases)?;
        let url = self.config().route(target.path());
        info!("Creating test cases in {}", target);

        let reply: serde_json::Value = self
            .send_json("export_test_cases", self.http().post(&url).json(export))
            .await?;

        let ids = reply
            .get(target.ids_key())
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .map(|id| match id {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{DomainError, EndpointConfig};
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_for(server: &Server) -> HubClient {
        HubClient::new(EndpointConfig {
            base_url: server.url(),
            ..EndpointConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_jira_story() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/jira-integration")
            .match_body(Matcher::Json(json!({"storyId": "QA-101"})))
            .with_status(200)
            .with_body(
                r#"{"id":"QA-101","title":"Login","description":"Users log in","acceptanceCriteria":["Valid creds work","Lockout after 3 tries"]}"#,
            )
            .create_async()
            .await;

        let story = client_for(&server).fetch_jira_story(" QA-101 ").await.unwrap();
        assert_eq!(story.acceptance_criteria.len(), 2);
        assert!(story.assignee.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_story_id_sends_nothing() {
        let client = HubClient::new(EndpointConfig::default()).unwrap();
        let err = client.fetch_jira_story("").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(DomainError::EmptyInput(_))));
    }

    #[tokio::test]
    async fn test_process_url_uses_configured_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/custom-url")
            .with_status(200)
            .with_body(r#"{"url":"https://shop.test","title":"Shop","metadata":{"statusCode":200}}"#)
            .create_async()
            .await;

        let mut config = EndpointConfig {
            base_url: server.url(),
            ..EndpointConfig::default()
        };
        config.set(ConfigField::UrlProcessing, "/custom-url");
        let client = HubClient::new(config).unwrap();

        let insight = client.process_url("https://shop.test").await.unwrap();
        assert_eq!(insight.metadata.status_code, Some(200));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_files_multipart() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/file-processing")
            .match_header("content-type", Matcher::Regex("multipart/form-data".into()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file_0"; filename="a.txt""#.into()),
                Matcher::Regex(r#"name="file_1"; filename="b.json""#.into()),
                Matcher::Regex(r#"name="toolId""#.into()),
            ]))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let files = vec![
            FileUpload::new("a.txt", "alpha"),
            FileUpload::new("b.json", "{}"),
        ];
        let reply = client_for(&server)
            .upload_files("defect-analyzer", "Defect Analyzer", "p", files)
            .await
            .unwrap();
        assert_eq!(reply.text(), "Files processed successfully");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_read_file_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "ERROR 42").unwrap();

        let upload = FileUpload::read(&path).await.unwrap();
        assert_eq!(upload.name, "log.txt");
        assert_eq!(upload.bytes, b"ERROR 42".to_vec());
    }

    #[tokio::test]
    async fn test_export_collects_ids() {
        let mut server = Server::new_async().await;
        let _jira = server
            .mock("POST", "/api/jira/create-test-cases")
            .match_body(Matcher::PartialJson(json!({"testCases": "TC1", "jiraData": null})))
            .with_status(200)
            .with_body(r#"{"ticketIds":["QA-9","QA-10"]}"#)
            .create_async()
            .await;
        let _qtest = server
            .mock("POST", "/api/qtest/create-test-cases")
            .with_status(200)
            .with_body(r#"{"testCaseIds":[501]}"#)
            .create_async()
            .await;

        let export = TestCaseExport {
            test_cases: "TC1".into(),
            jira_data: None,
            requirements: "req".into(),
        };
        let client = client_for(&server);
        assert_eq!(
            client.export_test_cases(ExportTarget::Jira, &export).await.unwrap(),
            vec!["QA-9", "QA-10"]
        );
        assert_eq!(
            client.export_test_cases(ExportTarget::QTest, &export).await.unwrap(),
            vec!["501"]
        );
    }
}
