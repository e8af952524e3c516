use crate::error::{ClientError, ClientResult};
use crate::hub_client::HubClient;
use domain::{compare_json, parse_json_input, ChatTurn, ComparisonRow, DomainError};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Body posted to a tool endpoint: `{prompt, toolId, ...fields}`
#[derive(Debug, Clone, Serialize)]
pub struct ToolRequest {
    pub prompt: String,
    #[serde(rename = "toolId")]
    pub tool_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ToolRequest {
    pub fn new(tool_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            tool_id: tool_id.into(),
            fields: Map::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Attach the raw user input under the field name the tool's backend reads
    pub fn with_input(self, input: &str) -> Self {
        match self.tool_id.as_str() {
            "test-generator" => self.field("requirements", input),
            "xpath-generator" => self.field("htmlContent", input),
            _ => self,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolReply {
    /// Text shown to the user
    pub text: String,
    /// Full response body
    pub raw: Value,
}

/// JSON Analyzer outcome: backend text plus the comparison table
#[derive(Debug, Clone, PartialEq)]
pub struct JsonAnalysis {
    pub text: String,
    pub rows: Vec<ComparisonRow>,
    /// True when the backend sent no table and it was computed here
    pub computed_locally: bool,
}

fn fallback_key(tool_id: &str) -> Option<&'static str> {
    match tool_id {
        "test-generator" => Some("testCases"),
        "xpath-generator" => Some("xpath"),
        "json-analyzer" => Some("analysis"),
        "chatbot" => Some("message"),
        _ => None,
    }
}

fn empty_reply(tool_id: &str) -> &'static str {
    match tool_id {
        "test-generator" => "No test cases generated",
        "xpath-generator" => "No XPath generated",
        "json-analyzer" => "No analysis provided",
        "chatbot" => "I'm sorry, I couldn't process your request.",
        _ => "No response generated",
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => serde_json::to_string_pretty(other).ok(),
    }
}

/// Text to show for a tool response: `response`, then the tool's own key,
/// then a fixed placeholder.
pub fn reply_text(tool_id: &str, body: &Value) -> String {
    body.get("response")
        .and_then(as_text)
        .or_else(|| {
            fallback_key(tool_id)
                .and_then(|key| body.get(key))
                .and_then(as_text)
        })
        .unwrap_or_else(|| empty_reply(tool_id).to_string())
}

impl HubClient {
    /// POST a tool request to the tool's configured endpoint
    pub async fn invoke_tool(&self, request: &ToolRequest) -> ClientResult<ToolReply> {
        if domain::find_tool(&request.tool_id).is_none() {
            return Err(DomainError::UnknownTool(request.tool_id.clone()).into());
        }

        let url = self.config().tool_url(&request.tool_id);
        info!("Sending {} request to {}", request.tool_id, url);

        let raw: Value = self
            .send_json(&request.tool_id, self.http().post(&url).json(request))
            .await?;
        Ok(ToolReply {
            text: reply_text(&request.tool_id, &raw),
            raw,
        })
    }

    /// Both inputs must parse before anything is sent
    pub async fn analyze_json(&self, prompt: &str, json1: &str, json2: &str) -> ClientResult<JsonAnalysis> {
        let first = parse_json_input("JSON 1", json1)?;
        let second = parse_json_input("JSON 2", json2)?;

        let request = ToolRequest::new("json-analyzer", prompt)
            .field("json1", json1)
            .field("json2", json2);
        let reply = self.invoke_tool(&request).await?;

        let backend_rows = reply
            .raw
            .get("comparisonTable")
            .filter(|v| v.is_array())
            .map(|table| serde_json::from_value::<Vec<ComparisonRow>>(table.clone()));

        let (rows, computed_locally) = match backend_rows {
            Some(Ok(rows)) => (rows, false),
            Some(Err(e)) => {
                warn!(error = %e, "Ignoring malformed comparisonTable from backend");
                (compare_json(&first, &second), true)
            }
            None => (compare_json(&first, &second), true),
        };

        Ok(JsonAnalysis {
            text: reply.text,
            rows,
            computed_locally,
        })
    }

    /// Chatbot message with the preceding turns as context
    pub async fn send_chat(&self, prompt: &str, message: &str, history: &[ChatTurn]) -> ClientResult<String> {
        domain::require_input("Message", message)?;

        let history = serde_json::to_value(history).map_err(|e| ClientError::Decode(e.to_string()))?;
        let request = ToolRequest::new("chatbot", prompt)
            .field("message", message)
            .field("conversationHistory", history);

        Ok(self.invoke_tool(&request).await?.text)
    }
}
