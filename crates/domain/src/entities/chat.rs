//! Chatbot conversation history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of most recent turns sent along with a new message
pub const HISTORY_WINDOW: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub id: String,
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn speaker(&self) -> &'static str {
        if self.is_user {
            "You"
        } else {
            "QA Bot"
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    turns: Vec<ChatTurn>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatTurn {
        self.push(content.into(), true)
    }

    pub fn push_bot(&mut self, content: impl Into<String>) -> &ChatTurn {
        self.push(content.into(), false)
    }

    fn push(&mut self, content: String, is_user: bool) -> &ChatTurn {
        let turn = ChatTurn {
            id: format!("{}", self.turns.len() + 1),
            content,
            is_user,
            timestamp: Utc::now(),
        };
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The last [`HISTORY_WINDOW`] turns, oldest first
    pub fn recent(&self) -> &[ChatTurn] {
        let start = self.turns.len().saturating_sub(HISTORY_WINDOW);
        &self.turns[start..]
    }

    /// Plain-text export, one block per turn
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "QA Chatbot Conversation - {}\n\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        let body: Vec<String> = self
            .turns
            .iter()
            .map(|t| {
                format!(
                    "[{}] {}: {}",
                    t.timestamp.format("%H:%M:%S"),
                    t.speaker(),
                    t.content
                )
            })
            .collect();
        out.push_str(&body.join("\n\n"));
        out
    }

    /// JSON export with a timestamp and message count
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "messages": self.turns,
            "totalMessages": self.turns.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_window() {
        let mut transcript = ChatTranscript::new();
        for i in 0..14 {
            transcript.push_user(format!("q{i}"));
        }
        let recent = transcript.recent();
        assert_eq!(recent.len(), HISTORY_WINDOW);
        assert_eq!(recent[0].content, "q4");
        assert_eq!(recent[9].content, "q13");
    }

    #[test]
    fn test_exports() {
        let mut transcript = ChatTranscript::new();
        transcript.push_user("What is smoke testing?");
        transcript.push_bot("A shallow pass over critical paths.");

        let text = transcript.to_text();
        assert!(text.starts_with("QA Chatbot Conversation - "));
        assert!(text.contains("You: What is smoke testing?"));
        assert!(text.contains("QA Bot: A shallow pass"));

        let json: serde_json::Value = serde_json::from_str(&transcript.to_json().unwrap()).unwrap();
        assert_eq!(json["totalMessages"], 2);
        assert_eq!(json["messages"][0]["isUser"], true);
    }
}
