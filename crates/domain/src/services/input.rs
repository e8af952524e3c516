//! Checks applied to user input before anything is sent

use crate::errors::{DomainError, DomainResult};
use serde_json::Value;

/// Rejects empty or whitespace-only input. Returns the input unchanged.
pub fn require_input<'a>(label: &str, value: &'a str) -> DomainResult<&'a str> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyInput(label.to_string()));
    }
    Ok(value)
}

/// Required input that must also parse as JSON
pub fn parse_json_input(label: &str, value: &str) -> DomainResult<Value> {
    let value = require_input(label, value)?;
    serde_json::from_str(value).map_err(|e| DomainError::InvalidJson {
        field: label.to_string(),
        reason: e.to_string(),
    })
}

/// Validates both analyzer inputs and renders the text the prompt embeds
pub fn json_analyzer_input(json1: &str, json2: &str) -> DomainResult<String> {
    parse_json_input("JSON 1", json1)?;
    parse_json_input("JSON 2", json2)?;
    Ok(format!("JSON 1:\n{json1}\n\nJSON 2:\n{json2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_input() {
        assert!(require_input("Story ID", "QA-1").is_ok());
        assert_eq!(
            require_input("Story ID", "   "),
            Err(DomainError::EmptyInput("Story ID".into()))
        );
    }

    #[test]
    fn test_json_analyzer_input_validates_both() {
        let err = json_analyzer_input(r#"{"a":1}"#, "{oops").unwrap_err();
        assert!(matches!(err, DomainError::InvalidJson { ref field, .. } if field == "JSON 2"));

        let text = json_analyzer_input(r#"{"a":1}"#, r#"{"a":2}"#).unwrap();
        assert_eq!(text, "JSON 1:\n{\"a\":1}\n\nJSON 2:\n{\"a\":2}");
    }
}
