//! Endpoint configuration: backend base URL plus one path per tool and integration.
//!
//! Defaults are compiled in; a persisted, possibly partial, override is
//! shallow-merged over them field by field.

use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default backend, taken from `QAHUB_BACKEND_URL` at build time when set
pub const DEFAULT_BASE_URL: &str = match option_env!("QAHUB_BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:3001",
};

/// Fully resolved endpoint configuration. Every field is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    pub base_url: String,
    pub test_generator_endpoint: String,
    pub ac_validator_endpoint: String,
    pub xpath_generator_endpoint: String,
    pub json_analyzer_endpoint: String,
    pub ada_analyzer_endpoint: String,
    pub lighthouse_endpoint: String,
    pub chatbot_endpoint: String,
    pub defect_analyzer_endpoint: String,
    pub karate_script_endpoint: String,
    pub smartspec_script_endpoint: String,
    pub jira_integration_endpoint: String,
    pub url_processing_endpoint: String,
    pub file_processing_endpoint: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            test_generator_endpoint: "/test-generator".to_string(),
            ac_validator_endpoint: "/ac-validator".to_string(),
            xpath_generator_endpoint: "/xpath-generator".to_string(),
            json_analyzer_endpoint: "/json-analyzer".to_string(),
            ada_analyzer_endpoint: "/ada-analyzer".to_string(),
            lighthouse_endpoint: "/lighthouse".to_string(),
            chatbot_endpoint: "/chatbot".to_string(),
            defect_analyzer_endpoint: "/defect-analyzer".to_string(),
            karate_script_endpoint: "/karate-script".to_string(),
            smartspec_script_endpoint: "/smartspec-script".to_string(),
            jira_integration_endpoint: "/jira-integration".to_string(),
            url_processing_endpoint: "/url-processing".to_string(),
            file_processing_endpoint: "/file-processing".to_string(),
        }
    }
}

impl EndpointConfig {
    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::BaseUrl => &self.base_url,
            ConfigField::TestGenerator => &self.test_generator_endpoint,
            ConfigField::AcValidator => &self.ac_validator_endpoint,
            ConfigField::XpathGenerator => &self.xpath_generator_endpoint,
            ConfigField::JsonAnalyzer => &self.json_analyzer_endpoint,
            ConfigField::AdaAnalyzer => &self.ada_analyzer_endpoint,
            ConfigField::Lighthouse => &self.lighthouse_endpoint,
            ConfigField::Chatbot => &self.chatbot_endpoint,
            ConfigField::DefectAnalyzer => &self.defect_analyzer_endpoint,
            ConfigField::KarateScript => &self.karate_script_endpoint,
            ConfigField::SmartspecScript => &self.smartspec_script_endpoint,
            ConfigField::JiraIntegration => &self.jira_integration_endpoint,
            ConfigField::UrlProcessing => &self.url_processing_endpoint,
            ConfigField::FileProcessing => &self.file_processing_endpoint,
        }
    }

    pub fn set(&mut self, field: ConfigField, value: impl Into<String>) {
        let slot = match field {
            ConfigField::BaseUrl => &mut self.base_url,
            ConfigField::TestGenerator => &mut self.test_generator_endpoint,
            ConfigField::AcValidator => &mut self.ac_validator_endpoint,
            ConfigField::XpathGenerator => &mut self.xpath_generator_endpoint,
            ConfigField::JsonAnalyzer => &mut self.json_analyzer_endpoint,
            ConfigField::AdaAnalyzer => &mut self.ada_analyzer_endpoint,
            ConfigField::Lighthouse => &mut self.lighthouse_endpoint,
            ConfigField::Chatbot => &mut self.chatbot_endpoint,
            ConfigField::DefectAnalyzer => &mut self.defect_analyzer_endpoint,
            ConfigField::KarateScript => &mut self.karate_script_endpoint,
            ConfigField::SmartspecScript => &mut self.smartspec_script_endpoint,
            ConfigField::JiraIntegration => &mut self.jira_integration_endpoint,
            ConfigField::UrlProcessing => &mut self.url_processing_endpoint,
            ConfigField::FileProcessing => &mut self.file_processing_endpoint,
        };
        *slot = value.into();
    }

    /// `(field, value)` pairs in storage order
    pub fn entries(&self) -> impl Iterator<Item = (ConfigField, &str)> + '_ {
        ConfigField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    /// Path field a tool posts to, if the tool has one
    pub fn tool_field(tool_id: &str) -> Option<ConfigField> {
        match tool_id {
            "test-generator" => Some(ConfigField::TestGenerator),
            "ac-validator" => Some(ConfigField::AcValidator),
            "xpath-generator" => Some(ConfigField::XpathGenerator),
            "json-analyzer" => Some(ConfigField::JsonAnalyzer),
            "ada-analyzer" => Some(ConfigField::AdaAnalyzer),
            "lighthouse" => Some(ConfigField::Lighthouse),
            "chatbot" => Some(ConfigField::Chatbot),
            "defect-analyzer" => Some(ConfigField::DefectAnalyzer),
            "karate-script-writer" => Some(ConfigField::KarateScript),
            "smartspec-script-writer" => Some(ConfigField::SmartspecScript),
            _ => None,
        }
    }

    /// `baseUrl + path` for a tool; unmapped ids get the bare base URL.
    pub fn tool_url(&self, tool_id: &str) -> String {
        let path = Self::tool_field(tool_id)
            .map(|field| self.get(field))
            .unwrap_or_default();
        format!("{}{}", self.base_url, path)
    }

    /// `baseUrl + path` for any configured field
    pub fn url_for(&self, field: ConfigField) -> String {
        match field {
            ConfigField::BaseUrl => self.base_url.clone(),
            other => format!("{}{}", self.base_url, self.get(other)),
        }
    }

    /// `baseUrl + path` for a fixed backend route such as `/health`
    pub fn route(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Serialized form used for persistence. Field order is fixed, so equal
    /// configs always produce identical strings.
    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string(self).map_err(|e| DomainError::Storage(e.to_string()))
    }
}

/// Persisted override. Missing and `null` fields both mean "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialEndpointConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_generator_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ac_validator_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xpath_generator_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_analyzer_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ada_analyzer_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighthouse_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chatbot_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defect_analyzer_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub karate_script_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smartspec_script_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_integration_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_processing_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_processing_endpoint: Option<String>,
}

impl PartialEndpointConfig {
    /// Parse a persisted blob. Anything other than a JSON object is rejected;
    /// unknown keys are ignored.
    pub fn parse(blob: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(blob)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("expected a JSON object"));
        }
        serde_json::from_value(value)
    }

    pub fn get(&self, field: ConfigField) -> Option<&str> {
        let value = match field {
            ConfigField::BaseUrl => &self.base_url,
            ConfigField::TestGenerator => &self.test_generator_endpoint,
            ConfigField::AcValidator => &self.ac_validator_endpoint,
            ConfigField::XpathGenerator => &self.xpath_generator_endpoint,
            ConfigField::JsonAnalyzer => &self.json_analyzer_endpoint,
            ConfigField::AdaAnalyzer => &self.ada_analyzer_endpoint,
            ConfigField::Lighthouse => &self.lighthouse_endpoint,
            ConfigField::Chatbot => &self.chatbot_endpoint,
            ConfigField::DefectAnalyzer => &self.defect_analyzer_endpoint,
            ConfigField::KarateScript => &self.karate_script_endpoint,
            ConfigField::SmartspecScript => &self.smartspec_script_endpoint,
            ConfigField::JiraIntegration => &self.jira_integration_endpoint,
            ConfigField::UrlProcessing => &self.url_processing_endpoint,
            ConfigField::FileProcessing => &self.file_processing_endpoint,
        };
        value.as_deref()
    }

    /// Shallow merge over `defaults`. A present field wins, even when empty.
    pub fn merge_over(&self, defaults: &EndpointConfig) -> EndpointConfig {
        let mut resolved = defaults.clone();
        for field in ConfigField::ALL {
            if let Some(value) = self.get(field) {
                resolved.set(field, value);
            }
        }
        resolved
    }
}

/// Addressable config field, named by its camelCase storage key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    BaseUrl,
    TestGenerator,
    AcValidator,
    XpathGenerator,
    JsonAnalyzer,
    AdaAnalyzer,
    Lighthouse,
    Chatbot,
    DefectAnalyzer,
    KarateScript,
    SmartspecScript,
    JiraIntegration,
    UrlProcessing,
    FileProcessing,
}

impl ConfigField {
    pub const ALL: [ConfigField; 14] = [
        ConfigField::BaseUrl,
        ConfigField::TestGenerator,
        ConfigField::AcValidator,
        ConfigField::XpathGenerator,
        ConfigField::JsonAnalyzer,
        ConfigField::AdaAnalyzer,
        ConfigField::Lighthouse,
        ConfigField::Chatbot,
        ConfigField::DefectAnalyzer,
        ConfigField::KarateScript,
        ConfigField::SmartspecScript,
        ConfigField::JiraIntegration,
        ConfigField::UrlProcessing,
        ConfigField::FileProcessing,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ConfigField::BaseUrl => "baseUrl",
            ConfigField::TestGenerator => "testGeneratorEndpoint",
            ConfigField::AcValidator => "acValidatorEndpoint",
            ConfigField::XpathGenerator => "xpathGeneratorEndpoint",
            ConfigField::JsonAnalyzer => "jsonAnalyzerEndpoint",
            ConfigField::AdaAnalyzer => "adaAnalyzerEndpoint",
            ConfigField::Lighthouse => "lighthouseEndpoint",
            ConfigField::Chatbot => "chatbotEndpoint",
            ConfigField::DefectAnalyzer => "defectAnalyzerEndpoint",
            ConfigField::KarateScript => "karateScriptEndpoint",
            ConfigField::SmartspecScript => "smartspecScriptEndpoint",
            ConfigField::JiraIntegration => "jiraIntegrationEndpoint",
            ConfigField::UrlProcessing => "urlProcessingEndpoint",
            ConfigField::FileProcessing => "fileProcessingEndpoint",
        }
    }

    /// Human label for settings screens
    pub fn label(&self) -> &'static str {
        match self {
            ConfigField::BaseUrl => "Base URL",
            ConfigField::TestGenerator => "Test Generator",
            ConfigField::AcValidator => "AC Validator",
            ConfigField::XpathGenerator => "XPath Generator",
            ConfigField::JsonAnalyzer => "JSON Analyzer",
            ConfigField::AdaAnalyzer => "ADA Analyzer",
            ConfigField::Lighthouse => "Lighthouse",
            ConfigField::Chatbot => "Chatbot",
            ConfigField::DefectAnalyzer => "Defect Analyzer",
            ConfigField::KarateScript => "Karate Script Writer",
            ConfigField::SmartspecScript => "SmartSpec Script Writer",
            ConfigField::JiraIntegration => "Jira Integration",
            ConfigField::UrlProcessing => "URL Processing",
            ConfigField::FileProcessing => "File Processing",
        }
    }

    pub fn is_base_url(&self) -> bool {
        matches!(self, ConfigField::BaseUrl)
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ConfigField {
    type Err = DomainError;

    /// Accepts the storage key (`chatbotEndpoint`), the same without the
    /// `Endpoint` suffix, or a kebab-case form (`chatbot`, `base-url`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        let normalized = normalized.strip_suffix("endpoint").unwrap_or(&normalized);

        ConfigField::ALL
            .into_iter()
            .find(|field| {
                let key = field.key().to_lowercase();
                key.strip_suffix("endpoint").unwrap_or(&key) == normalized
            })
            .ok_or_else(|| DomainError::UnknownConfigField(s.to_string()))
    }
}
