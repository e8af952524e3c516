//! Domain Errors - rule violations in the pure model

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Tool id not present in the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Config field name not recognised
    #[error("Unknown config field: {0}")]
    UnknownConfigField(String),

    #[error("Invalid endpoint status: {0}")]
    InvalidStatus(String),

    #[error("Invalid build target: {0}")]
    InvalidBuildTarget(String),

    /// Required user input was empty
    #[error("{0} is required")]
    EmptyInput(String),

    /// Input that must be JSON did not parse
    #[error("Invalid JSON in {field}: {reason}")]
    InvalidJson { field: String, reason: String },

    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    /// Persisted configuration could not be read or written
    #[error("Configuration storage failed: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::UnknownTool(_) => "UNKNOWN_TOOL",
            DomainError::UnknownConfigField(_) => "UNKNOWN_CONFIG_FIELD",
            DomainError::InvalidStatus(_) => "INVALID_STATUS",
            DomainError::InvalidBuildTarget(_) => "INVALID_BUILD_TARGET",
            DomainError::EmptyInput(_) => "EMPTY_INPUT",
            DomainError::InvalidJson { .. } => "INVALID_JSON",
            DomainError::EndpointNotFound(_) => "ENDPOINT_NOT_FOUND",
            DomainError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Errors caused by what the user typed, as opposed to the environment
    pub fn is_input_error(&self) -> bool {
        !matches!(self, DomainError::Storage(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
