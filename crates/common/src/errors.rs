use thiserror::Error;

/// Error hierarchy shared by every QA Hub crate.
///
/// Nothing in the hub is fatal: callers turn these into a message for the
/// user and fall back to an empty or default view.
#[derive(Error, Debug)]
pub enum HubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Request superseded by a newer one")]
    Superseded,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures talking to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout after {0}s")]
    Timeout(u64),

    #[error("HTTP error {code}: {message}")]
    Http { code: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// User input rejected before any request is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required input: {0}")]
    MissingInput(String),

    #[error("Invalid JSON in {field}: {reason}")]
    InvalidJson { field: String, reason: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Error severity for logging decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
}

impl HubError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HubError::Validation(_) | HubError::NotFound(_) | HubError::Superseded => {
                ErrorSeverity::Low
            }
            HubError::Network(_) | HubError::Serialization(_) => ErrorSeverity::Medium,
            HubError::Io(_)
            | HubError::Configuration(_)
            | HubError::Storage(_)
            | HubError::Internal(_) => ErrorSeverity::High,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            HubError::Io(_) => "IO_ERROR",
            HubError::Network(_) => "NET_ERROR",
            HubError::Serialization(_) => "SERIALIZATION_ERROR",
            HubError::Validation(_) => "VALIDATION_ERROR",
            HubError::NotFound(_) => "NOT_FOUND",
            HubError::Configuration(_) => "CONFIG_ERROR",
            HubError::Storage(_) => "STORAGE_ERROR",
            HubError::Superseded => "SUPERSEDED",
            HubError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Short text suitable for a one-line notification.
    pub fn user_message(&self) -> String {
        match self {
            HubError::Network(NetworkError::Http { code, .. }) => {
                format!("Backend responded with status: {code}")
            }
            HubError::Network(_) => {
                "Failed to reach the backend. Check the base URL in settings.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        HubError::Serialization(err.to_string())
    }
}

pub type HubResult<T> = Result<T, HubError>;
