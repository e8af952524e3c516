use common::{HubError, NetworkError, ValidationError};
use domain::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Backend responded with status: {code}")]
    Status { code: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// Rejected before anything was sent
    #[error(transparent)]
    InvalidInput(#[from] DomainError),

    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// A newer request replaced this one
    #[error("Request superseded by a newer one")]
    Superseded,
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(timeout_secs)
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Timeout(_) => "TIMEOUT",
            ClientError::Status { .. } => "HTTP_STATUS",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::InvalidInput(_) => "INVALID_INPUT",
            ClientError::Config(_) => "CLIENT_CONFIG",
            ClientError::Superseded => "SUPERSEDED",
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, ClientError::Superseded)
    }
}

impl From<ClientError> for HubError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(msg) => NetworkError::ConnectionFailed(msg).into(),
            ClientError::Timeout(secs) => NetworkError::Timeout(secs).into(),
            ClientError::Status { code, body } => NetworkError::Http {
                code,
                message: body,
            }
            .into(),
            ClientError::Decode(msg) => NetworkError::InvalidResponse(msg).into(),
            ClientError::InvalidInput(err) => HubError::Validation(match err {
                DomainError::EmptyInput(label) => ValidationError::MissingInput(label),
                DomainError::InvalidJson { field, reason } => {
                    ValidationError::InvalidJson { field, reason }
                }
                DomainError::UnknownTool(id) => ValidationError::UnknownTool(id),
                other => ValidationError::InvalidValue {
                    field: "input".to_string(),
                    reason: other.to_string(),
                },
            }),
            ClientError::Config(msg) => HubError::Configuration(msg),
            ClientError::Superseded => HubError::Superseded,
        }
    }
}
