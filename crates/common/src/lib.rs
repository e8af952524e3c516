pub mod errors;
pub mod structured_logging;

pub use errors::{ErrorSeverity, HubError, HubResult, NetworkError, ValidationError};

pub use structured_logging::{
    init_structured_logging, parse_level, ExecutionContext, LogSink, LoggingConfig,
    OperationTimer, StructuredLogEntry,
};
