//! Domain Entities - records the hub displays and sends

pub mod chat;
pub mod context;
pub mod monitored_endpoint;
pub mod pipeline;
pub mod tool;

pub use chat::{ChatTranscript, ChatTurn, HISTORY_WINDOW};
pub use context::{JiraStory, PromptContext, UrlInsight, UrlMetadata};
pub use monitored_endpoint::MonitoredEndpoint;
pub use pipeline::{BuildRecord, PipelineSnapshot, PipelineStats};
pub use tool::{ToolDescriptor, ToolIntegration, ToolPromptSpec};
