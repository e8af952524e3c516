//! HTTP client for the QA Hub backend.
//!
//! Every backend call lives on [`HubClient`]. URLs come from the resolved
//! [`domain::EndpointConfig`]; nothing is retried.

mod error;
mod hub_client;
mod integrations;
mod request_slot;
mod tools;

pub use error::{ClientError, ClientResult};
pub use hub_client::{HubClient, DEFAULT_TIMEOUT};
pub use integrations::{
    BuildTriggerReply, ExportTarget, FileProcessingReply, FileUpload, TestCaseExport,
};
pub use request_slot::RequestSlot;
pub use tools::{reply_text, JsonAnalysis, ToolReply, ToolRequest};
