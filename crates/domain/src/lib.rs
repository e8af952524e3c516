//! Domain layer for QA Hub
//!
//! Pure data model and rules of the dashboard:
//! - config: backend base URL and per-tool endpoint paths
//! - entities: monitored endpoints, builds, Jira/URL context, chat history
//! - services: endpoint filtering and pagination, prompt composition, JSON comparison
//! - catalog: the static tool, prompt and help content
//!
//! Nothing in this crate performs I/O.

pub mod catalog;
pub mod config;
pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use catalog::{find_tool, prompt_spec, TOOLS};
pub use config::{ConfigField, EndpointConfig, PartialEndpointConfig, DEFAULT_BASE_URL};
pub use entities::{
    BuildRecord, ChatTranscript, ChatTurn, JiraStory, MonitoredEndpoint, PipelineSnapshot,
    PipelineStats, PromptContext, ToolDescriptor, ToolIntegration, ToolPromptSpec, UrlInsight,
    UrlMetadata, HISTORY_WINDOW,
};
pub use errors::{DomainError, DomainResult};
pub use repositories::ConfigRepository;
pub use services::{
    build_prompt, compare_json, compose_prompt, json_analyzer_input, paginate, parse_json_input,
    require_input, team_options, total_pages, ComparisonOutcome, ComparisonRow, EndpointFilter,
    MonitorView, StatusSummary, CARDS_PER_PAGE,
};
pub use value_objects::{BuildApp, BuildEnv, BuildStatus, EndpointStatus, StatusFilter, TeamFilter};
