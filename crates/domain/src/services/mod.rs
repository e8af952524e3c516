//! Domain Services - pure logic over entities and value objects

pub mod input;
pub mod json_compare;
pub mod monitor;
pub mod prompt_builder;

pub use input::{json_analyzer_input, parse_json_input, require_input};
pub use json_compare::{compare_json, ComparisonOutcome, ComparisonRow};
pub use monitor::{
    paginate, team_options, total_pages, EndpointFilter, MonitorView, StatusSummary,
    CARDS_PER_PAGE,
};
pub use prompt_builder::{build_prompt, compose_prompt};
