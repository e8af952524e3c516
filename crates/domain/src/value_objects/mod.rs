//! Value Objects - small immutable domain concepts

pub mod build;
pub mod endpoint_status;
pub mod filters;

pub use build::{BuildApp, BuildEnv, BuildStatus};
pub use endpoint_status::EndpointStatus;
pub use filters::{StatusFilter, TeamFilter};
