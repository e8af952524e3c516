//! Build pipeline value objects

use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a pipeline build. Unknown states from the backend land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Success,
    Failed,
    Running,
    #[serde(other)]
    Other,
}

impl BuildStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Success => "success",
            BuildStatus::Failed => "failed",
            BuildStatus::Running => "running",
            BuildStatus::Other => "unknown",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application a build can be triggered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildApp {
    Tsdm,
    Navigator,
}

impl BuildApp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildApp::Tsdm => "tsdm",
            BuildApp::Navigator => "navigator",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuildApp::Tsdm => "TSDM",
            BuildApp::Navigator => "Navigator",
        }
    }
}

impl FromStr for BuildApp {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tsdm" => Ok(BuildApp::Tsdm),
            "navigator" => Ok(BuildApp::Navigator),
            other => Err(DomainError::InvalidBuildTarget(other.to_string())),
        }
    }
}

/// Target environment of a triggered build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildEnv {
    Qa,
    Prod,
}

impl BuildEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildEnv::Qa => "qa",
            BuildEnv::Prod => "prod",
        }
    }
}

impl FromStr for BuildEnv {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "qa" => Ok(BuildEnv::Qa),
            "prod" | "production" => Ok(BuildEnv::Prod),
            other => Err(DomainError::InvalidBuildTarget(other.to_string())),
        }
    }
}
