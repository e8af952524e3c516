//! EndpointStatus - health state reported for a monitored endpoint

use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Health state of a monitored endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    /// Responding normally
    Up,
    /// Responding, but degraded
    Warning,
    /// Not responding
    Down,
}

impl EndpointStatus {
    pub const ALL: [EndpointStatus; 3] = [
        EndpointStatus::Up,
        EndpointStatus::Warning,
        EndpointStatus::Down,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointStatus::Up => "up",
            EndpointStatus::Warning => "warning",
            EndpointStatus::Down => "down",
        }
    }

    /// Label used in summaries and status filters
    pub fn label(&self) -> &'static str {
        match self {
            EndpointStatus::Up => "Healthy",
            EndpointStatus::Warning => "Warning",
            EndpointStatus::Down => "Down",
        }
    }
}

impl fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "healthy" => Ok(EndpointStatus::Up),
            "warning" => Ok(EndpointStatus::Warning),
            "down" => Ok(EndpointStatus::Down),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_is_lowercase() {
        let json = serde_json::to_string(&EndpointStatus::Warning).unwrap();
        assert_eq!(json, "\"warning\"");

        let parsed: EndpointStatus = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(parsed, EndpointStatus::Down);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("UP".parse::<EndpointStatus>().unwrap(), EndpointStatus::Up);
        assert_eq!(
            "healthy".parse::<EndpointStatus>().unwrap(),
            EndpointStatus::Up
        );
        assert!("sleeping".parse::<EndpointStatus>().is_err());
    }
}
