//! MonitoredEndpoint - one service shown in the endpoint monitor

use crate::value_objects::EndpointStatus;
use serde::{Deserialize, Serialize};

/// Health record for a monitored service, as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredEndpoint {
    pub id: String,
    pub name: String,
    pub url: String,
    pub status: EndpointStatus,
    /// Last response time in milliseconds
    #[serde(rename = "responseTime")]
    pub response_time_ms: u64,
    /// Display label such as "30s ago"
    #[serde(alias = "lastChecked")]
    pub last_check: String,
    pub team: String,
}

impl MonitoredEndpoint {
    /// Case-insensitive substring match against name or URL.
    /// `needle` must already be lowercase.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.url.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "id": "ep-1",
            "name": "Payments API",
            "url": "https://pay.example.com/health",
            "status": "warning",
            "responseTime": 842,
            "lastChecked": "12s ago",
            "team": "Payments"
        }"#;

        let endpoint: MonitoredEndpoint = serde_json::from_str(json).unwrap();
        assert_eq!(endpoint.status, EndpointStatus::Warning);
        assert_eq!(endpoint.response_time_ms, 842);
        assert_eq!(endpoint.last_check, "12s ago");
    }

    #[test]
    fn test_matches_search() {
        let endpoint = MonitoredEndpoint {
            id: "1".into(),
            name: "Auth Service".into(),
            url: "https://auth.internal/ping".into(),
            status: EndpointStatus::Up,
            response_time_ms: 40,
            last_check: "now".into(),
            team: "Identity".into(),
        };

        assert!(endpoint.matches_search(""));
        assert!(endpoint.matches_search("auth"));
        assert!(endpoint.matches_search("internal/p"));
        assert!(!endpoint.matches_search("billing"));
    }
}
