//! Build pipeline records

use crate::value_objects::BuildStatus;
use serde::{Deserialize, Serialize};

/// One recent build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub id: String,
    pub app: String,
    /// Environment label, e.g. "QA" or "PROD"
    #[serde(rename = "type")]
    pub env: String,
    pub status: BuildStatus,
    pub time: String,
    pub duration: String,
}

/// Aggregate figures; the backend may omit any of them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineStats {
    pub successful_builds: Option<u64>,
    pub failed_builds: Option<u64>,
    pub avg_build_time: Option<String>,
    /// Percentage, 0-100
    pub success_rate: Option<f64>,
}

impl PipelineStats {
    /// Fill gaps from the build list itself
    pub fn with_fallback_from(mut self, builds: &[BuildRecord]) -> Self {
        let succeeded = builds
            .iter()
            .filter(|b| b.status == BuildStatus::Success)
            .count() as u64;
        let failed = builds
            .iter()
            .filter(|b| b.status == BuildStatus::Failed)
            .count() as u64;

        self.successful_builds.get_or_insert(succeeded);
        self.failed_builds.get_or_insert(failed);
        if self.success_rate.is_none() && succeeded + failed > 0 {
            self.success_rate = Some(succeeded as f64 * 100.0 / (succeeded + failed) as f64);
        }
        self
    }
}

/// Response of `GET /build-pipelines`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSnapshot {
    pub builds: Vec<BuildRecord>,
    pub stats: Option<PipelineStats>,
}

impl PipelineSnapshot {
    /// Stats as reported, completed from the build list where missing
    pub fn effective_stats(&self) -> PipelineStats {
        self.stats
            .clone()
            .unwrap_or_default()
            .with_fallback_from(&self.builds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_without_stats() {
        let json = r#"{"builds":[
            {"id":"1","app":"TSDM","type":"QA","status":"success","time":"2 minutes ago","duration":"3m 24s"},
            {"id":"2","app":"TSDM","type":"PROD","status":"failed","time":"1 hour ago","duration":"2m 45s"},
            {"id":"3","app":"Navigator","type":"QA","status":"running","time":"Just now","duration":"1m 30s"}
        ]}"#;

        let snapshot: PipelineSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.builds.len(), 3);
        assert_eq!(snapshot.builds[0].env, "QA");

        let stats = snapshot.effective_stats();
        assert_eq!(stats.successful_builds, Some(1));
        assert_eq!(stats.failed_builds, Some(1));
        assert_eq!(stats.success_rate, Some(50.0));
        assert_eq!(stats.avg_build_time, None);
    }

    #[test]
    fn test_reported_stats_win() {
        let json = r#"{"builds":[],"stats":{"successfulBuilds":24,"failedBuilds":3,"avgBuildTime":"4m 32s","successRate":89}}"#;
        let snapshot: PipelineSnapshot = serde_json::from_str(json).unwrap();
        let stats = snapshot.effective_stats();
        assert_eq!(stats.successful_builds, Some(24));
        assert_eq!(stats.avg_build_time.as_deref(), Some("4m 32s"));
        assert_eq!(stats.success_rate, Some(89.0));
    }
}
