use crate::error::{ClientError, ClientResult};
use common::OperationTimer;
use domain::{BuildApp, BuildEnv, EndpointConfig, MonitoredEndpoint, PipelineSnapshot};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::integrations::BuildTriggerReply;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct EndpointsPayload {
    endpoints: Vec<MonitoredEndpoint>,
}

#[derive(Debug, Serialize)]
struct TriggerBuildBody<'a> {
    app: &'a str,
    env: &'a str,
}

/// Client for every backend route the hub talks to
#[derive(Debug, Clone)]
pub struct HubClient {
    http: Client,
    config: EndpointConfig,
    timeout: Duration,
}

impl HubClient {
    pub fn new(config: EndpointConfig) -> ClientResult<Self> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(config: EndpointConfig, timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            config,
            timeout,
        })
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Swap in a new config; the connection pool is kept
    pub fn set_config(&mut self, config: EndpointConfig) {
        self.config = config;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Send, check the status and decode the body as JSON
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let body = self.send_text(operation, request).await?;
        serde_json::from_str(&body).map_err(|e| {
            error!(operation, error = %e, "Backend returned an unexpected body");
            ClientError::Decode(e.to_string())
        })
    }

    /// Send and check the status; the body is returned as text
    pub(crate) async fn send_text(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> ClientResult<String> {
        let timer = OperationTimer::new(operation);
        let timeout_secs = self.timeout.as_secs();

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = ClientError::from_reqwest(e, timeout_secs);
                timer.finish_with_error(&err.to_string());
                return Err(err);
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::from_reqwest(e, timeout_secs))?;

        if !status.is_success() {
            error!(operation, status = status.as_u16(), "Backend error: {}", body);
            timer.finish_with_error(&format!("HTTP {}", status.as_u16()));
            return Err(ClientError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let elapsed = timer.finish();
        debug!(operation, elapsed_ms = elapsed, bytes = body.len(), "Backend call succeeded");
        Ok(body)
    }

    /// `GET {baseUrl}/endpoints-monitor`
    pub async fn fetch_endpoints(&self) -> ClientResult<Vec<MonitoredEndpoint>> {
        let url = self.config.route("/endpoints-monitor");
        debug!("Fetching monitored endpoints from {}", url);

        let payload: EndpointsPayload = self
            .send_json("fetch_endpoints", self.http.get(&url))
            .await?;
        info!(count = payload.endpoints.len(), "Monitored endpoints refreshed");
        Ok(payload.endpoints)
    }

    /// `GET {baseUrl}/health`; any 2xx means connected
    pub async fn test_connection(&self) -> ClientResult<()> {
        let url = self.config.route("/health");
        self.send_text("health", self.http.get(&url)).await?;
        info!("Connected to backend at {}", self.config.base_url);
        Ok(())
    }

    /// `GET {baseUrl}/build-pipelines`
    pub async fn fetch_pipelines(&self) -> ClientResult<PipelineSnapshot> {
        let url = self.config.route("/build-pipelines");
        self.send_json("fetch_pipelines", self.http.get(&url)).await
    }

    /// `POST {baseUrl}/trigger-build`
    pub async fn trigger_build(&self, app: BuildApp, env: BuildEnv) -> ClientResult<BuildTriggerReply> {
        let url = self.config.route("/trigger-build");
        info!(
            "Triggering {} build for {}",
            env.as_str().to_uppercase(),
            app.display_name()
        );

        let body = TriggerBuildBody {
            app: app.as_str(),
            env: env.as_str(),
        };
        let text = self
            .send_text("trigger_build", self.http.post(&url).json(&body))
            .await?;

        // Some backends answer with an empty body
        if text.trim().is_empty() {
            return Ok(BuildTriggerReply::default());
        }
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{BuildStatus, EndpointStatus};
    use mockito::Server;

    fn client_for(server: &Server) -> HubClient {
        let config = EndpointConfig {
            base_url: server.url(),
            ..EndpointConfig::default()
        };
        HubClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_endpoints() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/endpoints-monitor")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"endpoints":[
                    {"id":"1","name":"Auth","url":"https://auth.test","status":"up","responseTime":42,"lastCheck":"5s ago","team":"Identity"},
                    {"id":"2","name":"Billing","url":"https://billing.test","status":"down","responseTime":0,"lastCheck":"1m ago","team":"Payments"}
                ]}"#,
            )
            .create_async()
            .await;

        let endpoints = client_for(&server).fetch_endpoints().await.unwrap();

        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[1].status, EndpointStatus::Down);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_endpoints_non_2xx_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/endpoints-monitor")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = client_for(&server).fetch_endpoints().await.unwrap_err();
        assert!(matches!(err, ClientError::Status { code: 500, ref body } if body == "boom"));
    }

    #[tokio::test]
    async fn test_fetch_endpoints_bad_shape_is_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/endpoints-monitor")
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let err = client_for(&server).fetch_endpoints().await.unwrap_err();
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_connection_check() {
        let mut server = Server::new_async().await;
        let ok = server
            .mock("GET", "/health")
            .with_status(204)
            .create_async()
            .await;

        client_for(&server).test_connection().await.unwrap();
        ok.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let config = EndpointConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..EndpointConfig::default()
        };
        let client = HubClient::with_timeout(config, Duration::from_secs(2)).unwrap();
        let err = client.test_connection().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Transport(_) | ClientError::Timeout(_)
        ));
    }

    #[tokio::test]
    async fn test_pipelines_and_trigger() {
        let mut server = Server::new_async().await;
        let _builds = server
            .mock("GET", "/build-pipelines")
            .with_status(200)
            .with_body(
                r#"{"builds":[{"id":"1","app":"TSDM","type":"QA","status":"running","time":"Just now","duration":"1m 30s"}]}"#,
            )
            .create_async()
            .await;
        let trigger = server
            .mock("POST", "/trigger-build")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"app": "navigator", "env": "prod"}),
            ))
            .with_status(202)
            .with_body(r#"{"message":"queued","buildId":"b-77"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let snapshot = client.fetch_pipelines().await.unwrap();
        assert_eq!(snapshot.builds[0].status, BuildStatus::Running);
        assert!(snapshot.stats.is_none());

        let reply = client
            .trigger_build(BuildApp::Navigator, BuildEnv::Prod)
            .await
            .unwrap();
        assert_eq!(reply.build_id.as_deref(), Some("b-77"));
        trigger.assert_async().await;
    }
}
