//! HTTP client for the engine's management API and webhook trigger
//!
//! Timeouts are per operation class: short for the health probe, medium
//! for CRUD and listing, long for the trigger call, which blocks inside
//! the engine until the run finishes.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use crate::common::{EngineConfig, Error, Result};

use super::types::{
    ExecutionRecord, ExecutionRequest, Listing, TriggerBody, TriggerOutcome, WorkflowDetail,
    WorkflowRef,
};

/// Timeout for the health probe
const SHORT_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for CRUD and listing calls
const MEDIUM_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for the webhook trigger; covers the engine's own processing time
const LONG_TIMEOUT: Duration = Duration::from_secs(300);

const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Stateless wrapper over one engine instance
pub struct EngineClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl EngineClient {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// True iff the management API answers 200 within the short timeout
    pub async fn health_check(&self) -> bool {
        let url = self.api_url("/workflows");
        debug!("GET {url} (health)");
        match self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(SHORT_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                debug!("health check failed: {e}");
                false
            }
        }
    }

    /// `GET /workflows?limit=N`, single page
    pub async fn list_workflows(&self, limit: u32) -> Result<Vec<WorkflowRef>> {
        let url = self.api_url("/workflows");
        debug!("GET {url}?limit={limit}");
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("limit", limit)])
            .timeout(MEDIUM_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::transport(&url, e))?;

        let listing: Listing<WorkflowRef> = Self::read_json(&url, response).await?;
        Ok(listing.data)
    }

    /// `GET /workflows/{id}`, full record including nodes and connections
    pub async fn get_workflow(&self, id: &str) -> Result<WorkflowDetail> {
        let url = self.api_url(&format!("/workflows/{id}"));
        debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(MEDIUM_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::transport(&url, e))?;

        Self::read_json(&url, response).await
    }

    /// `POST /workflows` with a definition body; 200 and 201 both succeed
    pub async fn create_workflow(&self, definition: &Value) -> Result<WorkflowRef> {
        let url = self.api_url("/workflows");
        debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(definition)
            .timeout(MEDIUM_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::transport(&url, e))?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::protocol(&url, status.as_u16(), body));
        }
        response.json().await.map_err(|e| Error::transport(&url, e))
    }

    /// `PATCH /workflows/{id}` with `{"active": ...}`
    pub async fn set_active(&self, id: &str, active: bool) -> Result<()> {
        let url = self.api_url(&format!("/workflows/{id}"));
        debug!("PATCH {url} active={active}");
        let response = self
            .http
            .patch(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&json!({ "active": active }))
            .timeout(MEDIUM_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::transport(&url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::protocol(&url, status.as_u16(), body));
        }
        Ok(())
    }

    /// `GET /executions?workflowId=&limit=`, most recent first
    pub async fn list_executions(
        &self,
        workflow_id: &str,
        limit: u32,
    ) -> Result<Vec<ExecutionRecord>> {
        let url = self.api_url("/executions");
        debug!("GET {url}?workflowId={workflow_id}&limit={limit}");
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("workflowId", workflow_id)])
            .query(&[("limit", limit)])
            .timeout(MEDIUM_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::transport(&url, e))?;

        let listing: Listing<ExecutionRecord> = Self::read_json(&url, response).await?;
        Ok(listing.data)
    }

    /// `GET /executions/{id}`, single record
    pub async fn get_execution(&self, id: &str) -> Result<ExecutionRecord> {
        let url = self.api_url(&format!("/executions/{id}"));
        debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(MEDIUM_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::transport(&url, e))?;

        Self::read_json(&url, response).await
    }

    /// POST the execution request to the webhook trigger path.
    ///
    /// The engine holds the connection open until the run finishes or the
    /// deadline passes. Transport failures come back as status 0 rather
    /// than an error; the webhook namespace takes no API key.
    pub async fn trigger_retry(&self, request: &ExecutionRequest) -> TriggerOutcome {
        let url = format!("{}/webhook/resume-enhancer/retry", self.base_url);
        debug!("POST {url} request_id={}", request.correlation_id);
        match self
            .http
            .post(&url)
            .json(request)
            .timeout(LONG_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => {
                let http_status = response.status().as_u16();
                let is_json = response
                    .headers()
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.starts_with("application/json"))
                    .unwrap_or(false);

                let body = if is_json {
                    match response.json::<Value>().await {
                        Ok(value) => TriggerBody::Json(value),
                        Err(e) => TriggerBody::Text(format!("invalid JSON body: {e}")),
                    }
                } else {
                    TriggerBody::Text(response.text().await.unwrap_or_default())
                };

                TriggerOutcome {
                    http_status,
                    body,
                    correlation_id: request.correlation_id.clone(),
                }
            }
            Err(e) => {
                let reason = if e.is_timeout() {
                    "Request timed out".to_string()
                } else {
                    e.to_string()
                };
                TriggerOutcome {
                    http_status: 0,
                    body: TriggerBody::Text(reason),
                    correlation_id: request.correlation_id.clone(),
                }
            }
        }
    }

    /// Decode a JSON response, turning non-2xx statuses into protocol errors
    async fn read_json<T: serde::de::DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::protocol(url, status.as_u16(), body));
        }
        response.json().await.map_err(|e| Error::transport(url, e))
    }
}
