//! Engine API wire types

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Workflow record as it appears in the listing endpoint and in the
/// create response. Identity is the engine-assigned id; the name is only
/// used for human lookup and is not unique on the engine side.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

/// Full workflow record from `GET /workflows/{id}`
#[derive(Debug, Deserialize)]
pub struct WorkflowDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub nodes: Vec<Value>,
    #[serde(default)]
    pub connections: serde_json::Map<String, Value>,
}

impl WorkflowDetail {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

/// Execution record from the executions endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionRecord {
    /// Engine-assigned id; a number on current engines, but kept opaque
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "startedAt")]
    pub started_at: Option<String>,
    #[serde(default, rename = "stoppedAt")]
    pub stopped_at: Option<String>,
}

impl ExecutionRecord {
    /// The id as a plain string, whatever JSON type the engine used
    pub fn id_display(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Paged `{"data": [...]}` envelope used by the management API
#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    #[serde(default)]
    pub data: Vec<T>,
}

/// Payload for the webhook trigger call. Field names follow the engine's
/// wire contract; the correlation id travels as `request_id`.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRequest {
    #[serde(rename = "request_id")]
    pub correlation_id: String,
    pub jd_text: String,
    pub resume_text: String,
    pub language: String,
    pub tone: String,
    pub pages: u32,
}

impl ExecutionRequest {
    /// Build a request with a fresh correlation id
    pub fn new(
        job_description: String,
        resume_text: String,
        language: String,
        tone: String,
        pages: u32,
    ) -> Self {
        Self {
            correlation_id: new_correlation_id(),
            jd_text: job_description,
            resume_text,
            language,
            tone,
            pages,
        }
    }
}

static CORRELATION_SEQ: AtomicU32 = AtomicU32::new(0);

/// Generate a correlation id unique for the lifetime of this process.
///
/// The token joins the trigger request, the engine's execution record, and
/// the output directory on disk, so it must never repeat: wall clock and
/// pid distinguish processes, the sequence distinguishes calls within one.
pub fn new_correlation_id() -> String {
    let seq = CORRELATION_SEQ.fetch_add(1, Ordering::Relaxed);
    format!(
        "test_{}_{}_{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        std::process::id(),
        seq
    )
}

/// Body of the trigger response, decoded only when the engine said JSON
#[derive(Debug, Clone)]
pub enum TriggerBody {
    Json(Value),
    Text(String),
}

impl fmt::Display for TriggerBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerBody::Json(value) => write!(f, "{value}"),
            TriggerBody::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Raw result of one webhook trigger call.
///
/// `http_status` is 0 for transport failures (timeout, connection error),
/// mirroring the distinction the drivers report on.
#[derive(Debug)]
pub struct TriggerOutcome {
    pub http_status: u16,
    pub body: TriggerBody,
    pub correlation_id: String,
}
