//! Engine Client
//!
//! A thin, stateless wrapper over the engine's REST management API and its
//! webhook trigger endpoint. One method per operation, no retries, no
//! caching; every failure comes back as a value.

mod client;
mod types;

pub use client::EngineClient;
pub use types::{
    new_correlation_id, ExecutionRecord, ExecutionRequest, Listing, TriggerBody, TriggerOutcome,
    WorkflowDetail, WorkflowRef,
};
