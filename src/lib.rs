//! Integration-test harness for n8n workflow deployments
//!
//! Given network access to a running engine, the harness reconciles a named
//! workflow (find it, or import and activate it from a local definition),
//! triggers one execution with a correlated synthetic payload, and verifies
//! both the structured response and the output artifacts on disk.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod lifecycle;
pub mod report;
pub mod runner;
pub mod smoke;

// Re-export commonly used types for tests
pub use common::{EngineConfig, Error, Result};
pub use report::TestResults;
