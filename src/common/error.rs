//! Error types for the harness
//!
//! Transport and protocol failures are ordinary values here; the drivers
//! convert them into failed or warned checks. Only the missing-credential
//! and missing-fixture class aborts a run.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("n8n API key is required. Set N8N_API_KEY or use --api-key")]
    MissingApiKey,

    // === Transport Errors ===
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // === Protocol Errors ===
    #[error("Engine returned HTTP {status} for {url}: {body}")]
    Protocol {
        url: String,
        status: u16,
        body: String,
    },

    // === Setup Errors ===
    #[error("Workflow definition not found: {path}")]
    DefinitionMissing { path: String },

    #[error("Workflow definition '{path}' is not valid JSON: {error}")]
    DefinitionInvalid { path: String, error: String },

    #[error("Fixture not found: {path}")]
    FixtureMissing { path: String },

    #[error("Workflow import failed: HTTP {status} - {body}")]
    ImportFailed { status: u16, body: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a transport error for a failed request
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// Create a protocol error from a non-2xx response
    pub fn protocol(url: &str, status: u16, body: String) -> Self {
        Self::Protocol {
            url: url.to_string(),
            status,
            body,
        }
    }
}
