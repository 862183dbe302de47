//! Harness configuration
//!
//! Built once at startup from the parsed CLI arguments and handed to the
//! drivers by reference. Components never read the environment themselves;
//! the env fallbacks live on the clap definitions in `commands.rs`.

use std::path::PathBuf;

use crate::commands::EngineArgs;

use super::{Error, Result};

/// Engine connection and reconciliation settings
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Engine base URL, without a trailing slash
    pub base_url: String,

    /// Static credential sent on every management API call
    pub api_key: String,

    /// Workflow to reconcile (case-insensitive substring of its name)
    pub workflow_name: String,

    /// Local definition imported when the engine has no matching workflow
    pub definition_path: PathBuf,
}

impl EngineConfig {
    /// Validate the parsed arguments and build the config value.
    ///
    /// A missing or empty API key fails here, before any network call.
    pub fn from_args(args: EngineArgs) -> Result<Self> {
        let api_key = args
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or(Error::MissingApiKey)?;

        Ok(Self {
            base_url: args.n8n_url.trim_end_matches('/').to_string(),
            api_key,
            workflow_name: args.workflow_name,
            definition_path: args.definition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(api_key: Option<&str>) -> EngineArgs {
        EngineArgs {
            n8n_url: "http://localhost:5678/".to_string(),
            api_key: api_key.map(str::to_string),
            workflow_name: "Resume Enhancer".to_string(),
            definition: PathBuf::from("workflow/workflow.json"),
        }
    }

    #[test]
    fn missing_api_key_is_a_startup_error() {
        assert!(matches!(
            EngineConfig::from_args(args(None)),
            Err(Error::MissingApiKey)
        ));
        assert!(matches!(
            EngineConfig::from_args(args(Some(""))),
            Err(Error::MissingApiKey)
        ));
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = EngineConfig::from_args(args(Some("key"))).unwrap();
        assert_eq!(config.base_url, "http://localhost:5678");
    }
}
