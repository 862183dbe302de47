//! CLI command definitions
//!
//! Defines the clap commands for the two harness entry points. Environment
//! fallbacks are declared here so that all environment access happens once,
//! at parse time.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Smoke-test the engine's management API (no execution is triggered)
    Smoke {
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Full execution test: reconcile the workflow, trigger one run,
    /// verify the response and the output files
    Run {
        #[command(flatten)]
        engine: EngineArgs,

        /// Directory tree to search for output files
        #[arg(long, env = "OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Directory containing the resume/job-description fixture texts
        #[arg(long, default_value = "fixtures")]
        fixtures_dir: PathBuf,

        /// Target language for the generated documents
        #[arg(long, default_value = "en")]
        language: String,

        /// Writing tone for the generated documents
        #[arg(long, default_value = "professional")]
        tone: String,

        /// Number of pages for the improved resume
        #[arg(long, default_value = "1")]
        pages: u32,
    },
}

/// Engine connection arguments shared by both entry points
#[derive(Args)]
pub struct EngineArgs {
    /// n8n base URL
    #[arg(long = "n8n-url", env = "N8N_HOST", default_value = "http://localhost:5678")]
    pub n8n_url: String,

    /// n8n API key
    #[arg(long, env = "N8N_API_KEY")]
    pub api_key: Option<String>,

    /// Workflow to look up (case-insensitive substring of its name)
    #[arg(long, default_value = "Resume Enhancer")]
    pub workflow_name: String,

    /// Local workflow definition imported when the engine has no match
    #[arg(long, default_value = "workflow/workflow.json")]
    pub definition: PathBuf,
}
