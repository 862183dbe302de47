//! CLI command dispatch
//!
//! Builds the engine configuration from the parsed arguments and hands
//! control to the matching test driver.

use crate::commands::Commands;
use crate::common::{EngineConfig, Result};
use crate::report::TestResults;
use crate::runner::{self, RunOptions};
use crate::smoke;

/// Dispatch a CLI command, returning the aggregated results
pub async fn dispatch(command: Commands) -> Result<TestResults> {
    match command {
        Commands::Smoke { engine } => {
            let config = EngineConfig::from_args(engine)?;
            Ok(smoke::run(&config).await)
        }

        Commands::Run {
            engine,
            output_dir,
            fixtures_dir,
            language,
            tone,
            pages,
        } => {
            let config = EngineConfig::from_args(engine)?;
            let options = RunOptions {
                output_dir,
                fixtures_dir,
                language,
                tone,
                pages,
            };
            Ok(runner::run(&config, &options).await)
        }
    }
}
