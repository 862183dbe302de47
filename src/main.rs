//! flowcheck - integration-test harness for n8n workflow deployments
//!
//! Drives a running engine over its REST management API and webhook
//! trigger endpoint, reporting each check as a pass/fail/warn line.

use clap::Parser;
use flowcheck::{cli, commands::Commands, common::logging};

#[derive(Parser)]
#[command(name = "flowcheck", about = "Integration-test harness for n8n workflow deployments")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    let code = match cli::dispatch(cli.command).await {
        Ok(results) => results.exit_code(),
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    };

    std::process::exit(code);
}
