//! Management API smoke test
//!
//! Exercises the engine's REST surface end to end without triggering an
//! execution: connectivity, listing, find-or-import, detail fetch,
//! structural validation, and the execution log.

use crate::api::EngineClient;
use crate::common::EngineConfig;
use crate::lifecycle::{self, Provenance};
use crate::report::{print_banner, print_status, Status, TestResults};

/// Run the smoke-test sequence
pub async fn run(config: &EngineConfig) -> TestResults {
    let mut results = TestResults::new();
    print_banner("Engine Management API Smoke Tests");

    let client = EngineClient::new(config);

    // Test 1: health check
    print_status("Test 1: Health check...", Status::Info);
    results.start_check();
    if client.health_check().await {
        results.pass("Health check successful");
    } else {
        results.fail("Health check failed");
        results.print_summary();
        return results;
    }

    // Test 2: list workflows
    println!();
    print_status("Test 2: Listing workflows...", Status::Info);
    results.start_check();
    match client.list_workflows(100).await {
        Ok(workflows) => results.pass(&format!("Found {} workflows", workflows.len())),
        Err(e) => results.fail(&format!("Could not list workflows: {e}")),
    }

    // Test 3: find or import the target workflow
    println!();
    print_status(
        &format!("Test 3: Finding {} workflow...", config.workflow_name),
        Status::Info,
    );
    results.start_check();
    let workflow =
        match lifecycle::ensure_workflow(&client, &config.workflow_name, &config.definition_path)
            .await
        {
            Ok(reconciled) => {
                match reconciled.provenance {
                    Provenance::Found => {
                        results.pass(&format!("Workflow found: {}", reconciled.workflow.id));
                    }
                    Provenance::Imported { activated } => {
                        print_status("Workflow not found, importing...", Status::Warn);
                        results.pass(&format!("Workflow imported: {}", reconciled.workflow.id));
                        if !activated {
                            results.warn("Failed to activate workflow");
                        }
                    }
                }
                reconciled.workflow
            }
            Err(e) => {
                results.fail(&e.to_string());
                results.print_summary();
                return results;
            }
        };

    // Test 4: workflow details
    println!();
    print_status("Test 4: Fetching workflow details...", Status::Info);
    results.start_check();
    match client.get_workflow(&workflow.id).await {
        Ok(detail) => results.pass(&format!(
            "Got workflow with {} nodes and {} connections",
            detail.node_count(),
            detail.connection_count()
        )),
        Err(e) => results.fail(&format!("Could not get workflow details: {e}")),
    }

    // Test 5: structural validation
    println!();
    print_status("Test 5: Validating workflow...", Status::Info);
    results.start_check();
    match lifecycle::validate_workflow(&client, &workflow.id).await {
        Ok(report) if report.issues.is_empty() => results.pass("Workflow is valid"),
        Ok(report) => {
            results.pass(&format!(
                "Validation complete with {} issues",
                report.issues.len()
            ));
            for issue in &report.issues {
                print_status(issue, Status::Warn);
            }
        }
        Err(e) => results.fail(&format!("Validation failed: {e}")),
    }

    // Test 6: execution log
    println!();
    print_status("Test 6: Listing executions...", Status::Info);
    results.start_check();
    match client.list_executions(&workflow.id, 5).await {
        Ok(executions) => {
            results.pass(&format!("Found {} executions", executions.len()));
            if let Some(latest) = executions.first() {
                match client.get_execution(&latest.id_display()).await {
                    Ok(record) => print_status(
                        &format!(
                            "Latest execution {}: {}",
                            record.id_display(),
                            record.status.as_deref().unwrap_or("unknown")
                        ),
                        Status::Info,
                    ),
                    Err(e) => print_status(
                        &format!("Could not fetch latest execution: {e}"),
                        Status::Warn,
                    ),
                }
            }
        }
        Err(e) => results.fail(&format!("Could not list executions: {e}")),
    }

    results.print_summary();
    results
}
