//! Full execution test driver
//!
//! Runs the ordered check sequence: load fixtures, verify connectivity,
//! reconcile the workflow, trigger one execution, verify the output
//! artifacts, and cross-check the engine's execution log. Each check
//! prints a labeled line and feeds the aggregate result set.

pub mod artifacts;
pub mod fixtures;

use std::path::PathBuf;

use serde_json::Value;

use crate::api::{EngineClient, ExecutionRequest, TriggerBody, TriggerOutcome};
use crate::common::EngineConfig;
use crate::lifecycle::{self, Provenance};
use crate::report::{print_banner, print_status, Status, TestResults};

/// Options specific to the full execution test
#[derive(Debug)]
pub struct RunOptions {
    pub output_dir: Option<PathBuf>,
    pub fixtures_dir: PathBuf,
    pub language: String,
    pub tone: String,
    pub pages: u32,
}

/// Application-level interpretation of one trigger call.
///
/// The four kinds are never collapsed: a timeout, a 502, and a
/// 200-with-failure-body are different diagnoses even though each counts
/// as one failed check.
#[derive(Debug)]
pub enum OutcomeKind<'a> {
    /// HTTP 200 with a JSON body whose `success` flag is true
    Success(&'a Value),
    /// HTTP 200, but the engine reported a logical failure (or the body
    /// was not JSON). The workflow malfunctioned, not the API layer.
    ApplicationFailure(String),
    /// Non-200 status from the engine
    HttpFailure { status: u16, body: String },
    /// Connection error, DNS failure, or timeout (status 0)
    TransportFailure(String),
}

/// Classify a trigger outcome. HTTP layer first, then the body.
pub fn classify(outcome: &TriggerOutcome) -> OutcomeKind<'_> {
    if outcome.http_status == 0 {
        return OutcomeKind::TransportFailure(outcome.body.to_string());
    }
    if outcome.http_status != 200 {
        return OutcomeKind::HttpFailure {
            status: outcome.http_status,
            body: outcome.body.to_string(),
        };
    }
    match &outcome.body {
        TriggerBody::Json(value) if value.get("success").and_then(Value::as_bool) == Some(true) => {
            OutcomeKind::Success(value)
        }
        body => OutcomeKind::ApplicationFailure(body.to_string()),
    }
}

/// Run the full execution test sequence
pub async fn run(config: &EngineConfig, options: &RunOptions) -> TestResults {
    let mut results = TestResults::new();
    print_banner("Resume Enhancer Workflow Tests");

    // Test 1: fixtures
    print_status("Test 1: Loading test fixtures...", Status::Info);
    results.start_check();
    let fixtures = match fixtures::load(&options.fixtures_dir) {
        Ok(fixtures) => {
            results.pass(&format!(
                "Loaded resume ({} chars) and JD ({} chars)",
                fixtures.resume_text.chars().count(),
                fixtures.job_description.chars().count()
            ));
            fixtures
        }
        Err(e) => {
            results.fail(&format!("Failed to load fixtures: {e}"));
            println!("\nCannot continue without fixtures. Exiting.");
            return results;
        }
    };

    // Test 2: engine connectivity
    println!();
    print_status("Test 2: Checking engine connection...", Status::Info);
    results.start_check();
    let client = EngineClient::new(config);
    if client.health_check().await {
        results.pass("Engine is accessible");
    } else {
        results.fail("Cannot connect to the engine");
        println!("\nCannot continue without an engine connection. Exiting.");
        return results;
    }

    // Test 3: find or import the workflow
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
                        results.pass(&format!("Found workflow: {}", reconciled.workflow.id));
                    }
                    Provenance::Imported { activated } => {
                        print_status("Workflow not found, attempting import...", Status::Warn);
                        results.pass(&format!("Imported workflow: {}", reconciled.workflow.id));
                        if activated {
                            print_status("Workflow activated", Status::Pass);
                        } else {
                            results.warn("Failed to activate workflow");
                        }
                    }
                }
                reconciled.workflow
            }
            Err(e) => {
                results.fail(&e.to_string());
                return results;
            }
        };

    // Test 4: trigger one execution over the webhook
    println!();
    print_status("Test 4: Triggering workflow via /retry endpoint...", Status::Info);
    print_status("This may take a few minutes...", Status::Info);
    results.start_check();
    let request = ExecutionRequest::new(
        fixtures.job_description,
        fixtures.resume_text,
        options.language.clone(),
        options.tone.clone(),
        options.pages,
    );
    let outcome = client.trigger_retry(&request).await;
    match classify(&outcome) {
        OutcomeKind::Success(body) => {
            results.pass("Workflow executed successfully");
            print_status(&format!("Request ID: {}", outcome.correlation_id), Status::Info);
            if let Some(score) = body.get("fit_score") {
                print_status(&format!("Fit Score: {score}"), Status::Info);
            }
            if let Some(quality) = body.get("quality_status").and_then(Value::as_str) {
                print_status(&format!("Quality Status: {quality}"), Status::Info);
            }
        }
        OutcomeKind::ApplicationFailure(message) => {
            results.fail(&format!("Workflow returned error: {message}"));
        }
        OutcomeKind::HttpFailure { status, body } => {
            results.fail(&format!("Request failed: {status} - {body}"));
        }
        OutcomeKind::TransportFailure(reason) => {
            results.fail(&format!("Request failed before a response arrived: {reason}"));
        }
    }

    // Test 5: output files tagged with the correlation id
    println!();
    print_status("Test 5: Checking output files...", Status::Info);
    results.start_check();
    match &options.output_dir {
        Some(root) => {
            let report = artifacts::check_outputs(root, &outcome.correlation_id).await;
            if report.success {
                results.pass(&format!("Found {} files", report.found.len()));
                for file in &report.found {
                    print_status(&format!("  - {file}"), Status::Info);
                }
                if !report.missing.is_empty() {
                    results.warn(&format!("Missing {} files:", report.missing.len()));
                    for file in &report.missing {
                        print_status(&format!("  - {file}"), Status::Warn);
                    }
                }
            } else if !report.dir_found {
                results.fail(&format!(
                    "No output directory named '{}' under {}",
                    outcome.correlation_id,
                    root.display()
                ));
            } else {
                results.fail("No output files found");
            }
        }
        None => {
            results.warn("Output directory not specified, skipping file check");
        }
    }

    // Test 6: execution log cross-check
    println!();
    print_status("Test 6: Checking execution logs...", Status::Info);
    results.start_check();
    match client.list_executions(&workflow.id, 5).await {
        Ok(executions) if !executions.is_empty() => {
            results.pass(&format!("Found {} recent executions", executions.len()));
            let latest = &executions[0];
            let status = latest.status.as_deref().unwrap_or("unknown");
            print_status(&format!("Latest execution: {status}"), Status::Info);
        }
        Ok(_) => results.warn("No executions found"),
        Err(e) => results.warn(&format!("Failed to list executions: {e}")),
    }

    results.print_summary();
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(http_status: u16, body: TriggerBody) -> TriggerOutcome {
        TriggerOutcome {
            http_status,
            body,
            correlation_id: "test_1_1_0".to_string(),
        }
    }

    #[test]
    fn transport_failure_is_status_zero() {
        let kind = classify(&outcome(0, TriggerBody::Text("Request timed out".into())));
        assert!(matches!(kind, OutcomeKind::TransportFailure(_)));
    }

    #[test]
    fn non_200_is_http_failure() {
        let kind = classify(&outcome(502, TriggerBody::Text("bad gateway".into())));
        match kind {
            OutcomeKind::HttpFailure { status, .. } => assert_eq!(status, 502),
            other => panic!("expected HttpFailure, got {other:?}"),
        }
    }

    #[test]
    fn logical_failure_is_distinct_from_http_failure() {
        let kind = classify(&outcome(
            200,
            TriggerBody::Json(json!({"success": false, "error": "LLM quota exceeded"})),
        ));
        assert!(matches!(kind, OutcomeKind::ApplicationFailure(_)));
    }

    #[test]
    fn missing_success_flag_is_a_logical_failure() {
        let kind = classify(&outcome(200, TriggerBody::Json(json!({"fit_score": 82}))));
        assert!(matches!(kind, OutcomeKind::ApplicationFailure(_)));
    }

    #[test]
    fn non_json_200_is_a_logical_failure() {
        let kind = classify(&outcome(200, TriggerBody::Text("<html>ok</html>".into())));
        assert!(matches!(kind, OutcomeKind::ApplicationFailure(_)));
    }

    #[test]
    fn success_requires_200_and_success_flag() {
        let body = json!({"success": true, "fit_score": 82});
        let result = outcome(200, TriggerBody::Json(body));
        match classify(&result) {
            OutcomeKind::Success(value) => assert_eq!(value["fit_score"], 82),
            other => panic!("expected Success, got {other:?}"),
        }
    }
}
