//! Library-surface tests for the harness
//!
//! Everything here runs without a live engine: artifact trees are built
//! with tempfile, trigger outcomes are constructed directly, and the
//! result accounting is driven through the public API.

use std::fs;
use std::path::Path;

use serde_json::json;

use flowcheck::api::{new_correlation_id, TriggerBody, TriggerOutcome};
use flowcheck::runner::artifacts::{self, EXPECTED_FILES};
use flowcheck::runner::{classify, OutcomeKind};
use flowcheck::TestResults;

fn write_outputs(dir: &Path, count: usize) {
    fs::create_dir_all(dir).unwrap();
    for name in EXPECTED_FILES.iter().take(count) {
        fs::write(dir.join(name), b"generated").unwrap();
    }
}

#[tokio::test]
async fn partial_artifacts_lean_toward_success() {
    let root = tempfile::tempdir().unwrap();
    let correlation_id = new_correlation_id();
    let run_dir = root
        .path()
        .join("Globex")
        .join("Backend Engineer")
        .join(&correlation_id);
    write_outputs(&run_dir, 6);

    let report = artifacts::check_outputs(root.path(), &correlation_id).await;
    assert!(report.success);
    assert!(report.dir_found);
    assert_eq!(report.found.len(), 6);
    assert_eq!(report.missing.len(), 5);
}

#[tokio::test]
async fn absent_correlation_dir_reports_everything_missing() {
    let root = tempfile::tempdir().unwrap();
    // Another run's outputs must not satisfy this run's check
    write_outputs(&root.path().join("Globex").join("QA").join("test_other_run"), 11);

    let report = artifacts::check_outputs(root.path(), &new_correlation_id()).await;
    assert!(!report.success);
    assert!(!report.dir_found);
    assert!(report.found.is_empty());
    assert_eq!(report.missing.len(), EXPECTED_FILES.len());
}

#[test]
fn correlation_ids_never_repeat_within_a_process() {
    let mut seen = std::collections::HashSet::new();
    for _ in 0..100 {
        assert!(seen.insert(new_correlation_id()));
    }
}

#[test]
fn outcome_kinds_stay_distinguishable() {
    let make = |status: u16, body: TriggerBody| TriggerOutcome {
        http_status: status,
        body,
        correlation_id: new_correlation_id(),
    };

    assert!(matches!(
        classify(&make(0, TriggerBody::Text("connection refused".into()))),
        OutcomeKind::TransportFailure(_)
    ));
    assert!(matches!(
        classify(&make(500, TriggerBody::Text("internal error".into()))),
        OutcomeKind::HttpFailure { status: 500, .. }
    ));
    assert!(matches!(
        classify(&make(200, TriggerBody::Json(json!({"success": false})))),
        OutcomeKind::ApplicationFailure(_)
    ));
    assert!(matches!(
        classify(&make(200, TriggerBody::Json(json!({"success": true, "fit_score": 82})))),
        OutcomeKind::Success(_)
    ));
}

#[test]
fn exit_status_ignores_warnings() {
    let mut clean = TestResults::new();
    clean.start_check();
    clean.pass("reconciled");
    clean.warn("activation skipped");
    clean.warn("no executions yet");
    assert_eq!(clean.exit_code(), 0);

    let mut broken = TestResults::new();
    broken.start_check();
    broken.fail("trigger failed");
    broken.warn("no executions yet");
    assert_eq!(broken.exit_code(), 1);
}
