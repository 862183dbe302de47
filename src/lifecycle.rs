//! Workflow lifecycle reconciliation
//!
//! Guarantees a usable workflow instance on the engine: look it up by
//! name, else import the local definition and activate it. Running the
//! reconciliation twice never creates a second workflow, as long as the
//! engine's listing reflects its own prior writes.

use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::api::{EngineClient, WorkflowRef};
use crate::common::{Error, Result};

/// Upper bound for the single listing page scanned during lookup
const LIST_LIMIT: u32 = 100;

/// How the reconciled workflow came to be on the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Already present; its active flag was left untouched
    Found,
    /// Imported from the local definition this run
    Imported { activated: bool },
}

/// Result of one reconciliation pass
#[derive(Debug)]
pub struct Reconciled {
    pub workflow: WorkflowRef,
    pub provenance: Provenance,
}

/// Select every workflow whose name contains `name`, case-insensitively,
/// preserving listing order.
///
/// Lookup policy: the first match wins. The engine does not enforce
/// unique names, so ties are possible; callers surface them as warnings.
pub fn match_workflows<'a>(workflows: &'a [WorkflowRef], name: &str) -> Vec<&'a WorkflowRef> {
    let needle = name.to_lowercase();
    workflows
        .iter()
        .filter(|w| w.name.to_lowercase().contains(&needle))
        .collect()
}

/// Look up a workflow by name on the engine. First match wins; further
/// matches are logged and ignored.
pub async fn find_workflow(client: &EngineClient, name: &str) -> Result<Option<WorkflowRef>> {
    let workflows = client.list_workflows(LIST_LIMIT).await?;
    let matches = match_workflows(&workflows, name);
    if matches.len() > 1 {
        let ignored: Vec<&str> = matches[1..].iter().map(|w| w.name.as_str()).collect();
        warn!(
            "{} workflows match '{}'; using '{}' and ignoring {:?}",
            matches.len(),
            name,
            matches[0].name,
            ignored
        );
    }
    Ok(matches.into_iter().next().cloned())
}

/// Read and parse the local workflow definition
pub fn load_definition(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::DefinitionMissing {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::DefinitionInvalid {
        path: path.display().to_string(),
        error: e.to_string(),
    })
}

/// Ensure the named workflow exists on the engine.
///
/// An existing workflow is returned as-is without touching its active
/// flag. A fresh import is activated best-effort; activation failure is
/// reported through `Provenance::Imported`, never as an error.
pub async fn ensure_workflow(
    client: &EngineClient,
    name: &str,
    definition_path: &Path,
) -> Result<Reconciled> {
    if let Some(existing) = find_workflow(client, name).await? {
        return Ok(Reconciled {
            workflow: existing,
            provenance: Provenance::Found,
        });
    }

    let definition = load_definition(definition_path)?;
    let created = match client.create_workflow(&definition).await {
        Ok(workflow) => workflow,
        Err(Error::Protocol { status, body, .. }) => {
            return Err(Error::ImportFailed { status, body });
        }
        Err(Error::Transport { source, .. }) => {
            return Err(Error::ImportFailed {
                status: 0,
                body: source.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    let activated = match client.set_active(&created.id, true).await {
        Ok(()) => true,
        Err(e) => {
            warn!("failed to activate workflow {}: {e}", created.id);
            false
        }
    };

    Ok(Reconciled {
        workflow: created,
        provenance: Provenance::Imported { activated },
    })
}

/// Structural validation of a workflow already on the engine
#[derive(Debug)]
pub struct ValidationReport {
    pub node_count: usize,
    pub connection_count: usize,
    pub issues: Vec<String>,
}

/// Fetch the workflow detail record and run basic structural checks
pub async fn validate_workflow(client: &EngineClient, id: &str) -> Result<ValidationReport> {
    let detail = client.get_workflow(id).await?;

    let mut issues = Vec::new();
    if detail.node_count() == 0 {
        issues.push("Workflow has no nodes".to_string());
    }

    Ok(ValidationReport {
        node_count: detail.node_count(),
        connection_count: detail.connection_count(),
        issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow(id: &str, name: &str) -> WorkflowRef {
        WorkflowRef {
            id: id.to_string(),
            name: name.to_string(),
            active: false,
        }
    }

    #[test]
    fn lookup_is_case_insensitive_substring() {
        let workflows = vec![
            workflow("1", "Invoice Sync"),
            workflow("2", "resume enhancer v2"),
        ];
        let matches = match_workflows(&workflows, "Resume Enhancer");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "2");
    }

    #[test]
    fn first_match_wins_in_listing_order() {
        let workflows = vec![
            workflow("a", "Resume Enhancer"),
            workflow("b", "Resume Enhancer (copy)"),
        ];
        let matches = match_workflows(&workflows, "resume enhancer");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "a");
    }

    #[test]
    fn no_match_is_empty() {
        let workflows = vec![workflow("1", "Invoice Sync")];
        assert!(match_workflows(&workflows, "Resume Enhancer").is_empty());
    }

    #[test]
    fn load_definition_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workflow.json");
        assert!(matches!(
            load_definition(&path),
            Err(Error::DefinitionMissing { .. })
        ));
    }

    #[test]
    fn load_definition_reports_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workflow.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_definition(&path),
            Err(Error::DefinitionInvalid { .. })
        ));
    }

    #[test]
    fn load_definition_parses_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workflow.json");
        std::fs::write(&path, r#"{"name": "Resume Enhancer", "nodes": []}"#).unwrap();
        let definition = load_definition(&path).unwrap();
        assert_eq!(definition["name"], "Resume Enhancer");
    }
}
