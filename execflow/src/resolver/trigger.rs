//! Lookups over the artifacts bound to an execution's trigger.

use tracing::debug;

use crate::artifacts::Artifact;
use crate::errors::{ArtifactNotFoundError, Result};
use crate::model::Execution;

/// Returns the first bound trigger artifact accepted by `predicate`.
///
/// Expected artifacts are visited in the trigger's stored order; entries
/// without a bound artifact are skipped. Later matches are ignored.
pub fn find_bound_artifact<'a, P>(execution: &'a Execution, predicate: P) -> Option<&'a Artifact>
where
    P: Fn(&Artifact) -> bool,
{
    execution
        .trigger()
        .resolved_expected_artifacts()
        .iter()
        .filter_map(|expected| expected.bound_artifact())
        .find(|artifact| predicate(*artifact))
}

fn resolve_by<P>(execution: &Execution, key: &str, predicate: P) -> Result<Artifact>
where
    P: Fn(&Artifact) -> bool,
{
    match find_bound_artifact(execution, predicate) {
        Some(artifact) => {
            debug!(
                execution_id = %execution.id(),
                key = %key,
                artifact_type = %artifact.artifact_type,
                artifact_name = ?artifact.name(),
                "Resolved trigger artifact"
            );
            Ok(artifact.clone())
        }
        None => {
            debug!(execution_id = %execution.id(), key = %key, "No trigger artifact matched");
            Err(ArtifactNotFoundError::new(key, execution.id()).into())
        }
    }
}

/// Looks up a bound trigger artifact by exact, case-sensitive name.
///
/// Artifacts without a name never match.
///
/// # Errors
///
/// Returns [`ExecflowError::NotFound`](crate::errors::ExecflowError::NotFound)
/// carrying `name` and the execution id when nothing matches.
pub fn resolve_trigger_artifact_by_name(execution: &Execution, name: &str) -> Result<Artifact> {
    resolve_by(execution, name, |artifact| artifact.name() == Some(name))
}

/// Looks up a bound trigger artifact by exact, case-sensitive type.
///
/// # Errors
///
/// Returns [`ExecflowError::NotFound`](crate::errors::ExecflowError::NotFound)
/// carrying `artifact_type` and the execution id when nothing matches.
pub fn resolve_trigger_artifact_by_type(
    execution: &Execution,
    artifact_type: &str,
) -> Result<Artifact> {
    resolve_by(execution, artifact_type, |artifact| {
        artifact.artifact_type == artifact_type
    })
}
