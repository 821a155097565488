//! Aggregation of artifacts emitted by stages.

use tracing::warn;

use crate::artifacts::Artifact;
use crate::model::{Execution, Stage, ARTIFACTS_OUTPUT_KEY};

/// Returns the artifacts a single stage published under its `artifacts` output.
///
/// A stage without the key contributes nothing. Values that are not an array
/// of artifacts are logged and skipped rather than failing the lookup.
pub fn resolve_stage_artifacts(stage: &Stage) -> Vec<Artifact> {
    let Some(value) = stage.output(ARTIFACTS_OUTPUT_KEY) else {
        return Vec::new();
    };

    let serde_json::Value::Array(entries) = value else {
        warn!(
            stage_id = %stage.id(),
            "Stage output '{}' is not an array, ignoring it", ARTIFACTS_OUTPUT_KEY
        );
        return Vec::new();
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Artifact>(entry) {
            Ok(artifact) => Some(artifact),
            Err(err) => {
                warn!(
                    stage_id = %stage.id(),
                    index,
                    error = %err,
                    "Skipping malformed artifact in stage outputs"
                );
                None
            }
        })
        .collect()
}

/// Collects every artifact emitted by the execution's stages.
///
/// Stage order and the order within each stage are preserved. An execution
/// where no stage produced artifacts yields an empty list.
pub fn resolve_all_stage_artifacts(execution: &Execution) -> Vec<Artifact> {
    execution
        .stages()
        .iter()
        .flat_map(|stage| resolve_stage_artifacts(stage))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExecutionType, Trigger};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;

    fn artifacts_json(artifacts: &[Artifact]) -> serde_json::Value {
        serde_json::Value::Array(artifacts.iter().map(Artifact::to_json).collect())
    }

    #[test]
    fn test_concatenates_in_stage_order() {
        let a1 = Artifact::new("docker/image", "a1");
        let a2 = Artifact::new("docker/image", "a2");
        let b1 = Artifact::new("s3/object", "b1");

        let execution = Execution::new("e1", ExecutionType::Pipeline, Trigger::new("manual"))
            .with_stage(
                Stage::new("s1", "bake")
                    .with_output(ARTIFACTS_OUTPUT_KEY, artifacts_json(&[a1.clone(), a2.clone()])),
            )
            .with_stage(Stage::new("s2", "wait"))
            .with_stage(
                Stage::new("s3", "deploy")
                    .with_output(ARTIFACTS_OUTPUT_KEY, artifacts_json(&[b1.clone()])),
            );

        assert_eq!(resolve_all_stage_artifacts(&execution), vec![a1, a2, b1]);
    }

    #[test]
    fn test_no_stages_yields_empty() {
        let execution = Execution::new("e1", ExecutionType::Pipeline, Trigger::new("manual"));
        assert!(resolve_all_stage_artifacts(&execution).is_empty());
    }

    #[test]
    fn test_stages_without_artifacts_yield_empty() {
        let execution = Execution::new("e1", ExecutionType::Pipeline, Trigger::new("manual"))
            .with_stage(Stage::new("s1", "wait").with_output("other", serde_json::json!(1)))
            .with_stage(Stage::new("s2", "wait"));
        assert!(resolve_all_stage_artifacts(&execution).is_empty());
    }

    #[test]
    fn test_empty_artifact_list() {
        let stage = Stage::new("s1", "bake").with_output(ARTIFACTS_OUTPUT_KEY, serde_json::json!([]));
        assert!(resolve_stage_artifacts(&stage).is_empty());
    }

    #[test]
    fn test_non_array_output_is_ignored() {
        let stage = Stage::new("s1", "bake")
            .with_output(ARTIFACTS_OUTPUT_KEY, serde_json::json!({"type": "docker/image"}));
        assert!(resolve_stage_artifacts(&stage).is_empty());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let stage = Stage::new("s1", "bake").with_output(
            ARTIFACTS_OUTPUT_KEY,
            serde_json::json!([
                {"type": "docker/image", "name": "good"},
                {"name": "missing-type"},
                42
            ]),
        );

        let artifacts = resolve_stage_artifacts(&stage);
        assert_eq!(artifacts, vec![Artifact::new("docker/image", "good")]);
    }

    #[test]
    fn test_does_not_mutate_outputs() {
        let stage = Stage::new("s1", "bake").with_output(
            ARTIFACTS_OUTPUT_KEY,
            serde_json::json!([{"type": "docker/image", "name": "app"}]),
        );
        let before = stage.outputs();
        let _ = resolve_stage_artifacts(&stage);
        assert_eq!(stage.outputs(), before);
    }

    #[test]
    fn test_null_fields_do_not_drop_artifacts() {
        let execution = Execution::new("e1", ExecutionType::Pipeline, Trigger::new("manual"))
            .with_stage(Stage::new("s1", "bake").with_output(
                ARTIFACTS_OUTPUT_KEY,
                serde_json::json!([
                    {"type": "docker/image", "name": "a", "metadata": null},
                    {"type": "docker/image", "name": "b", "customKind": null},
                    {"type": "embedded/base64", "name": null, "reference": "ZGF0YQ=="},
                    {"type": "docker/image", "name": "d", "version": null}
                ]),
            ));

        let artifacts = resolve_all_stage_artifacts(&execution);
        let names: Vec<_> = artifacts.iter().map(Artifact::name).collect();
        assert_eq!(names, vec![Some("a"), Some("b"), None, Some("d")]);
        assert_eq!(artifacts[2].reference.as_deref(), Some("ZGF0YQ=="));
    }

    #[test]
    fn test_resolve_while_stage_outputs_change() {
        let first = artifacts_json(&[Artifact::new("docker/image", "v1")]);
        let second = artifacts_json(&[
            Artifact::new("docker/image", "v2"),
            Artifact::new("docker/image", "v2-sidecar"),
        ]);
        let execution = Arc::new(
            Execution::new("e1", ExecutionType::Pipeline, Trigger::new("manual"))
                .with_stage(Stage::new("s1", "bake").with_output(ARTIFACTS_OUTPUT_KEY, first.clone())),
        );

        let writer = {
            let execution = Arc::clone(&execution);
            thread::spawn(move || {
                for i in 0..500 {
                    let value = if i % 2 == 0 { second.clone() } else { first.clone() };
                    execution.stages()[0].put_output(ARTIFACTS_OUTPUT_KEY, value);
                }
            })
        };

        for _ in 0..500 {
            let names: Vec<_> = resolve_all_stage_artifacts(&execution)
                .iter()
                .map(|a| a.name().unwrap_or_default().to_string())
                .collect();
            assert!(
                names == ["v1"] || names == ["v2", "v2-sidecar"],
                "torn read: {names:?}"
            );
        }
        writer.join().unwrap();
    }
}
