//! Artifact lookup functions for pipeline expressions.

use super::{
    ExpressionFunctionProvider, FunctionDefinition, FunctionParameter, FunctionValue,
    ParameterType,
};
use crate::errors::{ExecflowError, Result};
use crate::model::Execution;
use crate::resolver;

/// Name of the by-name trigger lookup.
pub const TRIGGER_RESOLVED_ARTIFACT: &str = "triggerResolvedArtifact";
/// Name of the by-type trigger lookup.
pub const TRIGGER_RESOLVED_ARTIFACT_BY_TYPE: &str = "triggerResolvedArtifactByType";
/// Name of the stage artifact aggregation.
pub const RESOLVED_ARTIFACTS: &str = "resolvedArtifacts";

fn string_arg<'a>(args: &'a [serde_json::Value], index: usize) -> Result<&'a str> {
    args.get(index)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| ExecflowError::invalid_argument(format!("argument {index} must be a string")))
}

fn trigger_resolved_artifact(
    execution: &Execution,
    args: &[serde_json::Value],
) -> Result<FunctionValue> {
    let name = string_arg(args, 0)?;
    resolver::resolve_trigger_artifact_by_name(execution, name).map(FunctionValue::Artifact)
}

fn trigger_resolved_artifact_by_type(
    execution: &Execution,
    args: &[serde_json::Value],
) -> Result<FunctionValue> {
    let artifact_type = string_arg(args, 0)?;
    resolver::resolve_trigger_artifact_by_type(execution, artifact_type)
        .map(FunctionValue::Artifact)
}

#[allow(clippy::unnecessary_wraps)]
fn resolved_artifacts(execution: &Execution, _args: &[serde_json::Value]) -> Result<FunctionValue> {
    Ok(FunctionValue::Artifacts(resolver::resolve_all_stage_artifacts(
        execution,
    )))
}

fn execution_parameter() -> FunctionParameter {
    FunctionParameter::new(
        "execution",
        ParameterType::Execution,
        "The execution to search for artifacts",
    )
}

/// Publishes the artifact resolver as expression functions.
#[derive(Debug, Clone, Default)]
pub struct ArtifactFunctionProvider {
    namespace: Option<String>,
}

impl ArtifactFunctionProvider {
    /// Creates a provider without a namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider whose functions are prefixed with `namespace`.
    #[must_use]
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
        }
    }
}

impl ExpressionFunctionProvider for ArtifactFunctionProvider {
    fn namespace(&self) -> Option<String> {
        self.namespace.clone()
    }

    fn functions(&self) -> Vec<FunctionDefinition> {
        vec![
            FunctionDefinition::new(
                TRIGGER_RESOLVED_ARTIFACT,
                "Looks up a resolved artifact in the current execution trigger given its name. \
                 If multiple artifacts are found, only 1 will be returned.",
                trigger_resolved_artifact,
            )
            .with_parameter(execution_parameter())
            .with_parameter(FunctionParameter::new(
                "name",
                ParameterType::String,
                "The name of the resolved artifact",
            )),
            FunctionDefinition::new(
                TRIGGER_RESOLVED_ARTIFACT_BY_TYPE,
                "Looks up a resolved artifact in the current execution trigger given its type. \
                 If multiple artifacts are found, only 1 will be returned.",
                trigger_resolved_artifact_by_type,
            )
            .with_parameter(execution_parameter())
            .with_parameter(FunctionParameter::new(
                "type",
                ParameterType::String,
                "The type of the resolved artifact",
            )),
            FunctionDefinition::new(
                RESOLVED_ARTIFACTS,
                "Looks up resolved artifacts in the current execution.",
                resolved_artifacts,
            )
            .with_parameter(execution_parameter()),
        ]
    }
}
