//! Execution trigger.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::artifacts::{null_as_default, Artifact, ExpectedArtifact};

/// The input that started an execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    /// The trigger type (e.g., "manual", "docker", "webhook").
    #[serde(rename = "type")]
    pub trigger_type: String,

    /// The user who started the execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Pipeline parameters supplied with the trigger.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: HashMap<String, serde_json::Value>,

    /// Artifacts that arrived with the trigger.
    #[serde(default, deserialize_with = "null_as_default")]
    pub artifacts: Vec<Artifact>,

    /// Expected artifacts resolved against the trigger, in declaration order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resolved_expected_artifacts: Vec<ExpectedArtifact>,
}

impl Trigger {
    /// Creates a trigger of the given type with no artifacts.
    #[must_use]
    pub fn new(trigger_type: impl Into<String>) -> Self {
        Self {
            trigger_type: trigger_type.into(),
            ..Default::default()
        }
    }

    /// Sets the user.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Adds a received artifact.
    #[must_use]
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Appends a resolved expected artifact, keeping insertion order.
    #[must_use]
    pub fn with_resolved_expected_artifact(mut self, expected: ExpectedArtifact) -> Self {
        self.resolved_expected_artifacts.push(expected);
        self
    }

    /// Returns the resolved expected artifacts in stored order.
    #[must_use]
    pub fn resolved_expected_artifacts(&self) -> &[ExpectedArtifact] {
        &self.resolved_expected_artifacts
    }
}
