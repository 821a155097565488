//! Test fixtures for building executions.

use crate::artifacts::{Artifact, ExpectedArtifact};
use crate::model::{
    Execution, ExecutionStatus, ExecutionType, Stage, Trigger, ARTIFACTS_OUTPUT_KEY,
};

/// Encodes artifacts the way a stage stores them in its outputs.
#[must_use]
pub fn artifacts_output(artifacts: &[Artifact]) -> serde_json::Value {
    serde_json::Value::Array(artifacts.iter().map(Artifact::to_json).collect())
}

/// Builder for executions used in tests.
#[derive(Debug)]
pub struct ExecutionFixture {
    id: String,
    execution_type: ExecutionType,
    trigger: Trigger,
    stages: Vec<Stage>,
}

impl Default for ExecutionFixture {
    fn default() -> Self {
        Self::new("test-execution")
    }
}

impl ExecutionFixture {
    /// Starts a pipeline execution fixture with a manual trigger.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            execution_type: ExecutionType::Pipeline,
            trigger: Trigger::new("manual"),
            stages: Vec::new(),
        }
    }

    /// Sets the execution type.
    #[must_use]
    pub fn execution_type(mut self, execution_type: ExecutionType) -> Self {
        self.execution_type = execution_type;
        self
    }

    /// Replaces the trigger.
    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Appends a trigger expectation bound to `artifact`.
    #[must_use]
    pub fn bound_artifact(mut self, artifact: Artifact) -> Self {
        let id = format!("expected-{}", self.trigger.resolved_expected_artifacts.len());
        self.trigger
            .resolved_expected_artifacts
            .push(ExpectedArtifact::bound(id, artifact));
        self
    }

    /// Appends a trigger expectation with no bound artifact.
    #[must_use]
    pub fn unbound_expectation(mut self, match_artifact: Artifact) -> Self {
        let id = format!("expected-{}", self.trigger.resolved_expected_artifacts.len());
        self.trigger
            .resolved_expected_artifacts
            .push(ExpectedArtifact::new(id).with_match_artifact(match_artifact));
        self
    }

    /// Appends a stage with the given status and no outputs.
    #[must_use]
    pub fn stage(
        mut self,
        id: impl Into<String>,
        stage_type: impl Into<String>,
        status: ExecutionStatus,
    ) -> Self {
        self.stages
            .push(Stage::new(id, stage_type).with_status(status));
        self
    }

    /// Appends a succeeded stage that emitted `artifacts`.
    #[must_use]
    pub fn stage_with_artifacts(
        mut self,
        id: impl Into<String>,
        stage_type: impl Into<String>,
        artifacts: &[Artifact],
    ) -> Self {
        self.stages.push(
            Stage::new(id, stage_type)
                .with_status(ExecutionStatus::Succeeded)
                .with_output(ARTIFACTS_OUTPUT_KEY, artifacts_output(artifacts)),
        );
        self
    }

    /// Builds the execution.
    #[must_use]
    pub fn build(self) -> Execution {
        self.stages.into_iter().fold(
            Execution::new(self.id, self.execution_type, self.trigger),
            Execution::with_stage,
        )
    }
}
