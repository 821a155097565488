//! Stage model.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ExecutionStatus, ExecutionType};

/// Output key under which a stage publishes the artifacts it produced.
pub const ARTIFACTS_OUTPUT_KEY: &str = "artifacts";

/// Identity of the execution that owns a stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRef {
    /// The execution id.
    pub id: String,
    /// The execution type.
    #[serde(rename = "type")]
    pub execution_type: ExecutionType,
}

impl ExecutionRef {
    /// Creates a new execution reference.
    #[must_use]
    pub fn new(id: impl Into<String>, execution_type: ExecutionType) -> Self {
        Self {
            id: id.into(),
            execution_type,
        }
    }
}

/// One unit of work within an execution.
///
/// `status` and `outputs` are written by the engine while other stages of the
/// same execution run in parallel, so both sit behind locks. Every accessor
/// returns an owned copy and never hands out a guard.
#[derive(Debug)]
pub struct Stage {
    id: String,
    stage_type: String,
    name: Option<String>,
    execution: Option<ExecutionRef>,
    status: RwLock<ExecutionStatus>,
    outputs: RwLock<HashMap<String, serde_json::Value>>,
}

impl Stage {
    /// Creates a detached stage in `NOT_STARTED`.
    #[must_use]
    pub fn new(id: impl Into<String>, stage_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stage_type: stage_type.into(),
            name: None,
            execution: None,
            status: RwLock::new(ExecutionStatus::NotStarted),
            outputs: RwLock::new(HashMap::new()),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub fn with_status(self, status: ExecutionStatus) -> Self {
        *self.status.write() = status;
        self
    }

    /// Adds an initial output value.
    #[must_use]
    pub fn with_output(self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.outputs.write().insert(key.into(), value);
        self
    }

    pub(crate) fn attach(&mut self, execution: ExecutionRef) {
        self.execution = Some(execution);
    }

    /// Returns the stage id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the stage type.
    #[must_use]
    pub fn stage_type(&self) -> &str {
        &self.stage_type
    }

    /// Returns the display name, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the owning execution, if the stage has been attached to one.
    #[must_use]
    pub fn execution(&self) -> Option<&ExecutionRef> {
        self.execution.as_ref()
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> ExecutionStatus {
        *self.status.read()
    }

    /// Moves the stage to a new status.
    pub fn set_status(&self, status: ExecutionStatus) {
        *self.status.write() = status;
    }

    /// Returns a copy of all outputs.
    #[must_use]
    pub fn outputs(&self) -> HashMap<String, serde_json::Value> {
        self.outputs.read().clone()
    }

    /// Returns a copy of a single output value.
    #[must_use]
    pub fn output(&self, key: &str) -> Option<serde_json::Value> {
        self.outputs.read().get(key).cloned()
    }

    /// Writes a single output value, replacing any previous value.
    pub fn put_output(&self, key: impl Into<String>, value: serde_json::Value) {
        self.outputs.write().insert(key.into(), value);
    }

    /// Replaces all outputs.
    pub fn set_outputs(&self, outputs: HashMap<String, serde_json::Value>) {
        *self.outputs.write() = outputs;
    }
}
