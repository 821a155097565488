//! Pipeline execution model.

use std::sync::Arc;

use super::{ExecutionRef, ExecutionStatus, ExecutionType, Stage, Trigger};

/// One running or completed instance of a pipeline.
///
/// The execution owns its trigger and an ordered list of stages. Stages are
/// shared via `Arc` so the engine can update them from parallel branches
/// while resolvers read the same snapshot.
#[derive(Debug)]
pub struct Execution {
    id: String,
    execution_type: ExecutionType,
    application: Option<String>,
    trigger: Trigger,
    stages: Vec<Arc<Stage>>,
}

impl Execution {
    /// Creates an execution with no stages.
    #[must_use]
    pub fn new(id: impl Into<String>, execution_type: ExecutionType, trigger: Trigger) -> Self {
        Self {
            id: id.into(),
            execution_type,
            application: None,
            trigger,
            stages: Vec::new(),
        }
    }

    /// Sets the application the execution belongs to.
    #[must_use]
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    /// Appends a stage and attaches it to this execution.
    #[must_use]
    pub fn with_stage(mut self, mut stage: Stage) -> Self {
        stage.attach(self.execution_ref());
        self.stages.push(Arc::new(stage));
        self
    }

    /// Returns the execution id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the execution type.
    #[must_use]
    pub const fn execution_type(&self) -> ExecutionType {
        self.execution_type
    }

    /// Returns the application, if set.
    #[must_use]
    pub fn application(&self) -> Option<&str> {
        self.application.as_deref()
    }

    /// Returns the trigger.
    #[must_use]
    pub const fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    /// Returns the stages in stored order.
    #[must_use]
    pub fn stages(&self) -> &[Arc<Stage>] {
        &self.stages
    }

    /// Finds a stage by id.
    #[must_use]
    pub fn stage_by_id(&self, id: &str) -> Option<&Arc<Stage>> {
        self.stages.iter().find(|s| s.id() == id)
    }

    /// Returns the identity stages of this execution carry.
    #[must_use]
    pub fn execution_ref(&self) -> ExecutionRef {
        ExecutionRef::new(self.id.clone(), self.execution_type)
    }

    /// Derives the overall status from the stage statuses.
    ///
    /// A halted stage wins (first one in stage order), then all-successful
    /// means `SUCCEEDED`. With no stage started the execution is
    /// `NOT_STARTED`; anything in between is `RUNNING`.
    #[must_use]
    pub fn status(&self) -> ExecutionStatus {
        let statuses: Vec<ExecutionStatus> = self.stages.iter().map(|s| s.status()).collect();

        if statuses.iter().all(|s| *s == ExecutionStatus::NotStarted) {
            return ExecutionStatus::NotStarted;
        }
        if let Some(halted) = statuses.iter().find(|s| s.is_halt()) {
            return *halted;
        }
        if statuses.iter().all(ExecutionStatus::is_successful) {
            return ExecutionStatus::Succeeded;
        }
        ExecutionStatus::Running
    }
}
