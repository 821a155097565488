//! Execution events.
//!
//! Every event carries an [`EventHeader`] with the fields dispatchers route
//! on. Kind-specific fields live on the variant structs. All values are
//! copied out of the stage or execution when the event is built, so an event
//! never changes after construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ExecflowError, Result};
use crate::model::{Execution, ExecutionRef, ExecutionStatus, ExecutionType, Stage};

/// Fields shared by every execution event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHeader {
    event_id: Uuid,
    source: String,
    execution_type: ExecutionType,
    execution_id: String,
    timestamp: DateTime<Utc>,
}

impl EventHeader {
    fn new(source: impl Into<String>, execution: &ExecutionRef) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            source: source.into(),
            execution_type: execution.execution_type,
            execution_id: execution.id.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Unique id of this event.
    #[must_use]
    pub const fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// The emitter, opaque to this crate.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Type of the execution the event belongs to.
    #[must_use]
    pub const fn execution_type(&self) -> ExecutionType {
        self.execution_type
    }

    /// Id of the execution the event belongs to.
    #[must_use]
    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }

    /// When the event was constructed.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

fn owning_execution<'a>(stage: &'a Stage, event: &str) -> Result<&'a ExecutionRef> {
    stage.execution().ok_or_else(|| {
        ExecflowError::invalid_argument(format!(
            "cannot build {event} event: stage {} is not attached to an execution",
            stage.id()
        ))
    })
}

/// Notification that a stage reached a terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageComplete {
    #[serde(flatten)]
    header: EventHeader,
    stage_id: String,
    stage_type: String,
    status: ExecutionStatus,
}

impl StageComplete {
    /// Snapshots `stage` into a completion event.
    ///
    /// # Errors
    ///
    /// Returns [`ExecflowError::InvalidArgument`] if the stage has no owning
    /// execution.
    pub fn new(source: impl Into<String>, stage: &Stage) -> Result<Self> {
        let execution = owning_execution(stage, "stage complete")?;
        Ok(Self {
            header: EventHeader::new(source, execution),
            stage_id: stage.id().to_string(),
            stage_type: stage.stage_type().to_string(),
            status: stage.status(),
        })
    }

    /// Shared event fields.
    #[must_use]
    pub const fn header(&self) -> &EventHeader {
        &self.header
    }

    /// Id of the completed stage.
    #[must_use]
    pub fn stage_id(&self) -> &str {
        &self.stage_id
    }

    /// Type of the completed stage.
    #[must_use]
    pub fn stage_type(&self) -> &str {
        &self.stage_type
    }

    /// Status of the stage when the event was built.
    #[must_use]
    pub const fn status(&self) -> ExecutionStatus {
        self.status
    }

    /// True if the captured status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_complete()
    }

    /// The emitter.
    #[must_use]
    pub fn source(&self) -> &str {
        self.header.source()
    }

    /// Type of the owning execution.
    #[must_use]
    pub const fn execution_type(&self) -> ExecutionType {
        self.header.execution_type()
    }

    /// Id of the owning execution.
    #[must_use]
    pub fn execution_id(&self) -> &str {
        self.header.execution_id()
    }

    /// When the event was constructed.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.header.timestamp()
    }
}

/// Builds a [`StageComplete`] from a possibly absent stage.
///
/// Bridges from hosts that may hand over a null stage reference.
///
/// # Errors
///
/// Returns [`ExecflowError::InvalidArgument`] if `stage` is `None` or the
/// stage has no owning execution.
pub fn new_stage_complete_event(
    source: impl Into<String>,
    stage: Option<&Stage>,
) -> Result<StageComplete> {
    let stage =
        stage.ok_or_else(|| ExecflowError::invalid_argument("stage must not be absent"))?;
    StageComplete::new(source, stage)
}

/// Notification that a stage started running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageStarted {
    #[serde(flatten)]
    header: EventHeader,
    stage_id: String,
    stage_type: String,
}

impl StageStarted {
    /// Snapshots `stage` into a start event.
    ///
    /// # Errors
    ///
    /// Returns [`ExecflowError::InvalidArgument`] if the stage has no owning
    /// execution.
    pub fn new(source: impl Into<String>, stage: &Stage) -> Result<Self> {
        let execution = owning_execution(stage, "stage started")?;
        Ok(Self {
            header: EventHeader::new(source, execution),
            stage_id: stage.id().to_string(),
            stage_type: stage.stage_type().to_string(),
        })
    }

    /// Shared event fields.
    #[must_use]
    pub const fn header(&self) -> &EventHeader {
        &self.header
    }

    /// Id of the started stage.
    #[must_use]
    pub fn stage_id(&self) -> &str {
        &self.stage_id
    }

    /// Type of the started stage.
    #[must_use]
    pub fn stage_type(&self) -> &str {
        &self.stage_type
    }
}

/// Notification that a whole execution finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionComplete {
    #[serde(flatten)]
    header: EventHeader,
    status: ExecutionStatus,
}

impl ExecutionComplete {
    /// Snapshots the derived status of `execution`.
    #[must_use]
    pub fn new(source: impl Into<String>, execution: &Execution) -> Self {
        Self {
            header: EventHeader::new(source, &execution.execution_ref()),
            status: execution.status(),
        }
    }

    /// Shared event fields.
    #[must_use]
    pub const fn header(&self) -> &EventHeader {
        &self.header
    }

    /// Execution status when the event was built.
    #[must_use]
    pub const fn status(&self) -> ExecutionStatus {
        self.status
    }
}

/// Any event emitted about an execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExecutionEvent {
    /// A stage started.
    #[serde(rename = "stage.started")]
    StageStarted(StageStarted),
    /// A stage completed.
    #[serde(rename = "stage.complete")]
    StageComplete(StageComplete),
    /// An execution completed.
    #[serde(rename = "execution.complete")]
    ExecutionComplete(ExecutionComplete),
}

impl ExecutionEvent {
    /// Stable dotted name of the event kind.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::StageStarted(_) => "stage.started",
            Self::StageComplete(_) => "stage.complete",
            Self::ExecutionComplete(_) => "execution.complete",
        }
    }

    /// Shared event fields.
    #[must_use]
    pub const fn header(&self) -> &EventHeader {
        match self {
            Self::StageStarted(e) => e.header(),
            Self::StageComplete(e) => e.header(),
            Self::ExecutionComplete(e) => e.header(),
        }
    }

    /// The emitter.
    #[must_use]
    pub fn source(&self) -> &str {
        self.header().source()
    }

    /// Type of the execution the event belongs to.
    #[must_use]
    pub const fn execution_type(&self) -> ExecutionType {
        self.header().execution_type()
    }

    /// Id of the execution the event belongs to.
    #[must_use]
    pub fn execution_id(&self) -> &str {
        self.header().execution_id()
    }

    /// Stage id, for stage events.
    #[must_use]
    pub fn stage_id(&self) -> Option<&str> {
        match self {
            Self::StageStarted(e) => Some(e.stage_id()),
            Self::StageComplete(e) => Some(e.stage_id()),
            Self::ExecutionComplete(_) => None,
        }
    }

    /// Status carried by the event, if the kind has one.
    #[must_use]
    pub const fn status(&self) -> Option<ExecutionStatus> {
        match self {
            Self::StageStarted(_) => None,
            Self::StageComplete(e) => Some(e.status()),
            Self::ExecutionComplete(e) => Some(e.status()),
        }
    }

    /// Converts the event to its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ExecflowError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<StageStarted> for ExecutionEvent {
    fn from(event: StageStarted) -> Self {
        Self::StageStarted(event)
    }
}

impl From<StageComplete> for ExecutionEvent {
    fn from(event: StageComplete) -> Self {
        Self::StageComplete(event)
    }
}

impl From<ExecutionComplete> for ExecutionEvent {
    fn from(event: ExecutionComplete) -> Self {
        Self::ExecutionComplete(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Trigger;
    use pretty_assertions::assert_eq;

    fn execution() -> Execution {
        Execution::new("e1", ExecutionType::Pipeline, Trigger::new("manual"))
            .with_stage(Stage::new("s1", "deploy").with_status(ExecutionStatus::Succeeded))
    }

    #[test]
    fn test_stage_complete_fields() {
        let execution = execution();
        let stage = execution.stage_by_id("s1").unwrap();

        let event = StageComplete::new("engine", stage).unwrap();

        assert_eq!(event.stage_id(), "s1");
        assert_eq!(event.stage_type(), "deploy");
        assert_eq!(event.status(), ExecutionStatus::Succeeded);
        assert_eq!(event.execution_id(), "e1");
        assert_eq!(event.execution_type(), ExecutionType::Pipeline);
        assert_eq!(event.source(), "engine");
        assert!(event.is_terminal());
    }

    #[test]
    fn test_absent_stage_is_invalid_argument() {
        let err = new_stage_complete_event("engine", None).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_detached_stage_is_invalid_argument() {
        let stage = Stage::new("s1", "deploy").with_status(ExecutionStatus::Succeeded);
        let err = new_stage_complete_event("engine", Some(&stage)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("s1"));

        assert!(StageStarted::new("engine", &stage).is_err());
    }

    #[test]
    fn test_event_is_a_snapshot() {
        let execution = execution();
        let stage = execution.stage_by_id("s1").unwrap();
        let event = StageComplete::new("engine", stage).unwrap();

        stage.set_status(ExecutionStatus::Running);
        stage.put_output("artifacts", serde_json::json!([]));

        assert_eq!(event.status(), ExecutionStatus::Succeeded);
        assert_eq!(event.stage_id(), "s1");
    }

    #[test]
    fn test_non_terminal_status_is_reported() {
        let execution = execution();
        let stage = execution.stage_by_id("s1").unwrap();
        stage.set_status(ExecutionStatus::Running);

        let event = StageComplete::new("engine", stage).unwrap();
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_execution_event_common_accessors() {
        let execution = execution();
        let stage = execution.stage_by_id("s1").unwrap();

        let started: ExecutionEvent = StageStarted::new("engine", stage).unwrap().into();
        let complete: ExecutionEvent = StageComplete::new("engine", stage).unwrap().into();
        let done: ExecutionEvent = ExecutionComplete::new("engine", &execution).into();

        for event in [&started, &complete, &done] {
            assert_eq!(event.execution_id(), "e1");
            assert_eq!(event.execution_type(), ExecutionType::Pipeline);
            assert_eq!(event.source(), "engine");
        }
        assert_eq!(started.event_type(), "stage.started");
        assert_eq!(complete.event_type(), "stage.complete");
        assert_eq!(done.event_type(), "execution.complete");
        assert_eq!(started.stage_id(), Some("s1"));
        assert_eq!(done.stage_id(), None);
        assert_eq!(started.status(), None);
        assert_eq!(done.status(), Some(ExecutionStatus::Succeeded));
    }

    #[test]
    fn test_event_json_shape() {
        let execution = execution();
        let stage = execution.stage_by_id("s1").unwrap();
        let event: ExecutionEvent = StageComplete::new("engine", stage).unwrap().into();

        let json = event.to_json().unwrap();
        assert_eq!(json["type"], "stage.complete");
        assert_eq!(json["executionType"], "PIPELINE");
        assert_eq!(json["executionId"], "e1");
        assert_eq!(json["stageId"], "s1");
        assert_eq!(json["stageType"], "deploy");
        assert_eq!(json["status"], "SUCCEEDED");

        let decoded: ExecutionEvent = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_events_get_distinct_ids() {
        let execution = execution();
        let stage = execution.stage_by_id("s1").unwrap();
        let a = StageComplete::new("engine", stage).unwrap();
        let b = StageComplete::new("engine", stage).unwrap();
        assert_ne!(a.header().event_id(), b.header().event_id());
    }
}
