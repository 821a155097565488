//! Execution status and execution type enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of execution a pipeline run represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionType {
    /// A configured pipeline run.
    Pipeline,
    /// An ad-hoc set of stages submitted directly.
    Orchestration,
}

impl Default for ExecutionType {
    fn default() -> Self {
        Self::Pipeline
    }
}

impl fmt::Display for ExecutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pipeline => write!(f, "PIPELINE"),
            Self::Orchestration => write!(f, "ORCHESTRATION"),
        }
    }
}

/// The status of a stage or execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    /// Not yet started.
    NotStarted,
    /// Currently running.
    Running,
    /// Paused by a user.
    Paused,
    /// Waiting on an external condition.
    Suspended,
    /// Queued behind another execution.
    Buffered,
    /// Restarting an earlier branch.
    Redirect,
    /// Completed successfully.
    Succeeded,
    /// Failed.
    Failed,
    /// Failed, but the pipeline was configured to continue.
    FailedContinue,
    /// Failed and halted the pipeline.
    Terminal,
    /// Canceled by a user.
    Canceled,
    /// Stopped without failing the pipeline.
    Stopped,
    /// Skipped.
    Skipped,
}

impl Default for ExecutionStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "NOT_STARTED",
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
            Self::Suspended => "SUSPENDED",
            Self::Buffered => "BUFFERED",
            Self::Redirect => "REDIRECT",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::FailedContinue => "FAILED_CONTINUE",
            Self::Terminal => "TERMINAL",
            Self::Canceled => "CANCELED",
            Self::Stopped => "STOPPED",
            Self::Skipped => "SKIPPED",
        };
        f.write_str(name)
    }
}

impl ExecutionStatus {
    /// Returns true if no further transition occurs from this status.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(
            self,
            Self::Succeeded
                | Self::Failed
                | Self::FailedContinue
                | Self::Terminal
                | Self::Canceled
                | Self::Stopped
                | Self::Skipped
        )
    }

    /// Returns true if this status halts the rest of the pipeline.
    #[must_use]
    pub const fn is_halt(&self) -> bool {
        matches!(self, Self::Failed | Self::Terminal | Self::Canceled | Self::Stopped)
    }

    /// Returns true if downstream work may proceed after this status.
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Skipped | Self::FailedContinue)
    }
}
