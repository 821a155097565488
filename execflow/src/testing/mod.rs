//! Testing utilities for code built on execflow.
//!
//! - [`ExecutionFixture`]: concise construction of executions with bound
//!   trigger artifacts and artifact-producing stages
//! - Assertions over resolved artifacts and emitted events

mod assertions;
mod fixtures;

pub use assertions::{
    assert_artifact_names, assert_event_status, assert_not_found, assert_stage_complete,
};
pub use fixtures::{artifacts_output, ExecutionFixture};
