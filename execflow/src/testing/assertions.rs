//! Test assertions for artifacts and events.

use crate::artifacts::Artifact;
use crate::errors::{ExecflowError, Result};
use crate::events::ExecutionEvent;
use crate::model::ExecutionStatus;

/// Asserts that `artifacts` have exactly `expected` names, in order.
pub fn assert_artifact_names(artifacts: &[Artifact], expected: &[&str]) {
    let actual: Vec<&str> = artifacts.iter().map(|a| a.name().unwrap_or_default()).collect();
    assert_eq!(
        actual, expected,
        "Expected artifact names {expected:?}, got {actual:?}"
    );
}

/// Asserts that a lookup failed with a not found error for `key`.
pub fn assert_not_found<T: std::fmt::Debug>(result: &Result<T>, key: &str) {
    match result {
        Err(ExecflowError::NotFound(err)) => assert_eq!(
            err.key, key,
            "Expected not found for '{key}', got not found for '{}'",
            err.key
        ),
        other => panic!("Expected not found for '{key}', got {other:?}"),
    }
}

/// Asserts that `event` is a stage completion for `stage_id`.
pub fn assert_stage_complete(event: &ExecutionEvent, stage_id: &str) {
    match event {
        ExecutionEvent::StageComplete(e) => assert_eq!(
            e.stage_id(),
            stage_id,
            "Expected completion of stage '{stage_id}', got '{}'",
            e.stage_id()
        ),
        other => panic!("Expected stage.complete, got {}", other.event_type()),
    }
}

/// Asserts that `event` carries `expected` status.
pub fn assert_event_status(event: &ExecutionEvent, expected: ExecutionStatus) {
    assert_eq!(
        event.status(),
        Some(expected),
        "Expected status {expected}, got {:?}",
        event.status()
    );
}
