//! Engine-side helper that publishes stage completions.

use std::sync::Arc;

use tracing::debug;

use super::{EventSink, StageComplete};
use crate::errors::{ExecflowError, Result};
use crate::model::Stage;

/// Builds [`StageComplete`] events and hands them to a sink.
///
/// Call [`notify`](Self::notify) on the thread that observed the terminal
/// transition. A stage whose status is not terminal at that point is
/// rejected, so every published completion reports a terminal status.
#[derive(Clone)]
pub struct StageCompletionNotifier {
    source: String,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for StageCompletionNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageCompletionNotifier")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl StageCompletionNotifier {
    /// Creates a notifier that tags events with `source`.
    #[must_use]
    pub fn new(source: impl Into<String>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            source: source.into(),
            sink,
        }
    }

    /// Returns the source tag.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Publishes a completion event for `stage` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ExecflowError::InvalidArgument`] if the stage has no owning
    /// execution or its status is not terminal. Nothing is emitted then.
    pub fn notify(&self, stage: &Stage) -> Result<StageComplete> {
        let event = StageComplete::new(self.source.clone(), stage)?;
        if !event.is_terminal() {
            return Err(ExecflowError::invalid_argument(format!(
                "stage {} has non-terminal status {}",
                event.stage_id(),
                event.status()
            )));
        }

        debug!(
            execution_id = %event.execution_id(),
            stage_id = %event.stage_id(),
            status = %event.status(),
            "Publishing stage completion"
        );
        self.sink.try_emit(event.clone().into());
        Ok(event)
    }
}
