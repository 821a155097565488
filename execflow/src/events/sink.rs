//! Event sink trait and implementations.

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info, Level};

use super::ExecutionEvent;

/// Receiver of execution events.
///
/// This is the seam an event bus plugs into. Transport (in-process call,
/// queue, broker) is up to the implementation.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits an event asynchronously.
    async fn emit(&self, event: ExecutionEvent);

    /// Emits an event without blocking.
    ///
    /// Must never fail; implementations log and drop on error.
    fn try_emit(&self, event: ExecutionEvent);
}

/// A sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: ExecutionEvent) {}

    fn try_emit(&self, _event: ExecutionEvent) {}
}

/// A sink that logs events through `tracing`.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a logging sink with the given level.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub const fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    /// Creates an info-level logging sink.
    #[must_use]
    pub const fn info() -> Self {
        Self::new(Level::INFO)
    }

    fn log_event(&self, event: &ExecutionEvent) {
        let status = event.status().map(|s| s.to_string());
        if self.level == Level::DEBUG {
            debug!(
                event_type = %event.event_type(),
                source = %event.source(),
                execution_type = %event.execution_type(),
                execution_id = %event.execution_id(),
                stage_id = ?event.stage_id(),
                status = ?status,
                "Event: {}", event.event_type()
            );
        } else {
            info!(
                event_type = %event.event_type(),
                source = %event.source(),
                execution_type = %event.execution_type(),
                execution_id = %event.execution_id(),
                stage_id = ?event.stage_id(),
                status = ?status,
                "Event: {}", event.event_type()
            );
        }
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event: ExecutionEvent) {
        self.log_event(&event);
    }

    fn try_emit(&self, event: ExecutionEvent) {
        self.log_event(&event);
    }
}

/// A sink that keeps every event in memory, for tests.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: RwLock<Vec<ExecutionEvent>>,
}

impl CollectingEventSink {
    /// Creates an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<ExecutionEvent> {
        self.events.read().clone()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.events.write().clear();
    }

    /// Returns events whose type starts with `type_prefix`.
    #[must_use]
    pub fn events_of_type(&self, type_prefix: &str) -> Vec<ExecutionEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_type().starts_with(type_prefix))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: ExecutionEvent) {
        self.events.write().push(event);
    }

    fn try_emit(&self, event: ExecutionEvent) {
        self.events.write().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ExecutionComplete, StageComplete, StageStarted};
    use crate::model::{Execution, ExecutionStatus, ExecutionType, Stage, Trigger};

    fn execution() -> Execution {
        Execution::new("e1", ExecutionType::Pipeline, Trigger::new("manual"))
            .with_stage(Stage::new("s1", "deploy").with_status(ExecutionStatus::Succeeded))
    }

    fn stage_complete(execution: &Execution) -> ExecutionEvent {
        StageComplete::new("test", &execution.stages()[0]).unwrap().into()
    }

    #[tokio::test]
    async fn test_noop_sink() {
        let execution = execution();
        let sink = NoOpEventSink;
        sink.emit(stage_complete(&execution)).await;
        sink.try_emit(stage_complete(&execution));
    }

    #[tokio::test]
    async fn test_logging_sink() {
        let execution = execution();
        LoggingEventSink::default().emit(stage_complete(&execution)).await;
        LoggingEventSink::debug().try_emit(stage_complete(&execution));
    }

    #[tokio::test]
    async fn test_collecting_sink() {
        let execution = execution();
        let sink = CollectingEventSink::new();
        assert!(sink.is_empty());

        sink.emit(stage_complete(&execution)).await;
        sink.try_emit(ExecutionComplete::new("test", &execution).into());

        assert_eq!(sink.len(), 2);
        let events = sink.events();
        assert_eq!(events[0].event_type(), "stage.complete");
        assert_eq!(events[1].event_type(), "execution.complete");
    }

    #[tokio::test]
    async fn test_collecting_sink_filter_and_clear() {
        let execution = execution();
        let stage = &execution.stages()[0];
        let sink = CollectingEventSink::new();

        sink.emit(StageStarted::new("test", stage).unwrap().into()).await;
        sink.emit(stage_complete(&execution)).await;
        sink.emit(ExecutionComplete::new("test", &execution).into()).await;

        assert_eq!(sink.events_of_type("stage.").len(), 2);
        assert_eq!(sink.events_of_type("execution.").len(), 1);

        sink.clear();
        assert!(sink.is_empty());
    }
}
