//! Execution events and the sinks that receive them.
//!
//! The engine builds an event when a stage or execution changes state and
//! hands it to an [`EventSink`]. Dispatchers route on the common header
//! fields (source, execution type, execution id) without touching the
//! execution itself.

mod event;
mod notifier;
mod sink;

pub use event::{
    new_stage_complete_event, EventHeader, ExecutionComplete, ExecutionEvent, StageComplete,
    StageStarted,
};
pub use notifier::StageCompletionNotifier;
pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Execution, ExecutionStatus, ExecutionType, Stage, Trigger};
    use std::sync::Arc;

    #[test]
    fn test_events_are_shareable_across_threads() {
        let execution = Execution::new("e1", ExecutionType::Pipeline, Trigger::new("manual"))
            .with_stage(Stage::new("s1", "deploy").with_status(ExecutionStatus::Succeeded));
        let event: Arc<ExecutionEvent> =
            Arc::new(StageComplete::new("engine", &execution.stages()[0]).unwrap().into());

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let event = Arc::clone(&event);
                std::thread::spawn(move || event.execution_id().to_string())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "e1");
        }
    }
}
