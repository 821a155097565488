//! # Execflow
//!
//! Stage completion events and artifact resolution for pipeline executions.
//!
//! Execflow sits between a pipeline execution engine, an event dispatcher
//! and an expression evaluator:
//!
//! - **Execution model**: executions, triggers and stages with status and outputs
//! - **Artifact resolution**: find trigger artifacts by name or type, and
//!   collect every artifact the stages emitted
//! - **Expression functions**: an explicit registry publishing the resolvers
//!   by name to an expression engine
//! - **Execution events**: immutable, point-in-time notifications such as
//!   [`StageComplete`](events::StageComplete), delivered through an
//!   [`EventSink`](events::EventSink)
//!
//! ## Quick Start
//!
//! ```rust
//! use execflow::prelude::*;
//!
//! let trigger = Trigger::new("docker").with_resolved_expected_artifact(
//!     ExpectedArtifact::bound("image", Artifact::new("docker/image", "gcr.io/app")),
//! );
//! let execution = Execution::new("01HZX", ExecutionType::Pipeline, trigger)
//!     .with_stage(Stage::new("deploy-1", "deploy").with_status(ExecutionStatus::Succeeded));
//!
//! let image = resolve_trigger_artifact_by_type(&execution, "docker/image")?;
//! assert_eq!(image.name(), Some("gcr.io/app"));
//!
//! let event = StageComplete::new("orchestrator", &execution.stages()[0])?;
//! assert_eq!(event.status(), ExecutionStatus::Succeeded);
//! # Ok::<(), execflow::errors::ExecflowError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod artifacts;
pub mod config;
pub mod errors;
pub mod events;
pub mod functions;
pub mod model;
pub mod observability;
pub mod resolver;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::artifacts::{Artifact, ExpectedArtifact};
    pub use crate::config::ExecflowConfig;
    pub use crate::errors::{ArtifactNotFoundError, ExecflowError, Result};
    pub use crate::events::{
        new_stage_complete_event, EventSink, ExecutionEvent, LoggingEventSink, NoOpEventSink,
        StageComplete, StageCompletionNotifier,
    };
    pub use crate::functions::{
        ExpressionFunctionProvider, FunctionDefinition, FunctionRegistry, FunctionValue,
    };
    pub use crate::model::{Execution, ExecutionStatus, ExecutionType, Stage, Trigger};
    pub use crate::resolver::{
        resolve_all_stage_artifacts, resolve_trigger_artifact_by_name,
        resolve_trigger_artifact_by_type,
    };
}
