//! Execution model types.
//!
//! An [`Execution`] owns one [`Trigger`] and an ordered list of [`Stage`]s.
//! Each stage carries an [`ExecutionStatus`] and an output map.

mod execution;
mod stage;
mod status;
mod trigger;

pub use execution::Execution;
pub use stage::{ExecutionRef, Stage, ARTIFACTS_OUTPUT_KEY};
pub use status::{ExecutionStatus, ExecutionType};
pub use trigger::Trigger;
