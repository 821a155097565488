//! Artifact resolution over execution snapshots.
//!
//! All functions here are pure reads: they never mutate the execution and
//! never block beyond the short read locks a [`Stage`](crate::model::Stage)
//! takes to copy its outputs.

mod stages;
mod trigger;

pub use stages::{resolve_all_stage_artifacts, resolve_stage_artifacts};
pub use trigger::{
    find_bound_artifact, resolve_trigger_artifact_by_name, resolve_trigger_artifact_by_type,
};
