//! Artifact model types.
//!
//! - [`Artifact`]: a named, typed reference to a build or deployment output
//! - [`ExpectedArtifact`]: a declared requirement, optionally bound to an artifact

mod artifact;
mod expected;

pub(crate) use artifact::null_as_default;
pub use artifact::Artifact;
pub use expected::ExpectedArtifact;
