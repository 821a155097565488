//! Expected artifact bindings.

use serde::{Deserialize, Serialize};

use super::Artifact;

/// A declared artifact requirement.
///
/// Trigger resolution (outside this crate) fills in `bound_artifact` once a
/// concrete artifact has been matched against the expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedArtifact {
    /// Identifier of the expectation within the pipeline.
    pub id: String,

    /// Human readable name shown in pipeline configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// The artifact shape incoming artifacts are matched against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_artifact: Option<Artifact>,

    /// Fall back to the artifact bound in the previous execution.
    #[serde(default)]
    pub use_prior_artifact: bool,

    /// Fall back to `default_artifact` when nothing matched.
    #[serde(default)]
    pub use_default_artifact: bool,

    /// Artifact used when `use_default_artifact` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_artifact: Option<Artifact>,

    /// The concrete artifact resolved for this expectation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_artifact: Option<Artifact>,
}

impl ExpectedArtifact {
    /// Creates an unresolved expectation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            match_artifact: None,
            use_prior_artifact: false,
            use_default_artifact: false,
            default_artifact: None,
            bound_artifact: None,
        }
    }

    /// Creates an expectation already bound to `artifact`.
    #[must_use]
    pub fn bound(id: impl Into<String>, artifact: Artifact) -> Self {
        Self::new(id).with_bound_artifact(artifact)
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the match artifact.
    #[must_use]
    pub fn with_match_artifact(mut self, artifact: Artifact) -> Self {
        self.match_artifact = Some(artifact);
        self
    }

    /// Sets the default artifact and enables the fallback.
    #[must_use]
    pub fn with_default_artifact(mut self, artifact: Artifact) -> Self {
        self.default_artifact = Some(artifact);
        self.use_default_artifact = true;
        self
    }

    /// Enables falling back to the prior execution's artifact.
    #[must_use]
    pub fn use_prior_artifact(mut self) -> Self {
        self.use_prior_artifact = true;
        self
    }

    /// Sets the bound artifact.
    #[must_use]
    pub fn with_bound_artifact(mut self, artifact: Artifact) -> Self {
        self.bound_artifact = Some(artifact);
        self
    }

    /// Returns the bound artifact, if resolved.
    #[must_use]
    pub fn bound_artifact(&self) -> Option<&Artifact> {
        self.bound_artifact.as_ref()
    }

    /// Returns true if an artifact has been bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound_artifact.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_expectation() {
        let expected = ExpectedArtifact::new("ea-1").with_display_name("app image");
        assert!(!expected.is_bound());
        assert!(expected.bound_artifact().is_none());
    }

    #[test]
    fn test_bound_expectation() {
        let artifact = Artifact::new("docker/image", "app");
        let expected = ExpectedArtifact::bound("ea-1", artifact.clone());

        assert!(expected.is_bound());
        assert_eq!(expected.bound_artifact(), Some(&artifact));
    }

    #[test]
    fn test_default_artifact_enables_fallback() {
        let expected = ExpectedArtifact::new("ea-1")
            .with_default_artifact(Artifact::new("docker/image", "app").with_version("latest"));
        assert!(expected.use_default_artifact);
        assert!(!expected.use_prior_artifact);
    }

    #[test]
    fn test_deserialize_with_null_bound_artifact() {
        let expected: ExpectedArtifact = serde_json::from_value(serde_json::json!({
            "id": "ea-1",
            "matchArtifact": {"type": "docker/image", "name": "app"},
            "boundArtifact": null
        }))
        .unwrap();

        assert!(!expected.is_bound());
        assert_eq!(
            expected.match_artifact.map(|a| a.artifact_type),
            Some("docker/image".to_string())
        );
    }
}
