//! Artifact value type.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Decodes an explicit JSON `null` as the field's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A named, typed reference to a build or deployment output.
///
/// Artifacts have no identity of their own: two artifacts with the same
/// fields are the same artifact. They are built once during trigger or stage
/// resolution and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// The artifact type (e.g., "docker/image", "s3/object").
    #[serde(rename = "type")]
    pub artifact_type: String,

    /// The artifact name. Embedded artifacts may have none.
    #[serde(default)]
    pub name: Option<String>,

    /// Whether the type is a user-defined kind.
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_kind: bool,

    /// The artifact version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Where the artifact lives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// A fully qualified reference (e.g., an image digest or object URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// The account used to fetch the artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_account: Option<String>,

    /// Where the artifact came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<String>,

    /// Optional unique identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Additional metadata about the artifact.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Artifact {
    /// Creates a new artifact with the given type and name.
    #[must_use]
    pub fn new(artifact_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            artifact_type: artifact_type.into(),
            name: Some(name.into()),
            custom_kind: false,
            version: None,
            location: None,
            reference: None,
            artifact_account: None,
            provenance: None,
            uuid: None,
            metadata: HashMap::new(),
        }
    }

    /// Creates an artifact of the given type without a name.
    #[must_use]
    pub fn unnamed(artifact_type: impl Into<String>) -> Self {
        Self {
            name: None,
            ..Self::new(artifact_type, String::new())
        }
    }

    /// Returns the artifact name, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the artifact account.
    #[must_use]
    pub fn with_artifact_account(mut self, account: impl Into<String>) -> Self {
        self.artifact_account = Some(account.into());
        self
    }

    /// Sets the provenance.
    #[must_use]
    pub fn with_provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = Some(provenance.into());
        self
    }

    /// Sets the uuid.
    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    /// Marks the artifact as a custom kind.
    #[must_use]
    pub fn custom_kind(mut self) -> Self {
        self.custom_kind = true;
        self
    }

    /// Adds metadata to the artifact.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Converts the artifact to its JSON form, as stored in stage outputs.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
