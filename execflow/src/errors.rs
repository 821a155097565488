//! Error types for execflow.
//!
//! Every failure in this crate is deterministic: nothing is retried or
//! degraded locally. Callers either get a value or one of these errors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExecflowError>;

/// The main error type for execflow operations.
#[derive(Debug, Error)]
pub enum ExecflowError {
    /// A required reference was absent or a contract was violated at
    /// construction or invocation time.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A trigger artifact lookup found no match.
    #[error("{0}")]
    NotFound(#[from] ArtifactNotFoundError),

    /// No function is registered under the requested name.
    #[error("Unknown expression function: {0}")]
    UnknownFunction(String),

    /// A function with the same qualified name is already registered.
    #[error("Expression function already registered: {0}")]
    DuplicateFunction(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExecflowError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns true if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Raised when no bound trigger artifact matches a name or type lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Unable to locate resolved artifact {key} in trigger execution {execution_id}.")]
pub struct ArtifactNotFoundError {
    /// The name or type that was looked up.
    pub key: String,
    /// The execution that was searched.
    pub execution_id: String,
}

impl ArtifactNotFoundError {
    /// Creates a new not found error.
    #[must_use]
    pub fn new(key: impl Into<String>, execution_id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            execution_id: execution_id.into(),
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map.insert("key".to_string(), serde_json::json!(self.key));
        map.insert("execution_id".to_string(), serde_json::json!(self.execution_id));
        map
    }
}
