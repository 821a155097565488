//! Function descriptors published to expression engines.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::artifacts::Artifact;
use crate::errors::{ExecflowError, Result};
use crate::model::Execution;

/// Type of a function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    /// The live execution, always supplied by the engine.
    Execution,
    /// A string argument.
    String,
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Execution => write!(f, "execution"),
            Self::String => write!(f, "string"),
        }
    }
}

/// A named, typed, documented function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub param_type: ParameterType,
    /// What the parameter means.
    pub description: String,
}

impl FunctionParameter {
    /// Creates a parameter descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        param_type: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
        }
    }
}

/// Value returned by an expression function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionValue {
    /// A single artifact.
    Artifact(Artifact),
    /// A list of artifacts.
    Artifacts(Vec<Artifact>),
}

impl FunctionValue {
    /// Converts to JSON for handing back to the expression engine.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Returns the single artifact, if that is what was returned.
    #[must_use]
    pub const fn as_artifact(&self) -> Option<&Artifact> {
        match self {
            Self::Artifact(a) => Some(a),
            Self::Artifacts(_) => None,
        }
    }

    /// Returns the artifact list, if that is what was returned.
    #[must_use]
    pub fn as_artifacts(&self) -> Option<&[Artifact]> {
        match self {
            Self::Artifact(_) => None,
            Self::Artifacts(a) => Some(a),
        }
    }
}

/// Callable behind a function. Receives the arguments after the execution.
pub type FunctionCallable = fn(&Execution, &[serde_json::Value]) -> Result<FunctionValue>;

/// A function an expression engine can bind by name.
#[derive(Clone)]
pub struct FunctionDefinition {
    /// Function name, unique within its provider.
    pub name: String,
    /// Human readable description.
    pub description: String,
    /// Ordered parameters, starting with the execution.
    pub parameters: Vec<FunctionParameter>,
    callable: FunctionCallable,
}

impl fmt::Debug for FunctionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl FunctionDefinition {
    /// Creates a definition with no parameters.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        callable: FunctionCallable,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            callable,
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: FunctionParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Parameters the caller supplies after the execution.
    fn argument_parameters(&self) -> impl Iterator<Item = &FunctionParameter> {
        self.parameters
            .iter()
            .filter(|p| p.param_type != ParameterType::Execution)
    }

    /// Calls the function after checking arity and argument types.
    ///
    /// # Errors
    ///
    /// Returns [`ExecflowError::InvalidArgument`] on an arity or type
    /// mismatch, or whatever the function itself returns.
    pub fn invoke(&self, execution: &Execution, args: &[serde_json::Value]) -> Result<FunctionValue> {
        let expected = self.argument_parameters().count();
        if args.len() != expected {
            return Err(ExecflowError::invalid_argument(format!(
                "{} expects {expected} argument(s) after the execution, got {}",
                self.name,
                args.len()
            )));
        }

        for (param, arg) in self.argument_parameters().zip(args) {
            if param.param_type == ParameterType::String && !arg.is_string() {
                return Err(ExecflowError::invalid_argument(format!(
                    "{}: parameter '{}' must be a {}, got {arg}",
                    self.name, param.name, param.param_type
                )));
            }
        }

        (self.callable)(execution, args)
    }
}
