//! Registry of expression functions keyed by qualified name.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::debug;

use super::{ArtifactFunctionProvider, ExpressionFunctionProvider, FunctionDefinition, FunctionValue};
use crate::config::ExecflowConfig;
use crate::errors::{ExecflowError, Result};
use crate::model::Execution;

static NAMESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("namespace pattern compiles"));

/// Returns true if `namespace` can prefix function names.
#[must_use]
pub fn is_valid_namespace(namespace: &str) -> bool {
    NAMESPACE_PATTERN.is_match(namespace)
}

/// Builds the name a function is registered under.
#[must_use]
pub fn qualified_name(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{ns}_{name}"),
        None => name.to_string(),
    }
}

/// Explicit name → definition map handed to an expression engine.
#[derive(Debug, Default, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDefinition>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in artifact functions.
    ///
    /// # Errors
    ///
    /// Returns [`ExecflowError::InvalidArgument`] if the configured namespace
    /// is not a valid identifier.
    pub fn with_defaults(config: &ExecflowConfig) -> Result<Self> {
        let provider = match config.functions.namespace.as_deref() {
            Some(ns) => ArtifactFunctionProvider::with_namespace(ns),
            None => ArtifactFunctionProvider::new(),
        };
        let mut registry = Self::new();
        registry.register_provider(&provider)?;
        Ok(registry)
    }

    /// Registers every function of `provider` under its namespace.
    ///
    /// # Errors
    ///
    /// Fails on an invalid namespace or a name that is already taken. No
    /// function of the provider is registered in that case.
    pub fn register_provider(&mut self, provider: &dyn ExpressionFunctionProvider) -> Result<()> {
        let namespace = provider.namespace();
        let functions = provider.functions();

        if let Some(ns) = namespace.as_deref() {
            if !is_valid_namespace(ns) {
                return Err(ExecflowError::invalid_argument(format!(
                    "invalid function namespace '{ns}'"
                )));
            }
        }
        let mut seen = HashSet::new();
        for function in &functions {
            let name = qualified_name(namespace.as_deref(), &function.name);
            if self.functions.contains_key(&name) || !seen.insert(name.clone()) {
                return Err(ExecflowError::DuplicateFunction(name));
            }
        }

        for function in functions {
            self.insert(namespace.as_deref(), function)?;
        }
        Ok(())
    }

    /// Registers a single function.
    ///
    /// # Errors
    ///
    /// Returns [`ExecflowError::DuplicateFunction`] if the qualified name is
    /// already registered.
    pub fn register(&mut self, namespace: Option<&str>, function: FunctionDefinition) -> Result<()> {
        if let Some(ns) = namespace {
            if !is_valid_namespace(ns) {
                return Err(ExecflowError::invalid_argument(format!(
                    "invalid function namespace '{ns}'"
                )));
            }
        }
        self.insert(namespace, function)
    }

    fn insert(&mut self, namespace: Option<&str>, function: FunctionDefinition) -> Result<()> {
        let name = qualified_name(namespace, &function.name);
        if self.functions.contains_key(&name) {
            return Err(ExecflowError::DuplicateFunction(name));
        }
        debug!(function = %name, parameters = function.parameters.len(), "Registered expression function");
        self.functions.insert(name, function);
        Ok(())
    }

    /// Returns the function registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.get(name)
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Returns all registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Invokes `name` against `execution`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecflowError::UnknownFunction`] for an unregistered name,
    /// otherwise whatever the function returns.
    pub fn invoke(
        &self,
        name: &str,
        execution: &Execution,
        args: &[serde_json::Value],
    ) -> Result<FunctionValue> {
        let function = self
            .get(name)
            .ok_or_else(|| ExecflowError::UnknownFunction(name.to_string()))?;
        function.invoke(execution, args)
    }
}
