//! Configuration for execflow.

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Environment variable overriding [`FunctionsConfig::namespace`].
pub const ENV_FUNCTION_NAMESPACE: &str = "EXECFLOW_FUNCTION_NAMESPACE";
/// Environment variable overriding [`TracingConfig::filter`].
pub const ENV_LOG_FILTER: &str = "EXECFLOW_LOG_FILTER";
/// Environment variable overriding [`TracingConfig::json`].
pub const ENV_LOG_JSON: &str = "EXECFLOW_LOG_JSON";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecflowConfig {
    /// Expression function settings.
    #[serde(default)]
    pub functions: FunctionsConfig,
    /// Logging settings.
    #[serde(default)]
    pub tracing: TracingConfig,
}

impl ExecflowConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a serialization error on malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a configuration from defaults overridden by environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(namespace) = lookup(ENV_FUNCTION_NAMESPACE) {
            let namespace = namespace.trim();
            self.functions.namespace = (!namespace.is_empty()).then(|| namespace.to_string());
        }
        if let Some(filter) = lookup(ENV_LOG_FILTER) {
            self.tracing.filter = filter;
        }
        if let Some(json) = lookup(ENV_LOG_JSON) {
            self.tracing.json = matches!(json.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        self
    }

    /// Sets the function namespace.
    #[must_use]
    pub fn with_function_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.functions.namespace = Some(namespace.into());
        self
    }
}

/// Expression function settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionsConfig {
    /// Prefix for the built-in function names (`{namespace}_{name}`).
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingConfig {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ExecflowConfig::new();
        assert_eq!(config.functions.namespace, None);
        assert_eq!(config.tracing.filter, "info");
        assert!(!config.tracing.json);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = ExecflowConfig::from_json_str(r#"{"functions": {"namespace": "artifacts"}}"#).unwrap();
        assert_eq!(config.functions.namespace.as_deref(), Some("artifacts"));
        assert_eq!(config.tracing, TracingConfig::default());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(ExecflowConfig::from_json_str("{").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_FUNCTION_NAMESPACE, "ns"),
            (ENV_LOG_FILTER, "execflow=debug"),
            (ENV_LOG_JSON, "true"),
        ]
        .into_iter()
        .collect();

        let config = ExecflowConfig::default()
            .with_env_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.functions.namespace.as_deref(), Some("ns"));
        assert_eq!(config.tracing.filter, "execflow=debug");
        assert!(config.tracing.json);
    }

    #[test]
    fn test_blank_namespace_clears_it() {
        let config = ExecflowConfig::default()
            .with_function_namespace("ns")
            .with_env_overrides(|key| (key == ENV_FUNCTION_NAMESPACE).then(|| "  ".to_string()));
        assert_eq!(config.functions.namespace, None);
    }
}
