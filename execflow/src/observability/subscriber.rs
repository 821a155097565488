//! `tracing-subscriber` setup for binaries embedding execflow.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TracingConfig;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TracingInitError {
    /// The configured filter directive is invalid.
    #[error("Invalid log filter '{filter}': {source}")]
    InvalidFilter {
        /// The rejected directive.
        filter: String,
        /// Parser error.
        #[source]
        source: ParseError,
    },

    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    AlreadyInstalled(String),
}

/// Builds the filter: `RUST_LOG` when set, otherwise `config.filter`.
///
/// # Errors
///
/// Returns [`TracingInitError::InvalidFilter`] if the configured directive
/// does not parse.
pub fn build_env_filter(config: &TracingConfig) -> Result<EnvFilter, TracingInitError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter).map_err(|source| TracingInitError::InvalidFilter {
        filter: config.filter.clone(),
        source,
    })
}

/// Installs a global `fmt` subscriber configured from `config`.
///
/// # Errors
///
/// Fails if the filter is invalid or a subscriber was already installed.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TracingInitError> {
    let filter = build_env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| TracingInitError::AlreadyInstalled(e.to_string()))
}
