//! Global subscriber installation.
//!
//! Kept in its own test binary so the installed subscriber does not capture
//! output from the library's unit tests.

use execflow::config::TracingConfig;
use execflow::observability::{init_tracing, TracingInitError};

#[test]
fn second_init_reports_already_installed() {
    let config = TracingConfig {
        filter: "off".to_string(),
        json: false,
    };
    let _ = init_tracing(&config);
    assert!(matches!(
        init_tracing(&config),
        Err(TracingInitError::AlreadyInstalled(_))
    ));
}
