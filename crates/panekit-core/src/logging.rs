#![forbid(unsafe_code)]

//! Structured logging hooks.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! level and span macros so downstream crates can log through
//! `panekit_core::debug!` and friends. Without it, nothing is compiled in.
//!
//! The `tracing-json` feature adds [`init_json_subscriber`], which installs a
//! JSON formatter filtered by the `PANEKIT_LOG` environment variable
//! (falling back to `panekit=info`).

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable consulted by [`init_json_subscriber`].
pub const LOG_FILTER_ENV: &str = "PANEKIT_LOG";

/// Failure to install the global subscriber (usually: one is already set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingInitError {
    message: String,
}

impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to install log subscriber: {}", self.message)
    }
}

impl std::error::Error for LoggingInitError {}

/// Install a global JSON subscriber.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new("panekit=info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| LoggingInitError {
            message: error.to_string(),
        })
}
