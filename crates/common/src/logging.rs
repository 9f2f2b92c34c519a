//! Logging utilities for the availability monitor components.
//!
//! Diagnostics always go to stderr; stdout is reserved for availability
//! reports.

use crate::error::{Error, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize tracing with human readable output.
///
/// Uses the RUST_LOG environment variable to control log levels, falling
/// back to `default_level`.
pub fn init(default_level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter(default_level))
        .try_init()
        .map_err(Error::logging)
}

/// Initialize tracing with JSON formatting (useful for structured logging).
pub fn init_json(default_level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .with(filter(default_level))
        .try_init()
        .map_err(Error::logging)
}
