//! Common error types for the availability monitor components.

use std::fmt;

/// A specialized Result type for availability monitor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type shared by the workspace crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("HTTP server error: {0}")]
    Http(String),
}

impl Error {
    /// Create a new logging error.
    pub fn logging(msg: impl fmt::Display) -> Self {
        Error::Logging(msg.to_string())
    }

    /// Create a new HTTP server error.
    pub fn http(msg: impl fmt::Display) -> Self {
        Error::Http(msg.to_string())
    }
}
