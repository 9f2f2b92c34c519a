//! Common utilities and types shared across the availability monitor crates.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
