//! Availability monitor process.
//!
//! Wraps the `availability` core with the pieces a long-running process
//! needs:
//! - **cli**: command line flags
//! - **config**: YAML endpoint file loading and validation
//! - **metrics** / **http_server**: optional Prometheus endpoint
//! - **app**: wiring and the run loop entry points

pub mod app;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod metrics;
pub mod types;

pub use app::{load_endpoints, run, run_with_reporter};
pub use cli::{Cli, LogFormat};
pub use config::{ConfigError, EndpointFile, EndpointRecord};
pub use http_server::MetricsServer;
pub use metrics::MetricsRegistry;
pub use types::MonitorSettings;
