//! Command line interface.

use crate::types::MonitorSettings;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "availability-monitor",
    about = "Probe HTTP endpoints and report per-domain availability",
    version
)]
pub struct Cli {
    /// YAML file listing the endpoints to probe
    pub config: PathBuf,

    /// Upper bound on a single probe (e.g. 500ms, 10s)
    #[arg(long, default_value = "10s", value_parser = humantime::parse_duration)]
    pub timeout: Duration,

    /// Pause between cycles
    #[arg(long, default_value = "15s", value_parser = humantime::parse_duration)]
    pub interval: Duration,

    /// Stop after this many cycles
    #[arg(long)]
    pub cycles: Option<usize>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Serve Prometheus metrics on this address (e.g. 127.0.0.1:9100)
    #[arg(long)]
    pub metrics_addr: Option<String>,
}

impl Cli {
    /// Convert to MonitorSettings
    pub fn to_settings(&self) -> MonitorSettings {
        MonitorSettings {
            probe_timeout: self.timeout,
            interval: self.interval,
            cycles: self.cycles,
            metrics_addr: self.metrics_addr.clone(),
        }
    }
}
