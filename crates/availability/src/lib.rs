//! Endpoint availability probing.
//!
//! This crate holds the probe-and-aggregate core of the availability
//! monitor:
//! - `domain`: maps endpoint URLs to domain keys
//! - `prober`: sends one HTTP(S) request per endpoint and times it
//! - `classifier`: healthy iff 2xx within 500ms
//! - `stats`: cumulative per-domain success/total counts
//! - `scheduler`: sequential probe cycles separated by a fixed pause
//! - `reporter`: prints `<domain> has <pct>% availability` lines
//!
//! # Example
//!
//! ```no_run
//! use availability::{EndpointSpec, HttpProber, Scheduler, StatsAggregator, WriterReporter};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoints = vec![EndpointSpec::get("api", "https://api.example.com/health")];
//! let prober = HttpProber::new(Duration::from_secs(10))?;
//!
//! let mut scheduler = Scheduler::new(
//!     endpoints,
//!     StatsAggregator::new(),
//!     prober,
//!     WriterReporter::stdout(),
//! );
//! scheduler.run().await;
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod domain;
pub mod prober;
pub mod reporter;
pub mod scheduler;
pub mod stats;
pub mod types;

pub use classifier::{HEALTHY_STATUS, LATENCY_THRESHOLD, classify};
pub use domain::{DomainError, extract_domain};
pub use prober::{DEFAULT_PROBE_TIMEOUT, HttpProber, Prober};
pub use reporter::{Reporter, WriterReporter, format_report};
pub use scheduler::{
    CYCLE_INTERVAL, CycleObserver, CycleSummary, Scheduler, SchedulerState, Sleeper, TokioSleeper,
};
pub use stats::{StatsAggregator, StatsSnapshot};
pub use types::{DomainStats, EndpointSpec, HealthStatus, ProbeError, ProbeOutcome};
