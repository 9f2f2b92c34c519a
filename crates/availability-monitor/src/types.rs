//! Runtime settings for the monitor process.

use availability::{CYCLE_INTERVAL, DEFAULT_PROBE_TIMEOUT};
use std::time::Duration;
use validator::{Validate, ValidationError};

/// Monitor settings
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct MonitorSettings {
    /// Upper bound on a single probe
    #[validate(custom = "validate_probe_timeout")]
    pub probe_timeout: Duration,

    /// Pause between cycles
    #[validate(custom = "validate_interval")]
    pub interval: Duration,

    /// Stop after this many cycles instead of running until interrupted
    #[validate(range(min = 1))]
    pub cycles: Option<usize>,

    /// Listen address for the Prometheus endpoint, disabled when unset
    pub metrics_addr: Option<String>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            interval: CYCLE_INTERVAL,
            cycles: None,
            metrics_addr: None,
        }
    }
}

fn validate_probe_timeout(timeout: &Duration) -> Result<(), ValidationError> {
    let millis = timeout.as_millis();
    if millis < 1 || millis > 300_000 {
        return Err(ValidationError::new("probe_timeout_out_of_range"));
    }
    Ok(())
}

fn validate_interval(interval: &Duration) -> Result<(), ValidationError> {
    if interval.as_millis() < 1 {
        return Err(ValidationError::new("interval_out_of_range"));
    }
    Ok(())
}
