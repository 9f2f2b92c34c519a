//! Health classification of probe outcomes.

use crate::types::{HealthStatus, ProbeOutcome};
use std::ops::Range;
use std::time::Duration;

/// Slowest response still counted as healthy
pub const LATENCY_THRESHOLD: Duration = Duration::from_millis(500);

/// Status codes counted as healthy
pub const HEALTHY_STATUS: Range<u16> = 200..300;

/// Healthy iff the probe got a 2xx response within the latency threshold.
pub fn classify(outcome: &ProbeOutcome) -> HealthStatus {
    if outcome.error.is_some() {
        return HealthStatus::Unhealthy;
    }

    match outcome.status_code {
        Some(code) if HEALTHY_STATUS.contains(&code) && outcome.latency <= LATENCY_THRESHOLD => {
            HealthStatus::Healthy
        }
        _ => HealthStatus::Unhealthy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProbeError;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_fast_success_is_healthy() {
        assert_eq!(classify(&ProbeOutcome::response(200, ms(499))), HealthStatus::Healthy);
        assert_eq!(classify(&ProbeOutcome::response(204, ms(1))), HealthStatus::Healthy);
        assert_eq!(classify(&ProbeOutcome::response(299, ms(500))), HealthStatus::Healthy);
    }

    #[test]
    fn test_slow_success_is_unhealthy() {
        assert_eq!(classify(&ProbeOutcome::response(200, ms(501))), HealthStatus::Unhealthy);
    }

    #[test]
    fn test_non_2xx_is_unhealthy() {
        assert_eq!(classify(&ProbeOutcome::response(404, ms(10))), HealthStatus::Unhealthy);
        assert_eq!(classify(&ProbeOutcome::response(199, ms(10))), HealthStatus::Unhealthy);
        assert_eq!(classify(&ProbeOutcome::response(300, ms(10))), HealthStatus::Unhealthy);
        assert_eq!(classify(&ProbeOutcome::response(500, ms(10))), HealthStatus::Unhealthy);
    }

    #[test]
    fn test_errors_are_unhealthy() {
        let error = ProbeError::Transport {
            url: "http://svc.test".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(classify(&ProbeOutcome::failed(error, ms(0))), HealthStatus::Unhealthy);

        // A status code alongside an error still counts as a failure
        let mut outcome = ProbeOutcome::response(200, ms(10));
        outcome.error = Some(ProbeError::Timeout {
            url: "http://svc.test".to_string(),
            timeout: ms(10),
        });
        assert_eq!(classify(&outcome), HealthStatus::Unhealthy);
    }
}
