//! Endpoint and probe types.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// An endpoint to probe, as loaded from the endpoint file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointSpec {
    /// Informational name
    pub name: String,

    /// Absolute URL of the endpoint
    pub url: String,

    /// HTTP method, case-insensitive; empty means GET
    pub method: String,

    /// Request headers
    pub headers: HashMap<String, String>,

    /// Request body, only sent for POST, PUT and PATCH
    pub body: String,
}

impl EndpointSpec {
    /// Create a GET endpoint with no headers or body.
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Why a probe produced no response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("failed to build request for {url}: {reason}")]
    Build { url: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },
}

/// Outcome of a single probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Response status, absent when no response arrived
    pub status_code: Option<u16>,

    /// Wall-clock time from dispatch to full response arrival
    pub latency: Duration,

    /// Request construction or transport failure
    pub error: Option<ProbeError>,
}

impl ProbeOutcome {
    /// Outcome for a probe that received a response
    pub fn response(status_code: u16, latency: Duration) -> Self {
        Self {
            status_code: Some(status_code),
            latency,
            error: None,
        }
    }

    /// Outcome for a probe that failed before a response arrived
    pub fn failed(error: ProbeError, latency: Duration) -> Self {
        Self {
            status_code: None,
            latency,
            error: Some(error),
        }
    }
}

/// Health classification of a probe outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(self) -> bool {
        self == HealthStatus::Healthy
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "HEALTHY"),
            HealthStatus::Unhealthy => write!(f, "UNHEALTHY"),
        }
    }
}

/// Cumulative probe counts for one domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainStats {
    /// Healthy probes
    pub successes: u64,

    /// All attributed probes
    pub total: u64,
}

impl DomainStats {
    /// Count one probe.
    pub fn update(&mut self, healthy: bool) {
        self.total += 1;
        if healthy {
            self.successes += 1;
        }
    }

    /// Availability as a truncated integer percentage, 0 with no probes
    pub fn percentage(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        100 * self.successes / self.total
    }
}
