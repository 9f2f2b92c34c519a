//! Probe implementations.

use crate::types::{EndpointSpec, ProbeError, ProbeOutcome};
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout};
use tracing::debug;

/// Upper bound on a single probe unless configured otherwise
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Prober trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe an endpoint once. Never retries.
    async fn probe(&self, spec: &EndpointSpec) -> ProbeOutcome;
}

#[async_trait]
impl<P: Prober + ?Sized> Prober for Arc<P> {
    async fn probe(&self, spec: &EndpointSpec) -> ProbeOutcome {
        (**self).probe(spec).await
    }
}

/// Uppercased method, `GET` when unset.
pub fn effective_method(method: &str) -> String {
    let method = method.trim();
    if method.is_empty() {
        "GET".to_string()
    } else {
        method.to_uppercase()
    }
}

/// Only mutating methods carry the configured body.
pub fn method_allows_body(method: &str) -> bool {
    matches!(method, "POST" | "PUT" | "PATCH")
}

/// HTTP/HTTPS prober
pub struct HttpProber {
    client: reqwest::Client,
    timeout_duration: Duration,
}

impl HttpProber {
    /// Create a new HTTP prober with a bounded per-probe timeout
    pub fn new(timeout_duration: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout_duration)
            .build()?;

        Ok(Self {
            client,
            timeout_duration,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_duration
    }

    /// Build the outgoing request without sending it
    pub fn build_request(&self, spec: &EndpointSpec) -> Result<reqwest::Request, ProbeError> {
        let build_error = |reason: String| ProbeError::Build {
            url: spec.url.clone(),
            reason,
        };

        let method_name = effective_method(&spec.method);
        let method = Method::from_bytes(method_name.as_bytes())
            .map_err(|e| build_error(format!("invalid method {method_name:?}: {e}")))?;

        let mut headers = HeaderMap::with_capacity(spec.headers.len());
        for (key, value) in &spec.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| build_error(format!("invalid header name {key:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| build_error(format!("invalid value for header {key:?}: {e}")))?;
            headers.insert(name, value);
        }

        let mut builder = self.client.request(method, spec.url.as_str()).headers(headers);
        if method_allows_body(&method_name) {
            builder = builder.body(spec.body.clone());
        }

        builder.build().map_err(|e| build_error(e.to_string()))
    }

    fn transport_error(&self, spec: &EndpointSpec, error: reqwest::Error) -> ProbeError {
        if error.is_timeout() {
            ProbeError::Timeout {
                url: spec.url.clone(),
                timeout: self.timeout_duration,
            }
        } else {
            ProbeError::Transport {
                url: spec.url.clone(),
                reason: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, spec: &EndpointSpec) -> ProbeOutcome {
        let request = match self.build_request(spec) {
            Ok(request) => request,
            Err(e) => return ProbeOutcome::failed(e, Duration::ZERO),
        };

        let start = Instant::now();

        // The body is read inside the timer so latency covers the full response.
        let exchange = async move {
            let response = self.client.execute(request).await?;
            let status = response.status().as_u16();
            response.bytes().await?;
            Ok::<u16, reqwest::Error>(status)
        };

        match timeout(self.timeout_duration, exchange).await {
            Ok(Ok(status)) => {
                let latency = start.elapsed();
                debug!(
                    url = %spec.url,
                    status,
                    latency_ms = latency.as_millis(),
                    "Probe completed"
                );
                ProbeOutcome::response(status, latency)
            }
            Ok(Err(e)) => {
                let latency = start.elapsed();
                debug!(url = %spec.url, error = %e, "Probe failed");
                ProbeOutcome::failed(self.transport_error(spec, e), latency)
            }
            Err(_) => {
                let latency = start.elapsed();
                debug!(url = %spec.url, "Probe timed out");
                ProbeOutcome::failed(
                    ProbeError::Timeout {
                        url: spec.url.clone(),
                        timeout: self.timeout_duration,
                    },
                    latency,
                )
            }
        }
    }
}
