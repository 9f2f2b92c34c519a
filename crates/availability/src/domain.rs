//! Domain key extraction.

use reqwest::Url;
use thiserror::Error;

/// Domain extraction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid URL {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("URL {url} has no host")]
    MissingHost { url: String },
}

/// Map an endpoint URL to its domain key: the host without any port.
///
/// The URL parser lowercases the host, so `HTTPS://Example.COM:8443` and
/// `https://example.com` share a key. IPv6 literals keep their brackets.
pub fn extract_domain(url: &str) -> Result<String, DomainError> {
    let parsed = Url::parse(url).map_err(|e| DomainError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(DomainError::MissingHost {
            url: url.to_string(),
        }),
    }
}
