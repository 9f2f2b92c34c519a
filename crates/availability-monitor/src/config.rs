//! Endpoint file loading and validation

use availability::EndpointSpec;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Endpoint file error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read endpoint file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid endpoint #{index} ({name:?}): {source}")]
    ValidationError {
        index: usize,
        name: String,
        #[source]
        source: validator::ValidationErrors,
    },
}

/// One endpoint record as written in the file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct EndpointRecord {
    #[serde(default)]
    pub name: String,

    #[validate(custom = "validate_url")]
    pub url: String,

    #[serde(default)]
    pub method: String,

    #[serde(default)]
    pub headers: HashMap<String, String>,

    #[serde(default)]
    pub body: String,
}

impl From<EndpointRecord> for EndpointSpec {
    fn from(record: EndpointRecord) -> Self {
        EndpointSpec {
            name: record.name,
            url: record.url,
            method: record.method,
            headers: record.headers,
            body: record.body,
        }
    }
}

/// Parsed endpoint file: a YAML sequence of endpoint records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFile {
    pub endpoints: Vec<EndpointRecord>,
}

// URL syntax is checked per probe; only a missing URL is fatal here.
fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::new("url_empty"));
    }
    Ok(())
}

impl EndpointFile {
    /// Parse and validate endpoint records from YAML text
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let endpoints: Vec<EndpointRecord> = serde_yaml::from_str(contents)?;
        let file = Self { endpoints };
        file.validate()?;
        Ok(file)
    }

    /// Load endpoint records from a file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::info!("Loading endpoints from: {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (index, record) in self.endpoints.iter().enumerate() {
            record
                .validate()
                .map_err(|source| ConfigError::ValidationError {
                    index,
                    name: record.name.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Convert to the endpoint specs the scheduler consumes, keeping file order
    pub fn into_specs(self) -> Vec<EndpointSpec> {
        self.endpoints.into_iter().map(EndpointSpec::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_yaml_parsing() {
        let yaml = r#"
- name: sample body up
  url: https://api.example.com/body
  method: POST
  headers:
    content-type: application/json
  body: '{"foo":"bar"}'
- name: sample index up
  url: https://api.example.com/
"#;

        let file = EndpointFile::from_yaml_str(yaml).unwrap();
        assert_eq!(file.endpoints.len(), 2);

        let first = &file.endpoints[0];
        assert_eq!(first.method, "POST");
        assert_eq!(first.headers["content-type"], "application/json");
        assert_eq!(first.body, "{\"foo\":\"bar\"}");

        let second = &file.endpoints[1];
        assert_eq!(second.name, "sample index up");
        assert!(second.method.is_empty());
        assert!(second.headers.is_empty());
        assert!(second.body.is_empty());
    }

    #[test]
    fn test_into_specs_keeps_order() {
        let yaml = r#"
- name: b
  url: https://b.test/
- name: a
  url: https://a.test/
  method: get
"#;

        let specs = EndpointFile::from_yaml_str(yaml).unwrap().into_specs();
        let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(specs[1].method, "get");
    }

    #[test]
    fn test_missing_url_is_rejected() {
        let yaml = r#"
- name: no url
  method: GET
"#;
        assert!(matches!(
            EndpointFile::from_yaml_str(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_blank_url_is_rejected() {
        let yaml = r#"
- name: ok
  url: https://ok.test/
- name: blank
  url: "  "
"#;
        match EndpointFile::from_yaml_str(yaml) {
            Err(ConfigError::ValidationError { index, name, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(name, "blank");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_list_is_accepted() {
        let file = EndpointFile::from_yaml_str("[]").unwrap();
        assert!(file.into_specs().is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        assert!(matches!(
            EndpointFile::from_yaml_str("url: [unterminated"),
            Err(ConfigError::ParseError(_))
        ));
        // A mapping where a sequence is expected
        assert!(matches!(
            EndpointFile::from_yaml_str("name: x\nurl: https://x.test/\n"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_unparseable_url_is_kept() {
        // Probed and logged at runtime rather than rejected at load
        let file = EndpointFile::from_yaml_str("- url: not a url\n").unwrap();
        assert_eq!(file.endpoints[0].url, "not a url");
    }

    #[test]
    fn test_missing_file() {
        let err = EndpointFile::load_from_file("/nonexistent/endpoints.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
        assert!(err.to_string().contains("/nonexistent/endpoints.yaml"));
    }
}
