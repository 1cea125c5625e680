//! Domain error types
//!
//! This module defines the error hierarchy for the exporter. Errors raised by
//! the Google Cloud adapters are wrapped in [`UpstreamError`] so that callers
//! never see `reqwest` types directly.

use std::fmt;
use thiserror::Error;

/// External service an upstream error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Firestore export / long-running operations API
    Firestore,
    /// Pub/Sub publisher
    PubSub,
    /// BigQuery jobs API
    BigQuery,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Firestore => "Firestore",
            Service::PubSub => "Pub/Sub",
            Service::BigQuery => "BigQuery",
        };
        f.write_str(name)
    }
}

/// Main exporter error type
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Required configuration value absent or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure talking to one of the Google Cloud APIs
    #[error("{service} error: {source}")]
    Upstream {
        service: Service,
        #[source]
        source: UpstreamError,
    },

    /// Queue payload could not be decoded into a poll message
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// Operation status response is missing a required field
    #[error("Malformed operation status for {job_name}: {reason}")]
    MalformedStatus { job_name: String, reason: String },

    /// Some per-collection load jobs could not be submitted
    #[error("Import partially failed for {job_name}: {failed}/{total} load jobs rejected")]
    PartialImportFailure {
        job_name: String,
        failed: usize,
        total: usize,
    },

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl ExporterError {
    /// Wraps an upstream error with the service it came from
    pub fn upstream(service: Service, source: UpstreamError) -> Self {
        ExporterError::Upstream { service, source }
    }

    /// Returns true if the upstream API answered with a non-success status
    pub fn is_upstream_rejection(&self) -> bool {
        matches!(
            self,
            ExporterError::Upstream {
                source: UpstreamError::Rejected { .. },
                ..
            }
        )
    }
}

/// Errors returned by the Google Cloud REST adapters
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Non-success HTTP response; body kept verbatim for manual replay
    #[error("request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Failed to reach the service
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Per-call timeout elapsed
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Response body did not have the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(err.to_string())
        } else if err.is_decode() {
            UpstreamError::InvalidResponse(err.to_string())
        } else {
            UpstreamError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExporterError {
    fn from(err: serde_json::Error) -> Self {
        ExporterError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ExporterError {
    fn from(err: toml::de::Error) -> Self {
        ExporterError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<base64::DecodeError> for ExporterError {
    fn from(err: base64::DecodeError) -> Self {
        ExporterError::MalformedMessage(format!("invalid base64 payload: {err}"))
    }
}
