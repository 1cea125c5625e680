//! Configuration schema types

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Root configuration
///
/// Every section has defaults so the whole file is optional; the four
/// deployment values (project, bucket, topic, dataset) have no usable default
/// and are rejected by [`ExporterConfig::validate`] when left empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Google Cloud project, bucket, and API endpoints
    #[serde(default)]
    pub gcp: GcpConfig,

    /// Status-check topic
    #[serde(default)]
    pub pubsub: PubSubConfig,

    /// Destination dataset
    #[serde(default)]
    pub bigquery: BigQueryConfig,

    /// Poll cadence and budget
    #[serde(default)]
    pub poller: PollerConfig,

    /// Load-job fan-out
    #[serde(default)]
    pub import: ImportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExporterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value found
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.gcp.validate()?;
        self.pubsub.validate()?;
        self.bigquery.validate()?;
        self.poller.validate()?;
        self.import.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log export/publish/load calls instead of performing them
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Google Cloud configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcpConfig {
    /// Project identifier (`GCP_PROJECT`)
    #[serde(default)]
    pub project_id: String,

    /// Export bucket name (`GCP_BUCKET`), without the `gs://` scheme
    #[serde(default)]
    pub bucket: String,

    /// Firestore database id
    #[serde(default = "default_database_id")]
    pub database_id: String,

    /// OAuth2 bearer token sent with every request (`GCP_ACCESS_TOKEN`)
    ///
    /// Obtaining the token is left to the hosting environment. When absent,
    /// requests are sent unauthenticated, which is what the local emulators
    /// expect.
    #[serde(default)]
    pub access_token: Option<SecretString>,

    /// Firestore REST endpoint
    #[serde(default = "default_firestore_endpoint")]
    pub firestore_endpoint: String,

    /// Pub/Sub REST endpoint
    #[serde(default = "default_pubsub_endpoint")]
    pub pubsub_endpoint: String,

    /// BigQuery REST endpoint
    #[serde(default = "default_bigquery_endpoint")]
    pub bigquery_endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl GcpConfig {
    fn validate(&self) -> Result<(), String> {
        if self.project_id.trim().is_empty() {
            return Err("gcp.project_id is required (set GCP_PROJECT)".to_string());
        }

        if self.bucket.trim().is_empty() {
            return Err("gcp.bucket is required (set GCP_BUCKET)".to_string());
        }

        if self.database_id.trim().is_empty() {
            return Err("gcp.database_id cannot be empty".to_string());
        }

        for (name, endpoint) in [
            ("gcp.firestore_endpoint", &self.firestore_endpoint),
            ("gcp.pubsub_endpoint", &self.pubsub_endpoint),
            ("gcp.bigquery_endpoint", &self.bigquery_endpoint),
        ] {
            let parsed = url::Url::parse(endpoint)
                .map_err(|e| format!("{name} is not a valid URL '{endpoint}': {e}"))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(format!("{name} must start with http:// or https://"));
            }
        }

        if self.request_timeout_seconds == 0 || self.request_timeout_seconds > 540 {
            return Err(format!(
                "gcp.request_timeout_seconds must be between 1 and 540, got {}",
                self.request_timeout_seconds
            ));
        }

        Ok(())
    }
}

impl Default for GcpConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            bucket: String::new(),
            database_id: default_database_id(),
            access_token: None,
            firestore_endpoint: default_firestore_endpoint(),
            pubsub_endpoint: default_pubsub_endpoint(),
            bigquery_endpoint: default_bigquery_endpoint(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

/// Pub/Sub configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PubSubConfig {
    /// Topic the status poller listens on (`PS_JOB_STATUS_TOPIC`)
    #[serde(default)]
    pub status_topic: String,
}

impl PubSubConfig {
    fn validate(&self) -> Result<(), String> {
        if self.status_topic.trim().is_empty() {
            return Err("pubsub.status_topic is required (set PS_JOB_STATUS_TOPIC)".to_string());
        }
        if self.status_topic.contains('/') {
            return Err(format!(
                "pubsub.status_topic must be a bare topic name, got '{}'",
                self.status_topic
            ));
        }
        Ok(())
    }
}

/// BigQuery configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BigQueryConfig {
    /// Destination dataset (`BQ_DATASET`)
    #[serde(default)]
    pub dataset: String,

    /// Job location, e.g. `EU`; defaults to the dataset's location
    #[serde(default)]
    pub location: Option<String>,
}

impl BigQueryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dataset.trim().is_empty() {
            return Err("bigquery.dataset is required (set BQ_DATASET)".to_string());
        }
        Ok(())
    }
}

/// Status poller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Delay before requeueing a still-running job, in seconds
    #[serde(default = "default_poll_interval_seconds")]
    pub interval_seconds: u64,

    /// Polls after which a still-running job is reported as timed out
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
}

impl PollerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.interval_seconds > 480 {
            return Err(format!(
                "poller.interval_seconds must be <= 480, got {}",
                self.interval_seconds
            ));
        }
        if self.max_polls == 0 {
            return Err("poller.max_polls must be > 0".to_string());
        }
        Ok(())
    }

    /// Requeue delay as a Duration
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_seconds)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_poll_interval_seconds(),
            max_polls: default_max_polls(),
        }
    }
}

/// Import dispatcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Load jobs submitted concurrently
    #[serde(default = "default_import_concurrency")]
    pub max_concurrency: usize,
}

impl ImportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 || self.max_concurrency > 50 {
            return Err(format!(
                "import.max_concurrency must be between 1 and 50, got {}",
                self.max_concurrency
            ));
        }
        Ok(())
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_import_concurrency(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Console output format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(format!(
                "Invalid logging.format '{}'. Must be one of: {}",
                self.format,
                valid_formats.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_id() -> String {
    "(default)".to_string()
}

fn default_firestore_endpoint() -> String {
    "https://firestore.googleapis.com".to_string()
}

fn default_pubsub_endpoint() -> String {
    "https://pubsub.googleapis.com".to_string()
}

fn default_bigquery_endpoint() -> String {
    "https://bigquery.googleapis.com".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_poll_interval_seconds() -> u64 {
    120
}

fn default_max_polls() -> u32 {
    360
}

fn default_import_concurrency() -> usize {
    4
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_local_path() -> String {
    "/var/log/fsbq".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
