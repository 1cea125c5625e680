//! Configuration management.
//!
//! Configuration comes from an optional TOML file overlaid with environment
//! variables. The four deployment values are required:
//!
//! | Variable              | Field                  |
//! |-----------------------|------------------------|
//! | `GCP_PROJECT`         | `gcp.project_id`       |
//! | `GCP_BUCKET`          | `gcp.bucket`           |
//! | `PS_JOB_STATUS_TOPIC` | `pubsub.status_topic`  |
//! | `BQ_DATASET`          | `bigquery.dataset`     |
//!
//! Missing any of them is a fatal [`ExporterError::Configuration`](crate::domain::ExporterError).
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [gcp]
//! project_id = "my-project"
//! bucket = "my-export-bucket"
//! access_token = "${GCP_ACCESS_TOKEN}"
//!
//! [pubsub]
//! status_topic = "firestore-export-status"
//!
//! [bigquery]
//! dataset = "firestore_raw"
//!
//! [poller]
//! interval_seconds = 120
//! max_polls = 360
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use firestore_bq_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(Some("fsbq.toml"))?;
//! println!("Exporting to gs://{}", config.gcp.bucket);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, BigQueryConfig, ExporterConfig, GcpConfig, ImportConfig, LoggingConfig,
    PollerConfig, PubSubConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
