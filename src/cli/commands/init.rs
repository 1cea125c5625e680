//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "fsbq.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing fsbq configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your project, bucket, topic and dataset", self.output);
                println!("     (or set GCP_PROJECT, GCP_BUCKET, PS_JOB_STATUS_TOPIC, BQ_DATASET)");
                println!("  2. Export an access token: GCP_ACCESS_TOKEN=$(gcloud auth print-access-token)");
                println!("  3. Validate configuration: fsbq -c {} validate-config", self.output);
                println!("  4. Start an export: fsbq -c {} trigger --collection-ids users", self.output);
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# fsbq Configuration File
# Firestore to BigQuery export pipeline

[application]
log_level = "info"
dry_run = false

[gcp]
project_id = "my-project"
bucket = "my-export-bucket"
# access_token = "${GCP_ACCESS_TOKEN}"

[pubsub]
status_topic = "firestore-export-status"

[bigquery]
dataset = "firestore_raw"

[poller]
interval_seconds = 120
max_polls = 360

[import]
max_concurrency = 4

[logging]
format = "pretty"
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# fsbq Configuration File
# Firestore to BigQuery export pipeline
#
# Every value can be overridden from the environment. The deployment values
# use the same names as the Cloud Functions runtime:
#   GCP_PROJECT, GCP_BUCKET, PS_JOB_STATUS_TOPIC, BQ_DATASET, GCP_ACCESS_TOKEN
# Tuning values use EXPORTER_<SECTION>_<KEY>, e.g. EXPORTER_POLLER_MAX_POLLS.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (log exports, publishes and load jobs instead of issuing them)
dry_run = false

# ============================================================================
# Google Cloud
# ============================================================================
[gcp]
# Project owning the Firestore database, topic and dataset
project_id = "my-project"

# Cloud Storage bucket receiving the export files (without gs://)
bucket = "my-export-bucket"

# Firestore database id
database_id = "(default)"

# OAuth2 bearer token. Leave unset for emulators.
# access_token = "${GCP_ACCESS_TOKEN}"

# API endpoints (override for emulators or private endpoints)
firestore_endpoint = "https://firestore.googleapis.com"
pubsub_endpoint = "https://pubsub.googleapis.com"
bigquery_endpoint = "https://bigquery.googleapis.com"

# Per-request timeout in seconds (1-540)
request_timeout_seconds = 30

# ============================================================================
# Pub/Sub
# ============================================================================
[pubsub]
# Topic carrying {"name": "<job>"} status-check messages
status_topic = "firestore-export-status"

# ============================================================================
# BigQuery
# ============================================================================
[bigquery]
# Dataset receiving one table per collection
dataset = "firestore_raw"

# Job location, required for datasets outside US/EU multi-regions
# location = "europe-west1"

# ============================================================================
# Status Poller
# ============================================================================
[poller]
# Seconds to wait before requeueing a still-running export (max 480)
interval_seconds = 120

# Give up after this many polls (360 x 2 minutes = 12 hours)
max_polls = 360

# ============================================================================
# Import Dispatcher
# ============================================================================
[import]
# Load jobs submitted concurrently (1-50)
max_concurrency = 4

# ============================================================================
# Logging
# ============================================================================
[logging]
# Console format: "pretty" for terminals, "json" for Cloud Logging
format = "pretty"

# Rolling JSON log files
local_enabled = false
local_path = "/var/log/fsbq"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
