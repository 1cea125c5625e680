//! Validate config command implementation
//!
//! Loading already validates; this command reports the effective values
//! after file, `${VAR}` substitution and environment overrides.

use crate::cli::{EXIT_CONFIG, EXIT_OK};
use crate::config::ExporterConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config: &ExporterConfig) -> anyhow::Result<i32> {
        tracing::info!("Validating configuration");

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            println!();
            return Ok(EXIT_CONFIG);
        }

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Project: {}", config.gcp.project_id);
        println!("  Database: {}", config.gcp.database_id);
        println!("  Bucket: gs://{}", config.gcp.bucket);
        println!(
            "  Access Token: {}",
            if config.gcp.access_token.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        println!("  Status Topic: {}", config.pubsub.status_topic);
        println!("  Dataset: {}", config.bigquery.dataset);
        if let Some(location) = &config.bigquery.location {
            println!("  Location: {location}");
        }
        println!(
            "  Poll Interval: {}s (max {} polls)",
            config.poller.interval_seconds, config.poller.max_polls
        );
        println!("  Import Concurrency: {}", config.import.max_concurrency);
        println!("  Log Format: {}", config.logging.format);
        println!();
        Ok(EXIT_OK)
    }
}
