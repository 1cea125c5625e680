//! Trigger command implementation
//!
//! Starts a Firestore export for the given collections and enqueues the
//! first status check.

use crate::adapters::create_adapters;
use crate::cli::{exit_code_for, EXIT_MALFORMED, EXIT_OK, EXIT_UPSTREAM};
use crate::config::ExporterConfig;
use crate::core::{Pipeline, TriggerResponse};
use clap::Args;

/// Arguments for the trigger command
#[derive(Args, Debug)]
pub struct TriggerArgs {
    /// Comma-separated collection ids, e.g. `users,orders`
    #[arg(long)]
    pub collection_ids: Option<String>,
}

impl TriggerArgs {
    /// Execute the trigger command
    pub async fn execute(&self, config: &ExporterConfig) -> anyhow::Result<i32> {
        let adapters = match create_adapters(config) {
            Ok(a) => a,
            Err(e) => {
                println!("❌ Failed to create Google Cloud clients");
                println!("   Error: {e}");
                return Ok(EXIT_UPSTREAM);
            }
        };
        let pipeline = Pipeline::new(config, adapters);

        match pipeline.handle_trigger(self.collection_ids.as_deref()).await {
            Ok(TriggerResponse::Started(job)) => {
                println!("✅ Export started");
                println!("   Job: {}", job.job_name);
                println!("   Output: {}", job.output_uri_prefix);
                println!("   Started: {}", job.started_at.to_rfc3339());
                println!(
                    "   Collections: {}",
                    job.collection_ids
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                println!("ok");
                Ok(EXIT_OK)
            }
            Ok(response @ TriggerResponse::MissingCollectionIds) => {
                println!("{}", response.body());
                Ok(EXIT_MALFORMED)
            }
            Err(e) => {
                tracing::error!(error = %e, "Trigger failed");
                println!("❌ Export could not be started");
                println!("   Error: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}
