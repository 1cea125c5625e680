//! Status command implementation
//!
//! Prints a read-only snapshot of an export operation. Nothing is published
//! and no imports are dispatched.

use crate::adapters::create_adapters;
use crate::cli::{exit_code_for, EXIT_MALFORMED, EXIT_OK, EXIT_UPSTREAM};
use crate::config::ExporterConfig;
use crate::core::Pipeline;
use crate::domain::import::metadata_uri;
use crate::domain::{JobName, OperationState, PollMessage};
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Operation name returned by the trigger
    #[arg(long)]
    pub job_name: String,

    /// Print the raw operation resource
    #[arg(long)]
    pub raw: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config: &ExporterConfig) -> anyhow::Result<i32> {
        tracing::info!(job_name = %self.job_name, "Checking export status");

        let job_name = match JobName::new(self.job_name.clone()) {
            Ok(j) => j,
            Err(e) => {
                println!("❌ Invalid job name: {e}");
                return Ok(EXIT_MALFORMED);
            }
        };

        let adapters = match create_adapters(config) {
            Ok(a) => a,
            Err(e) => {
                println!("❌ Failed to create Google Cloud clients");
                println!("   Error: {e}");
                return Ok(EXIT_UPSTREAM);
            }
        };
        let pipeline = Pipeline::new(config, adapters);

        let status = match pipeline
            .poller()
            .fetch_status(&PollMessage::new(job_name))
            .await
        {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to read export status");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let icon = match status.state {
            OperationState::Successful => "✅",
            OperationState::Processing => "🔄",
            OperationState::Other(_) => "❌",
        };

        println!("📊 Export Status");
        println!();
        println!("  Job:    {}", status.job_name);
        println!("  State:  {icon} {}", status.state);
        println!(
            "  Output: {}",
            status.output_uri_prefix.as_deref().unwrap_or("-")
        );

        let collections = status.collection_ids.clone().unwrap_or_default();
        if collections.is_empty() {
            println!("  Collections: -");
        } else {
            println!("  Collections:");
            for id in &collections {
                match status.output_uri_prefix.as_deref() {
                    Some(prefix) => println!("    {id}  {}", metadata_uri(prefix, id)),
                    None => println!("    {id}"),
                }
            }
        }

        if self.raw {
            println!();
            println!("{}", serde_json::to_string_pretty(&status.raw)?);
        }

        println!();
        Ok(EXIT_OK)
    }
}
