//! Check-status command implementation
//!
//! Runs one step of the polling state machine, either for a raw Pub/Sub
//! event or for a job name given directly.

use crate::adapters::create_adapters;
use crate::cli::{exit_code_for, EXIT_MALFORMED, EXIT_OK, EXIT_PIPELINE_FAILURE, EXIT_UPSTREAM};
use crate::config::ExporterConfig;
use crate::core::{EventOutcome, Pipeline, PollOutcome};
use crate::domain::{JobName, PollMessage, PubSubEvent, Result};
use clap::{ArgGroup, Args};

/// Arguments for the check-status command
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["event", "job_name"])))]
pub struct CheckStatusArgs {
    /// Pub/Sub event JSON, e.g. `{"data": "eyJuYW1lIjoi..."}`
    #[arg(long)]
    pub event: Option<String>,

    /// Job name to poll, bypassing the queue payload
    #[arg(long)]
    pub job_name: Option<String>,

    /// Polls already performed (ignored with --event)
    #[arg(long, default_value_t = 0)]
    pub attempt: u32,
}

impl CheckStatusArgs {
    /// Builds the event to handle from the arguments
    ///
    /// A raw `--event` is parsed as-is; decoding problems surface later as a
    /// dropped message, like a real delivery.
    pub fn to_event(&self) -> Result<PubSubEvent> {
        if let Some(raw) = &self.event {
            return PubSubEvent::from_json(raw);
        }

        let name = self.job_name.clone().unwrap_or_default();
        let name = JobName::new(name).map_err(crate::domain::ExporterError::Validation)?;
        let message = PollMessage {
            name,
            attempt: self.attempt,
        };
        Ok(PubSubEvent::from_data(message.to_base64()?))
    }

    /// Execute the check-status command
    pub async fn execute(&self, config: &ExporterConfig) -> anyhow::Result<i32> {
        let event = match self.to_event() {
            Ok(e) => e,
            Err(e) => {
                println!("❌ Invalid status-check input");
                println!("   Error: {e}");
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

        let outcome = match pipeline.handle_status_event(&event).await {
            Ok(o) => o,
            Err(e) => {
                tracing::error!(error = %e, "Status check failed");
                println!("❌ Status check failed");
                println!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let code = match outcome {
            EventOutcome::Dropped { reason } => {
                println!("⚠️  Message dropped: {reason}");
                EXIT_MALFORMED
            }
            EventOutcome::Polled(PollOutcome::Requeued { attempt }) => {
                println!("🔄 Export still processing, poll {attempt} requeued");
                EXIT_OK
            }
            EventOutcome::Polled(PollOutcome::Imported(summary)) => {
                println!("✅ Export succeeded");
                for job in &summary.succeeded {
                    println!("   {} -> {} ({})", job.collection_id, job.table, job.job_id);
                }
                for failure in &summary.failures {
                    println!("   ❌ {}: {}", failure.collection_id, failure.error);
                }
                match summary.into_result() {
                    Ok(_) => EXIT_OK,
                    Err(e) => {
                        println!("❌ {e}");
                        EXIT_PIPELINE_FAILURE
                    }
                }
            }
            EventOutcome::Polled(PollOutcome::OperationFailed { state }) => {
                println!("❌ Export ended in state {state}");
                EXIT_PIPELINE_FAILURE
            }
            EventOutcome::Polled(PollOutcome::TimedOut { polls }) => {
                println!("❌ Export still running after {polls} polls, giving up");
                EXIT_PIPELINE_FAILURE
            }
        };

        Ok(code)
    }
}
