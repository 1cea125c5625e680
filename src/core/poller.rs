//! Status poller
//!
//! One invocation per queue delivery. The wait between polls is a delayed
//! republish of the [`PollMessage`], so no process is held while the export
//! runs.

use crate::adapters::traits::{ExportOperations, PollPublisher};
use crate::config::PollerConfig;
use crate::core::dispatcher::ImportDispatcher;
use crate::core::summary::ImportSummary;
use crate::domain::{ExporterError, OperationState, OperationStatus, PollMessage, Result};
use crate::log_poll_requeued;
use std::sync::Arc;
use std::time::Duration;

/// What a single poll did
#[derive(Debug)]
pub enum PollOutcome {
    /// Export still running; a successor message was published
    Requeued { attempt: u32 },

    /// Export succeeded; load jobs were dispatched
    Imported(ImportSummary),

    /// Export ended in a state other than SUCCESSFUL
    OperationFailed { state: OperationState },

    /// Polling budget exhausted while the export was still running
    TimedOut { polls: u32 },
}

impl PollOutcome {
    /// True when the chain ended badly or some imports failed
    pub fn is_failure(&self) -> bool {
        match self {
            PollOutcome::Requeued { .. } => false,
            PollOutcome::Imported(summary) => !summary.is_successful(),
            PollOutcome::OperationFailed { .. } | PollOutcome::TimedOut { .. } => true,
        }
    }
}

/// Drives one step of the export state machine
#[derive(Clone)]
pub struct StatusPoller {
    exporter: Arc<dyn ExportOperations>,
    publisher: Arc<dyn PollPublisher>,
    dispatcher: ImportDispatcher,
    interval: Duration,
    max_polls: u32,
}

impl StatusPoller {
    pub fn new(
        exporter: Arc<dyn ExportOperations>,
        publisher: Arc<dyn PollPublisher>,
        dispatcher: ImportDispatcher,
        config: &PollerConfig,
    ) -> Self {
        Self {
            exporter,
            publisher,
            dispatcher,
            interval: config.interval(),
            max_polls: config.max_polls,
        }
    }

    /// Reads the current status snapshot without acting on it
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the read fails, or
    /// [`ExporterError::MalformedStatus`] if the response lacks a state.
    pub async fn fetch_status(&self, message: &PollMessage) -> Result<OperationStatus> {
        let raw = self
            .exporter
            .get_operation(&message.name)
            .await
            .map_err(|e| {
                tracing::error!(
                    job_name = %message.name,
                    attempt = message.attempt,
                    error = %e,
                    "Export status could not be read"
                );
                e
            })?;
        OperationStatus::from_response(message.name.clone(), raw.clone()).map_err(|e| {
            tracing::error!(
                job_name = %message.name,
                payload = %raw,
                error = %e,
                "Malformed export status"
            );
            e
        })
    }

    /// Polls the export once and acts on its state
    ///
    /// - `PROCESSING`: sleeps for the poll interval and publishes exactly one
    ///   successor message, unless the poll budget is spent
    /// - `SUCCESSFUL`: dispatches one load job per exported collection
    /// - anything else: logs the full status and stops
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be read or is malformed, or if
    /// the successor message cannot be published.
    pub async fn check_status(&self, message: &PollMessage) -> Result<PollOutcome> {
        let status = self.fetch_status(message).await?;
        let job_name = &message.name;

        tracing::debug!(
            job_name = %job_name,
            state = %status.state,
            attempt = message.attempt,
            "Export status fetched"
        );

        match status.state {
            OperationState::Processing => {
                let polls = message.attempt.saturating_add(1);
                if polls >= self.max_polls {
                    tracing::error!(
                        job_name = %job_name,
                        polls = polls,
                        max_polls = self.max_polls,
                        payload = %status.raw,
                        "Export still processing after the maximum number of polls, giving up"
                    );
                    return Ok(PollOutcome::TimedOut { polls });
                }

                tokio::time::sleep(self.interval).await;

                let next = message.next();
                let message_id = match self.publisher.publish(&next).await {
                    Ok(id) => id,
                    Err(e) => {
                        // Ends the polling chain
                        tracing::error!(
                            job_name = %job_name,
                            attempt = next.attempt,
                            error = %e,
                            "Export still processing but the next poll could not be enqueued"
                        );
                        return Err(e);
                    }
                };
                log_poll_requeued!(job_name, next.attempt, self.interval);
                tracing::debug!(job_name = %job_name, message_id = %message_id, "Successor published");

                Ok(PollOutcome::Requeued {
                    attempt: next.attempt,
                })
            }
            OperationState::Successful => {
                let output_uri_prefix = status.output_uri_prefix.as_deref().ok_or_else(|| {
                    tracing::error!(
                        job_name = %job_name,
                        payload = %status.raw,
                        "Successful export has no output prefix"
                    );
                    ExporterError::MalformedStatus {
                        job_name: job_name.to_string(),
                        reason: "missing metadata.outputUriPrefix".to_string(),
                    }
                })?;
                let collection_ids = status.collection_ids.clone().unwrap_or_default();

                if collection_ids.is_empty() {
                    tracing::warn!(
                        job_name = %job_name,
                        payload = %status.raw,
                        "Export succeeded without any collection ids, nothing to import"
                    );
                } else {
                    tracing::info!(
                        job_name = %job_name,
                        collections = collection_ids.len(),
                        "Export succeeded"
                    );
                }

                let summary = self
                    .dispatcher
                    .dispatch(job_name, &collection_ids, output_uri_prefix)
                    .await;
                summary.log_summary();

                Ok(PollOutcome::Imported(summary))
            }
            OperationState::Other(_) => {
                tracing::error!(
                    job_name = %job_name,
                    state = %status.state,
                    payload = %status.raw,
                    "Export operation failed"
                );
                Ok(PollOutcome::OperationFailed {
                    state: status.state,
                })
            }
        }
    }
}
