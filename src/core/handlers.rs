//! Invocation entrypoints
//!
//! [`Pipeline`] bundles the components built once at process start. Each
//! `handle_*` call is one independent invocation and runs inside its own
//! span carrying a fresh invocation id.

use crate::adapters::Adapters;
use crate::config::ExporterConfig;
use crate::core::dispatcher::ImportDispatcher;
use crate::core::initiator::ExportInitiator;
use crate::core::poller::{PollOutcome, StatusPoller};
use crate::domain::{CollectionId, ExportJob, ExporterError, PubSubEvent, Result};
use tracing::Instrument;

/// Body returned by the trigger for a missing or empty parameter
pub const NO_COLLECTION_IDS: &str = "no collection_ids";

/// Response of the export trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerResponse {
    /// Export started and first poll enqueued
    Started(ExportJob),

    /// `collection_ids` absent or empty; nothing was requested
    MissingCollectionIds,
}

impl TriggerResponse {
    /// Plain-text body: `ok` or `no collection_ids`
    pub fn body(&self) -> &'static str {
        match self {
            TriggerResponse::Started(_) => "ok",
            TriggerResponse::MissingCollectionIds => NO_COLLECTION_IDS,
        }
    }
}

/// Result of handling one status-check delivery
#[derive(Debug)]
pub enum EventOutcome {
    /// Payload could not be decoded; nothing was called
    Dropped { reason: String },

    /// Payload decoded and the export polled
    Polled(PollOutcome),
}

/// Wired pipeline components
#[derive(Clone)]
pub struct Pipeline {
    initiator: ExportInitiator,
    poller: StatusPoller,
}

impl Pipeline {
    /// Wires the components from shared adapters
    pub fn new(config: &ExporterConfig, adapters: Adapters) -> Self {
        let dispatcher = ImportDispatcher::from_config(adapters.submitter, config);
        let initiator = ExportInitiator::new(
            adapters.exporter.clone(),
            adapters.publisher.clone(),
            config.gcp.bucket.clone(),
        );
        let poller = StatusPoller::new(
            adapters.exporter,
            adapters.publisher,
            dispatcher,
            &config.poller,
        );
        Self { initiator, poller }
    }

    pub fn poller(&self) -> &StatusPoller {
        &self.poller
    }

    /// Export trigger entrypoint
    ///
    /// `collection_ids` is the raw comma-separated parameter. A missing or
    /// blank value yields [`TriggerResponse::MissingCollectionIds`] without
    /// calling any API.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid collection id, or the
    /// upstream error if the export or first publish fails.
    pub async fn handle_trigger(&self, collection_ids: Option<&str>) -> Result<TriggerResponse> {
        let span = tracing::info_span!(
            "trigger",
            invocation_id = %uuid::Uuid::new_v4()
        );

        async move {
            let ids = match collection_ids {
                Some(raw) => CollectionId::parse_list(raw).map_err(ExporterError::Validation)?,
                None => Vec::new(),
            };

            if ids.is_empty() {
                tracing::warn!("Trigger called without collection_ids");
                return Ok(TriggerResponse::MissingCollectionIds);
            }

            let job = self.initiator.start_export(ids).await?;
            Ok(TriggerResponse::Started(job))
        }
        .instrument(span)
        .await
    }

    /// Status-check entrypoint, once per queue delivery
    ///
    /// Undecodable payloads are logged and dropped with no side effects so
    /// the transport does not redeliver them forever.
    ///
    /// # Errors
    ///
    /// Returns an error if the status read fails, the status is malformed, or
    /// the successor message cannot be published.
    pub async fn handle_status_event(&self, event: &PubSubEvent) -> Result<EventOutcome> {
        let span = tracing::info_span!(
            "check_status",
            invocation_id = %uuid::Uuid::new_v4(),
            message_id = event.message_id().unwrap_or("-")
        );

        async move {
            let message = match event.poll_message() {
                Ok(message) => message,
                Err(e) => {
                    tracing::error!(
                        data = %event.data(),
                        error = %e,
                        "Dropping undecodable status message"
                    );
                    return Ok(EventOutcome::Dropped {
                        reason: e.to_string(),
                    });
                }
            };

            tracing::info!(
                job_name = %message.name,
                attempt = message.attempt,
                "Checking export status"
            );

            let outcome = self.poller.check_status(&message).await?;
            Ok(EventOutcome::Polled(outcome))
        }
        .instrument(span)
        .await
    }
}
