//! Export initiator
//!
//! Starts a Firestore export and seeds the polling chain with the first
//! [`PollMessage`].

use crate::adapters::traits::{ExportOperations, PollPublisher};
use crate::domain::{CollectionId, ExportJob, ExportRequest, ExporterError, PollMessage, Result};
use chrono::Utc;
use std::sync::Arc;

/// Starts exports into the configured bucket
#[derive(Clone)]
pub struct ExportInitiator {
    exporter: Arc<dyn ExportOperations>,
    publisher: Arc<dyn PollPublisher>,
    bucket: String,
}

impl ExportInitiator {
    pub fn new(
        exporter: Arc<dyn ExportOperations>,
        publisher: Arc<dyn PollPublisher>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            exporter,
            publisher,
            bucket: bucket.into(),
        }
    }

    /// Starts an export of `collection_ids` and enqueues the first poll
    ///
    /// The job name is returned exactly as the API produced it. If the
    /// export is rejected nothing is published.
    ///
    /// # Errors
    ///
    /// - [`ExporterError::Validation`] if `collection_ids` is empty
    /// - [`ExporterError::Upstream`] if the export or the publish fails
    pub async fn start_export(&self, collection_ids: Vec<CollectionId>) -> Result<ExportJob> {
        if collection_ids.is_empty() {
            return Err(ExporterError::Validation(
                "at least one collection id is required".to_string(),
            ));
        }

        let request = ExportRequest::new(collection_ids, &self.bucket);
        let collections: Vec<&str> = request.collection_ids.iter().map(|c| c.as_str()).collect();
        tracing::info!(
            collection_ids = ?collections,
            output_uri_prefix = %request.output_uri_prefix,
            "Starting Firestore export"
        );

        let job_name = self.exporter.start_export(&request).await?;
        tracing::info!(job_name = %job_name, "Export started");

        let message = PollMessage::new(job_name.clone());
        match self.publisher.publish(&message).await {
            Ok(message_id) => {
                tracing::info!(
                    job_name = %job_name,
                    message_id = %message_id,
                    "First status poll enqueued"
                );
            }
            Err(e) => {
                // The export keeps running upstream; only the poll chain is lost.
                tracing::error!(
                    job_name = %job_name,
                    error = %e,
                    "Export started but the first status poll could not be enqueued"
                );
                return Err(e);
            }
        }

        Ok(ExportJob {
            job_name,
            collection_ids: request.collection_ids,
            output_uri_prefix: request.output_uri_prefix,
            started_at: Utc::now(),
        })
    }
}
