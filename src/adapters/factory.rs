//! Adapter factory
//!
//! Builds the three service clients once per process from configuration.
//! Components receive them as shared trait objects.

use crate::adapters::bigquery::BigQueryClient;
use crate::adapters::dry_run::{DryRunExporter, DryRunPublisher, DryRunSubmitter};
use crate::adapters::firestore::FirestoreClient;
use crate::adapters::pubsub::PubSubPublisher;
use crate::adapters::traits::{ExportOperations, LoadJobSubmitter, PollPublisher};
use crate::config::ExporterConfig;
use crate::domain::Result;
use std::sync::Arc;

/// Shared handles to the Google Cloud services
#[derive(Clone)]
pub struct Adapters {
    pub exporter: Arc<dyn ExportOperations>,
    pub publisher: Arc<dyn PollPublisher>,
    pub submitter: Arc<dyn LoadJobSubmitter>,
}

/// Create the service clients based on the configuration
///
/// When `application.dry_run` is set, the write paths are replaced by
/// logging stand-ins. Status reads for dry-run jobs are answered locally;
/// any other job is read from the real Firestore client.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be created
pub fn create_adapters(config: &ExporterConfig) -> Result<Adapters> {
    let firestore: Arc<dyn ExportOperations> = Arc::new(FirestoreClient::new(&config.gcp)?);

    if config.application.dry_run {
        tracing::warn!("Dry-run mode: no exports, publishes or load jobs will be issued");
        return Ok(Adapters {
            exporter: Arc::new(DryRunExporter::new(firestore, &config.gcp.bucket)),
            publisher: Arc::new(DryRunPublisher),
            submitter: Arc::new(DryRunSubmitter),
        });
    }

    tracing::debug!(
        project_id = %config.gcp.project_id,
        topic = %config.pubsub.status_topic,
        dataset = %config.bigquery.dataset,
        "Creating Google Cloud clients"
    );

    Ok(Adapters {
        exporter: firestore,
        publisher: Arc::new(PubSubPublisher::new(&config.gcp, &config.pubsub)?),
        submitter: Arc::new(BigQueryClient::new(&config.gcp, &config.bigquery)?),
    })
}
