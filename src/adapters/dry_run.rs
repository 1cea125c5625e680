//! Dry-run stand-ins for the write paths
//!
//! In dry-run mode nothing is started, published or loaded. Each call is
//! logged with what would have been sent and answered with a synthetic
//! result so the rest of the pipeline runs unchanged.
//!
//! A synthetic job name carries its collections as trailing path segments,
//! `dry-run/operations/<id>/users/orders`, so any later invocation can answer
//! its status without shared state. Collection ids never contain `/`. Status
//! reads for real job names still go to the real API.

use crate::adapters::traits::{ExportOperations, LoadJobReceipt, LoadJobSubmitter, PollPublisher};
use crate::domain::export::bucket_uri;
use crate::domain::{ExportRequest, ExporterError, JobName, LoadJobSpec, PollMessage, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Prefix of synthetic job names handed out in dry-run mode
pub const DRY_RUN_JOB_PREFIX: &str = "dry-run/operations/";

/// Output directory prefix reported for synthetic jobs
const DRY_RUN_OUTPUT_DIR: &str = "dry-run-";

/// Export API that only logs export requests
pub struct DryRunExporter {
    inner: Arc<dyn ExportOperations>,
    bucket_uri: String,
}

impl DryRunExporter {
    pub fn new(inner: Arc<dyn ExportOperations>, bucket: &str) -> Self {
        Self {
            inner,
            bucket_uri: bucket_uri(bucket),
        }
    }

    /// Completed status for a synthetic job, or `None` for a real one
    fn synthetic_status(&self, job_name: &JobName) -> Option<Value> {
        let rest = job_name.as_str().strip_prefix(DRY_RUN_JOB_PREFIX)?;
        let mut segments = rest.split('/');
        let id = segments.next().filter(|id| !id.is_empty())?;
        let collection_ids: Vec<&str> = segments.collect();

        Some(json!({
            "name": job_name.as_str(),
            "done": true,
            "metadata": {
                "operationState": "SUCCESSFUL",
                "collectionIds": collection_ids,
                "outputUriPrefix": format!("{}/{DRY_RUN_OUTPUT_DIR}{id}", self.bucket_uri),
            }
        }))
    }
}

#[async_trait]
impl ExportOperations for DryRunExporter {
    async fn start_export(&self, request: &ExportRequest) -> Result<JobName> {
        let collections: Vec<&str> = request.collection_ids.iter().map(|c| c.as_str()).collect();
        tracing::info!(
            collection_ids = ?collections,
            output_uri_prefix = %request.output_uri_prefix,
            "[dry-run] Would start Firestore export"
        );

        let mut name = format!("{DRY_RUN_JOB_PREFIX}{}", uuid::Uuid::new_v4().simple());
        for id in &request.collection_ids {
            name.push('/');
            name.push_str(id.as_str());
        }
        JobName::new(name).map_err(ExporterError::Validation)
    }

    async fn get_operation(&self, job_name: &JobName) -> Result<Value> {
        if let Some(status) = self.synthetic_status(job_name) {
            tracing::info!(job_name = %job_name, "[dry-run] Answering status for synthetic export");
            return Ok(status);
        }
        self.inner.get_operation(job_name).await
    }
}

/// Publisher that only logs messages
#[derive(Default)]
pub struct DryRunPublisher;

#[async_trait]
impl PollPublisher for DryRunPublisher {
    async fn publish(&self, message: &PollMessage) -> Result<String> {
        tracing::info!(
            job_name = %message.name,
            attempt = message.attempt,
            payload = %message.to_json()?,
            "[dry-run] Would publish poll message"
        );
        Ok("dry-run".to_string())
    }
}

/// Load job submitter that only logs the jobs
#[derive(Default)]
pub struct DryRunSubmitter;

#[async_trait]
impl LoadJobSubmitter for DryRunSubmitter {
    async fn submit_load_job(&self, spec: &LoadJobSpec) -> Result<LoadJobReceipt> {
        tracing::info!(
            table = %spec.table_path(),
            source_uri = %spec.source_uri,
            "[dry-run] Would submit BigQuery load job"
        );
        Ok(LoadJobReceipt {
            job_id: "dry-run".to_string(),
            table: spec.table_path(),
            state: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CollectionId, ImportTask};

    struct UnreachableExporter;

    #[async_trait]
    impl ExportOperations for UnreachableExporter {
        async fn start_export(&self, _request: &ExportRequest) -> Result<JobName> {
            panic!("dry-run must not start a real export");
        }

        async fn get_operation(&self, _job_name: &JobName) -> Result<Value> {
            Ok(serde_json::json!({"metadata": {"operationState": "PROCESSING"}}))
        }
    }

    #[tokio::test]
    async fn test_dry_run_export_returns_synthetic_job() {
        let exporter = DryRunExporter::new(Arc::new(UnreachableExporter), "bucket");
        let request = ExportRequest::new(
            vec![
                CollectionId::new("users").unwrap(),
                CollectionId::new("orders").unwrap(),
            ],
            "bucket",
        );

        let job = exporter.start_export(&request).await.unwrap();
        assert!(job.as_str().starts_with(DRY_RUN_JOB_PREFIX));
        assert!(job.as_str().ends_with("/users/orders"));
    }

    #[tokio::test]
    async fn test_dry_run_job_status_is_answered_locally() {
        let exporter = DryRunExporter::new(Arc::new(UnreachableExporter), "gs://bucket");
        let job = JobName::new(format!("{DRY_RUN_JOB_PREFIX}abc123/users/orders")).unwrap();

        let raw = exporter.get_operation(&job).await.unwrap();

        assert_eq!(raw["metadata"]["operationState"], "SUCCESSFUL");
        assert_eq!(raw["metadata"]["collectionIds"], json!(["users", "orders"]));
        assert_eq!(raw["metadata"]["outputUriPrefix"], "gs://bucket/dry-run-abc123");
    }

    #[tokio::test]
    async fn test_dry_run_status_reads_pass_through() {
        let exporter = DryRunExporter::new(Arc::new(UnreachableExporter), "bucket");
        let raw = exporter
            .get_operation(&JobName::new("ops/1").unwrap())
            .await
            .unwrap();
        assert_eq!(raw["metadata"]["operationState"], "PROCESSING");
    }

    #[tokio::test]
    async fn test_dry_run_submitter() {
        let task = ImportTask::new(CollectionId::new("users").unwrap(), "gs://b/1");
        let spec = LoadJobSpec::for_task(&task, "proj", "ds");

        let receipt = DryRunSubmitter.submit_load_job(&spec).await.unwrap();
        assert_eq!(receipt.job_id, "dry-run");
        assert_eq!(receipt.table, "proj.ds.users");
    }
}
