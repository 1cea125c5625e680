//! Import dispatcher
//!
//! Fans a completed export out into one BigQuery load job per collection.
//! Submissions are independent: one failing never stops the others.

use crate::adapters::traits::LoadJobSubmitter;
use crate::config::ExporterConfig;
use crate::core::summary::{ImportFailure, ImportSummary, SubmittedLoadJob};
use crate::domain::{CollectionId, ImportTask, JobName, LoadJobSpec};
use crate::log_import_failure;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

/// Issues load jobs for exported collections
#[derive(Clone)]
pub struct ImportDispatcher {
    submitter: Arc<dyn LoadJobSubmitter>,
    project_id: String,
    dataset: String,
    max_concurrency: usize,
}

impl ImportDispatcher {
    pub fn new(
        submitter: Arc<dyn LoadJobSubmitter>,
        project_id: impl Into<String>,
        dataset: impl Into<String>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            submitter,
            project_id: project_id.into(),
            dataset: dataset.into(),
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Dispatcher targeting the configured project and dataset
    pub fn from_config(submitter: Arc<dyn LoadJobSubmitter>, config: &ExporterConfig) -> Self {
        Self::new(
            submitter,
            config.gcp.project_id.clone(),
            config.bigquery.dataset.clone(),
            config.import.max_concurrency,
        )
    }

    /// Submits one load job per collection
    ///
    /// At most `max_concurrency` submissions are in flight. Results are
    /// recorded in input order regardless of completion order.
    pub async fn dispatch(
        &self,
        job_name: &JobName,
        collection_ids: &[CollectionId],
        output_uri_prefix: &str,
    ) -> ImportSummary {
        let start = Instant::now();

        let tasks: Vec<ImportTask> = collection_ids
            .iter()
            .cloned()
            .map(|id| ImportTask::new(id, output_uri_prefix))
            .collect();

        tracing::info!(
            job_name = %job_name,
            collections = tasks.len(),
            output_uri_prefix = %output_uri_prefix,
            "Dispatching load jobs"
        );

        let results = stream::iter(tasks)
            .map(|task| async move {
                let spec = LoadJobSpec::for_task(&task, &self.project_id, &self.dataset);
                let result = self.submitter.submit_load_job(&spec).await;
                (task, result)
            })
            .buffered(self.max_concurrency)
            .collect::<Vec<_>>()
            .await;

        let mut summary = ImportSummary::new(job_name.clone());
        for (task, result) in results {
            match result {
                Ok(receipt) => {
                    tracing::info!(
                        job_name = %job_name,
                        collection_id = %task.collection_id,
                        table = %receipt.table,
                        load_job_id = %receipt.job_id,
                        "Load job submitted"
                    );
                    summary.add_success(SubmittedLoadJob {
                        collection_id: task.collection_id,
                        table: receipt.table,
                        job_id: receipt.job_id,
                    });
                }
                Err(e) => {
                    log_import_failure!(job_name, task.collection_id, e);
                    summary.add_failure(ImportFailure {
                        rejected: e.is_upstream_rejection(),
                        error: e.to_string(),
                        collection_id: task.collection_id,
                        source_uri: task.source_metadata_uri,
                    });
                }
            }
        }

        summary.with_duration(start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::traits::LoadJobReceipt;
    use crate::domain::{ExporterError, Result, Service, UpstreamError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSubmitter {
        specs: Mutex<Vec<LoadJobSpec>>,
        reject: Vec<String>,
    }

    #[async_trait]
    impl LoadJobSubmitter for RecordingSubmitter {
        async fn submit_load_job(&self, spec: &LoadJobSpec) -> Result<LoadJobReceipt> {
            self.specs.lock().unwrap().push(spec.clone());
            if self.reject.contains(&spec.table_id) {
                return Err(ExporterError::upstream(
                    Service::BigQuery,
                    UpstreamError::Rejected {
                        status: 403,
                        body: "denied".to_string(),
                    },
                ));
            }
            Ok(LoadJobReceipt {
                job_id: format!("job_{}", spec.table_id),
                table: spec.table_path(),
                state: Some("RUNNING".to_string()),
            })
        }
    }

    fn ids(names: &[&str]) -> Vec<CollectionId> {
        names.iter().map(|n| CollectionId::new(*n).unwrap()).collect()
    }

    fn job() -> JobName {
        JobName::new("ops/123").unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_one_job_per_collection() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let dispatcher = ImportDispatcher::new(submitter.clone(), "proj", "ds", 2);

        let summary = dispatcher
            .dispatch(&job(), &ids(&["a", "b", "c"]), "gs://bucket/2024")
            .await;

        assert!(summary.is_successful());
        assert_eq!(summary.total, 3);
        let tables: Vec<&str> = summary.succeeded.iter().map(|s| s.table.as_str()).collect();
        assert_eq!(tables, vec!["proj.ds.a", "proj.ds.b", "proj.ds.c"]);

        let specs = submitter.specs.lock().unwrap();
        assert_eq!(specs.len(), 3);
        assert!(specs.iter().all(|s| s.source_uri.starts_with("gs://bucket/2024/")));
    }

    #[tokio::test]
    async fn test_dispatch_continues_after_failure() {
        let submitter = Arc::new(RecordingSubmitter {
            reject: vec!["b".to_string()],
            ..Default::default()
        });
        let dispatcher = ImportDispatcher::new(submitter.clone(), "proj", "ds", 1);

        let summary = dispatcher
            .dispatch(&job(), &ids(&["a", "b", "c"]), "gs://bucket")
            .await;

        assert_eq!(submitter.specs.lock().unwrap().len(), 3);
        assert_eq!(summary.succeeded.len(), 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].collection_id.as_str(), "b");
        assert!(summary.failures[0].rejected);
        assert!(summary.failures[0].error.contains("denied"));
    }

    #[tokio::test]
    async fn test_dispatch_empty_collection_list() {
        let submitter = Arc::new(RecordingSubmitter::default());
        let dispatcher = ImportDispatcher::new(submitter.clone(), "proj", "ds", 4);

        let summary = dispatcher.dispatch(&job(), &[], "gs://bucket").await;

        assert_eq!(summary.total, 0);
        assert!(submitter.specs.lock().unwrap().is_empty());
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        let dispatcher =
            ImportDispatcher::new(Arc::new(RecordingSubmitter::default()), "proj", "ds", 0);
        assert_eq!(dispatcher.max_concurrency, 1);
    }
}
