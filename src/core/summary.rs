//! Import summary and reporting
//!
//! Tracks the outcome of every load job submission for one completed export.

use crate::domain::{CollectionId, ExporterError, JobName, Result};
use std::time::Duration;

/// A load job accepted by the warehouse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedLoadJob {
    /// Collection being loaded
    pub collection_id: CollectionId,

    /// Destination as `project.dataset.table`
    pub table: String,

    /// BigQuery job id
    pub job_id: String,
}

/// A load job that could not be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    /// Collection that was not loaded
    pub collection_id: CollectionId,

    /// Source metadata file, for manual replay
    pub source_uri: String,

    /// Error message, including any upstream response body
    pub error: String,

    /// Whether the warehouse answered with a rejection (vs. never reached)
    pub rejected: bool,
}

/// Summary of the imports dispatched for one export
#[derive(Debug, Clone)]
pub struct ImportSummary {
    /// Export the imports belong to
    pub job_name: JobName,

    /// Number of collections dispatched
    pub total: usize,

    /// Accepted submissions, in input order
    pub succeeded: Vec<SubmittedLoadJob>,

    /// Failed submissions, in input order
    pub failures: Vec<ImportFailure>,

    /// Time spent submitting
    pub duration: Duration,
}

impl ImportSummary {
    /// Create a new empty summary
    pub fn new(job_name: JobName) -> Self {
        Self {
            job_name,
            total: 0,
            succeeded: Vec::new(),
            failures: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record an accepted submission
    pub fn add_success(&mut self, job: SubmittedLoadJob) {
        self.total += 1;
        self.succeeded.push(job);
    }

    /// Record a failed submission
    pub fn add_failure(&mut self, failure: ImportFailure) {
        self.total += 1;
        self.failures.push(failure);
    }

    /// True when every submission was accepted
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            job_name = %self.job_name,
            total = self.total,
            submitted = self.succeeded.len(),
            failed = self.failures.len(),
            duration_ms = self.duration.as_millis() as u64,
            "Import dispatch completed"
        );

        for failure in &self.failures {
            tracing::error!(
                job_name = %self.job_name,
                collection_id = %failure.collection_id,
                source_uri = %failure.source_uri,
                rejected = failure.rejected,
                error = %failure.error,
                "Collection not imported"
            );
        }
    }

    /// Converts a partial failure into [`ExporterError::PartialImportFailure`]
    pub fn into_result(self) -> Result<Self> {
        if self.is_successful() {
            Ok(self)
        } else {
            Err(ExporterError::PartialImportFailure {
                job_name: self.job_name.to_string(),
                failed: self.failures.len(),
                total: self.total,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> JobName {
        JobName::new("ops/123").unwrap()
    }

    fn success(id: &str) -> SubmittedLoadJob {
        SubmittedLoadJob {
            collection_id: CollectionId::new(id).unwrap(),
            table: format!("proj.ds.{id}"),
            job_id: format!("job_{id}"),
        }
    }

    fn failure(id: &str) -> ImportFailure {
        ImportFailure {
            collection_id: CollectionId::new(id).unwrap(),
            source_uri: format!("gs://b/all_namespaces/kind_{id}/all_namespaces_kind_{id}.export_metadata"),
            error: "quota exceeded".to_string(),
            rejected: true,
        }
    }

    #[test]
    fn test_empty_summary_is_successful() {
        let summary = ImportSummary::new(job());
        assert_eq!(summary.total, 0);
        assert!(summary.is_successful());
        assert!(summary.into_result().is_ok());
    }

    #[test]
    fn test_partial_failure() {
        let mut summary = ImportSummary::new(job());
        summary.add_success(success("users"));
        summary.add_failure(failure("orders"));
        summary.add_success(success("events"));

        assert_eq!(summary.total, 3);
        assert!(!summary.is_successful());
        assert_eq!(summary.failures[0].collection_id.as_str(), "orders");

        let err = summary.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Import partially failed for ops/123: 1/3 load jobs rejected"
        );
    }

    #[test]
    fn test_with_duration() {
        let summary = ImportSummary::new(job()).with_duration(Duration::from_millis(250));
        assert_eq!(summary.duration, Duration::from_millis(250));
        summary.log_summary();
    }
}
