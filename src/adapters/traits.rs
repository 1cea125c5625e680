//! Seams between the pipeline and the Google Cloud services
//!
//! The pipeline components only ever see these traits. Real clients,
//! dry-run stand-ins and test fakes all plug in behind them.

use crate::domain::{ExportRequest, JobName, LoadJobSpec, PollMessage, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Outcome of a successful load job submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadJobReceipt {
    /// BigQuery job id
    pub job_id: String,

    /// Destination as `project.dataset.table`
    pub table: String,

    /// Job state reported at insertion time (usually `PENDING` or `RUNNING`)
    pub state: Option<String>,
}

/// Firestore managed export API
#[async_trait]
pub trait ExportOperations: Send + Sync {
    /// Starts an export and returns the operation handle verbatim
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the API rejects the request or cannot
    /// be reached.
    async fn start_export(&self, request: &ExportRequest) -> Result<JobName>;

    /// Reads the current long-running operation resource
    ///
    /// The raw JSON is returned so the caller decides what counts as
    /// malformed.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the status cannot be fetched.
    async fn get_operation(&self, job_name: &JobName) -> Result<Value>;
}

/// Publisher for the status-check topic
#[async_trait]
pub trait PollPublisher: Send + Sync {
    /// Publishes one poll message and returns the message id
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the publish is rejected.
    async fn publish(&self, message: &PollMessage) -> Result<String>;
}

/// BigQuery load job submission
#[async_trait]
pub trait LoadJobSubmitter: Send + Sync {
    /// Submits one load job without waiting for it to finish
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the job is rejected at submission.
    async fn submit_load_job(&self, spec: &LoadJobSpec) -> Result<LoadJobReceipt>;
}
