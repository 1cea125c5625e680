//! Export request and job types

use super::ids::{CollectionId, JobName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a Firestore `exportDocuments` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Collections to export
    pub collection_ids: Vec<CollectionId>,

    /// Destination, `gs://<bucket>`
    pub output_uri_prefix: String,
}

impl ExportRequest {
    /// Builds a request targeting the root of the given bucket
    pub fn new(collection_ids: Vec<CollectionId>, bucket: &str) -> Self {
        Self {
            collection_ids,
            output_uri_prefix: bucket_uri(bucket),
        }
    }
}

/// `gs://` URI of a bucket root
pub fn bucket_uri(bucket: &str) -> String {
    format!("gs://{}", bucket.trim_start_matches("gs://").trim_end_matches('/'))
}

/// A started export
///
/// Read-only once created. Only the job name travels onwards, inside
/// [`PollMessage`](super::message::PollMessage)s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    /// Handle returned by the export API, verbatim
    pub job_name: JobName,

    /// Requested collections
    pub collection_ids: Vec<CollectionId>,

    /// Requested output prefix
    pub output_uri_prefix: String,

    /// When the export API accepted the request
    pub started_at: DateTime<Utc>,
}
