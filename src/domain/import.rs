//! Per-collection import tasks and BigQuery load job specification

use super::ids::CollectionId;
use serde::{Deserialize, Serialize};

/// Location of the export metadata file for one collection
///
/// The layout is dictated by the Firestore managed export format and must
/// match what the BigQuery datastore-backup loader expects byte for byte.
///
/// ```
/// use firestore_bq_export::domain::import::metadata_uri;
/// use firestore_bq_export::domain::ids::CollectionId;
///
/// let users = CollectionId::new("users").unwrap();
/// assert_eq!(
///     metadata_uri("gs://bucket/2024", &users),
///     "gs://bucket/2024/all_namespaces/kind_users/all_namespaces_kind_users.export_metadata"
/// );
/// ```
pub fn metadata_uri(output_uri_prefix: &str, collection_id: &CollectionId) -> String {
    format!(
        "{output_uri_prefix}/all_namespaces/kind_{collection_id}/all_namespaces_kind_{collection_id}.export_metadata"
    )
}

/// One collection to load after a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTask {
    /// Exported collection
    pub collection_id: CollectionId,

    /// `.export_metadata` file to load from
    pub source_metadata_uri: String,

    /// Destination table, always the collection id
    pub target_table_name: String,
}

impl ImportTask {
    /// Derives the task for a collection from the export output prefix
    pub fn new(collection_id: CollectionId, output_uri_prefix: &str) -> Self {
        let source_metadata_uri = metadata_uri(output_uri_prefix, &collection_id);
        let target_table_name = collection_id.as_str().to_string();
        Self {
            collection_id,
            source_metadata_uri,
            target_table_name,
        }
    }
}

/// Table creation behaviour of a load job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreateDisposition {
    CreateIfNeeded,
    CreateNever,
}

/// Write behaviour of a load job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteDisposition {
    WriteTruncate,
    WriteAppend,
    WriteEmpty,
}

/// Source file format of a load job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceFormat {
    DatastoreBackup,
}

/// Fully resolved BigQuery load job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadJobSpec {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
    pub source_uri: String,
    pub create_disposition: CreateDisposition,
    pub write_disposition: WriteDisposition,
    pub source_format: SourceFormat,
}

impl LoadJobSpec {
    /// Load job replacing `project.dataset.<collection>` with the export contents
    pub fn for_task(task: &ImportTask, project_id: &str, dataset_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            dataset_id: dataset_id.to_string(),
            table_id: task.target_table_name.clone(),
            source_uri: task.source_metadata_uri.clone(),
            create_disposition: CreateDisposition::CreateIfNeeded,
            write_disposition: WriteDisposition::WriteTruncate,
            source_format: SourceFormat::DatastoreBackup,
        }
    }

    /// `project.dataset.table`
    pub fn table_path(&self) -> String {
        format!("{}.{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_task_derivation() {
        let task = ImportTask::new(CollectionId::new("orders").unwrap(), "gs://bucket/2024");
        assert_eq!(task.target_table_name, "orders");
        assert_eq!(
            task.source_metadata_uri,
            "gs://bucket/2024/all_namespaces/kind_orders/all_namespaces_kind_orders.export_metadata"
        );
    }

    #[test]
    fn test_metadata_uri_uses_id_verbatim() {
        let id = CollectionId::verbatim(" users").unwrap();
        assert_eq!(
            metadata_uri("gs://b", &id),
            "gs://b/all_namespaces/kind_ users/all_namespaces_kind_ users.export_metadata"
        );
    }

    #[test]
    fn test_load_job_spec_dispositions() {
        let task = ImportTask::new(CollectionId::new("users").unwrap(), "gs://b");
        let spec = LoadJobSpec::for_task(&task, "proj", "analytics");
        assert_eq!(spec.create_disposition, CreateDisposition::CreateIfNeeded);
        assert_eq!(spec.write_disposition, WriteDisposition::WriteTruncate);
        assert_eq!(spec.source_format, SourceFormat::DatastoreBackup);
        assert_eq!(spec.table_path(), "proj.analytics.users");
    }

    #[test]
    fn test_disposition_wire_names() {
        assert_eq!(
            serde_json::to_string(&CreateDisposition::CreateIfNeeded).unwrap(),
            "\"CREATE_IF_NEEDED\""
        );
        assert_eq!(
            serde_json::to_string(&WriteDisposition::WriteTruncate).unwrap(),
            "\"WRITE_TRUNCATE\""
        );
        assert_eq!(
            serde_json::to_string(&SourceFormat::DatastoreBackup).unwrap(),
            "\"DATASTORE_BACKUP\""
        );
    }
}
