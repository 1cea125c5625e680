//! Export operation status snapshot
//!
//! A fresh [`OperationStatus`] is fetched on every poll. Only the fields the
//! poller needs are extracted; the raw response is kept for logging.

use super::errors::ExporterError;
use super::ids::{CollectionId, JobName};
use super::result::Result;
use serde_json::Value;
use std::fmt;

/// State reported in `metadata.operationState`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState {
    /// Export still running
    Processing,
    /// Export finished and files are in Cloud Storage
    Successful,
    /// Any other value; treated as terminal failure
    Other(String),
}

impl OperationState {
    /// Parses the raw state string
    pub fn parse(raw: &str) -> Self {
        match raw {
            "PROCESSING" => OperationState::Processing,
            "SUCCESSFUL" => OperationState::Successful,
            other => OperationState::Other(other.to_string()),
        }
    }

    /// Returns the wire representation
    pub fn as_str(&self) -> &str {
        match self {
            OperationState::Processing => "PROCESSING",
            OperationState::Successful => "SUCCESSFUL",
            OperationState::Other(raw) => raw,
        }
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a Firestore export operation
#[derive(Debug, Clone)]
pub struct OperationStatus {
    /// Operation handle the snapshot was fetched for
    pub job_name: JobName,

    /// Current state
    pub state: OperationState,

    /// Collections covered by the export (`metadata.collectionIds`)
    pub collection_ids: Option<Vec<CollectionId>>,

    /// Output location echoed back by the API (`metadata.outputUriPrefix`)
    pub output_uri_prefix: Option<String>,

    /// Full response body
    pub raw: Value,
}

impl OperationStatus {
    /// Builds a snapshot from a `GET operations/{name}` response body
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::MalformedStatus`] if `metadata.operationState`
    /// is absent or not a string, or if `metadata.collectionIds` is present
    /// but not a list of valid collection ids.
    pub fn from_response(job_name: JobName, raw: Value) -> Result<Self> {
        let malformed = |reason: &str| ExporterError::MalformedStatus {
            job_name: job_name.to_string(),
            reason: reason.to_string(),
        };

        let metadata = raw
            .get("metadata")
            .ok_or_else(|| malformed("missing metadata"))?;

        let state = metadata
            .get("operationState")
            .and_then(Value::as_str)
            .map(OperationState::parse)
            .ok_or_else(|| malformed("missing metadata.operationState"))?;

        let collection_ids = match metadata.get("collectionIds") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => {
                let mut ids = Vec::with_capacity(items.len());
                for item in items {
                    let id = item
                        .as_str()
                        .ok_or_else(|| malformed("non-string entry in metadata.collectionIds"))?;
                    ids.push(CollectionId::verbatim(id).map_err(|e| malformed(&e))?);
                }
                Some(ids)
            }
            Some(_) => return Err(malformed("metadata.collectionIds is not a list")),
        };

        let output_uri_prefix = metadata
            .get("outputUriPrefix")
            .and_then(Value::as_str)
            .map(|s| s.to_string());

        Ok(Self {
            job_name,
            state,
            collection_ids,
            output_uri_prefix,
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job() -> JobName {
        JobName::new("ops/123").unwrap()
    }

    #[test]
    fn test_state_parse() {
        assert_eq!(OperationState::parse("PROCESSING"), OperationState::Processing);
        assert_eq!(OperationState::parse("SUCCESSFUL"), OperationState::Successful);
        assert_eq!(
            OperationState::parse("FAILED"),
            OperationState::Other("FAILED".to_string())
        );
        assert_eq!(OperationState::parse("processing").as_str(), "processing");
    }

    #[test]
    fn test_from_response_successful() {
        let raw = json!({
            "name": "ops/123",
            "metadata": {
                "operationState": "SUCCESSFUL",
                "collectionIds": ["users", "orders"],
                "outputUriPrefix": "gs://bucket/2024"
            },
            "done": true
        });

        let status = OperationStatus::from_response(job(), raw).unwrap();
        assert_eq!(status.state, OperationState::Successful);
        let ids: Vec<&str> = status
            .collection_ids
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.as_str())
            .collect();
        assert_eq!(ids, vec!["users", "orders"]);
        assert_eq!(status.output_uri_prefix.as_deref(), Some("gs://bucket/2024"));
    }

    #[test]
    fn test_from_response_processing_without_collections() {
        let raw = json!({"metadata": {"operationState": "PROCESSING"}});
        let status = OperationStatus::from_response(job(), raw).unwrap();
        assert_eq!(status.state, OperationState::Processing);
        assert!(status.collection_ids.is_none());
        assert!(status.output_uri_prefix.is_none());
    }

    #[test]
    fn test_missing_operation_state_is_malformed() {
        let raw = json!({"metadata": {"collectionIds": ["users"]}});
        let err = OperationStatus::from_response(job(), raw).unwrap_err();
        assert!(matches!(err, ExporterError::MalformedStatus { .. }));
        assert!(err.to_string().contains("operationState"));
    }

    #[test]
    fn test_missing_metadata_is_malformed() {
        let err = OperationStatus::from_response(job(), json!({"name": "ops/123"})).unwrap_err();
        assert!(matches!(err, ExporterError::MalformedStatus { .. }));
    }

    #[test]
    fn test_non_string_collection_is_malformed() {
        let raw = json!({"metadata": {"operationState": "SUCCESSFUL", "collectionIds": [42]}});
        let err = OperationStatus::from_response(job(), raw).unwrap_err();
        assert!(matches!(err, ExporterError::MalformedStatus { .. }));
    }

    #[test]
    fn test_collection_ids_are_taken_verbatim() {
        let raw = json!({"metadata": {
            "operationState": "SUCCESSFUL",
            "collectionIds": [" users", "orders "],
            "outputUriPrefix": "gs://bucket/2024"
        }});
        let status = OperationStatus::from_response(job(), raw).unwrap();
        let ids: Vec<&str> = status
            .collection_ids
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.as_str())
            .collect();
        assert_eq!(ids, vec![" users", "orders "]);
    }

    #[test]
    fn test_empty_collection_id_is_malformed() {
        let raw = json!({"metadata": {"operationState": "SUCCESSFUL", "collectionIds": [""]}});
        let err = OperationStatus::from_response(job(), raw).unwrap_err();
        assert!(matches!(err, ExporterError::MalformedStatus { .. }));
    }
}
