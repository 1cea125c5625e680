//! Firestore REST API models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Long-running operation resource
///
/// Returned by `exportDocuments`. Status reads are handed to the poller as
/// raw JSON instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Fully qualified operation handle
    #[serde(default)]
    pub name: Option<String>,

    /// Error status when the export failed on submission
    #[serde(default)]
    pub error: Option<Value>,
}
