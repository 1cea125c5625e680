//! Pub/Sub REST API models

use serde::{Deserialize, Serialize};

/// Body of `topics/{topic}:publish`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub messages: Vec<OutgoingMessage>,
}

/// Message to publish; `data` is already base64
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub data: String,
}

/// Publish response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    #[serde(default)]
    pub message_ids: Vec<String>,
}

impl PublishRequest {
    /// Request carrying a single base64 payload
    pub fn single(data: String) -> Self {
        Self {
            messages: vec![OutgoingMessage { data }],
        }
    }
}
