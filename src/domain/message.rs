//! Status-check queue messages
//!
//! [`PollMessage`] is the only state carried between poll invocations. It is
//! JSON-encoded and base64-wrapped by the Pub/Sub transport.

use super::errors::ExporterError;
use super::ids::JobName;
use super::result::Result;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Continuation message for the status poller
///
/// Wire format: `{"name": "<job_name>"}`. `attempt` counts the requeues so far
/// and is omitted while zero, so first-hop messages keep the plain format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollMessage {
    /// Operation handle to poll
    pub name: JobName,

    /// Number of polls already performed for this job
    #[serde(default, skip_serializing_if = "is_zero")]
    pub attempt: u32,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl PollMessage {
    /// First message of a polling chain
    pub fn new(name: JobName) -> Self {
        Self { name, attempt: 0 }
    }

    /// Successor message with the same job name and the attempt counter bumped
    pub fn next(&self) -> Self {
        Self {
            name: self.name.clone(),
            attempt: self.attempt.saturating_add(1),
        }
    }

    /// Serializes to the JSON wire format
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses the decoded JSON payload
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::MalformedMessage`] when the payload is not JSON
    /// or lacks a non-empty `name`.
    pub fn from_json(payload: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| ExporterError::MalformedMessage(format!("payload is not JSON: {e}")))?;

        let name = value
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ExporterError::MalformedMessage("missing 'name' field".to_string()))?;
        let name = JobName::new(name).map_err(ExporterError::MalformedMessage)?;

        let attempt = match value.get("attempt") {
            None | Some(Value::Null) => 0,
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| {
                    ExporterError::MalformedMessage(format!("invalid 'attempt' value: {v}"))
                })?,
        };

        Ok(Self { name, attempt })
    }

    /// Base64-encoded JSON, as placed in a Pub/Sub `data` field
    pub fn to_base64(&self) -> Result<String> {
        Ok(general_purpose::STANDARD.encode(self.to_json()?))
    }
}

/// Pub/Sub message payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubSubMessage {
    /// Base64-encoded body
    #[serde(default)]
    pub data: String,

    /// Message id assigned by Pub/Sub
    #[serde(default, rename = "messageId", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

/// Incoming Pub/Sub delivery
///
/// Accepts both the background-function shape (`{"data": "..."}`) and the
/// push-subscription envelope (`{"message": {"data": "..."}, "subscription": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PubSubEvent {
    /// Push subscription envelope
    Push {
        message: PubSubMessage,
        #[serde(default)]
        subscription: Option<String>,
    },
    /// Background function event
    Background(PubSubMessage),
}

impl PubSubEvent {
    /// Wraps raw base64 data into a background event
    pub fn from_data(data: impl Into<String>) -> Self {
        PubSubEvent::Background(PubSubMessage {
            data: data.into(),
            message_id: None,
        })
    }

    /// Parses an event from its JSON representation
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input)
            .map_err(|e| ExporterError::MalformedMessage(format!("invalid event envelope: {e}")))
    }

    /// Base64 body of the event
    pub fn data(&self) -> &str {
        match self {
            PubSubEvent::Push { message, .. } => &message.data,
            PubSubEvent::Background(message) => &message.data,
        }
    }

    /// Message id, when the transport supplied one
    pub fn message_id(&self) -> Option<&str> {
        match self {
            PubSubEvent::Push { message, .. } => message.message_id.as_deref(),
            PubSubEvent::Background(message) => message.message_id.as_deref(),
        }
    }

    /// Decodes the base64 body to text
    pub fn decoded_payload(&self) -> Result<String> {
        let bytes = general_purpose::STANDARD.decode(self.data().trim())?;
        String::from_utf8(bytes)
            .map_err(|e| ExporterError::MalformedMessage(format!("payload is not UTF-8: {e}")))
    }

    /// Decodes the body into a [`PollMessage`]
    pub fn poll_message(&self) -> Result<PollMessage> {
        PollMessage::from_json(&self.decoded_payload()?)
    }
}
