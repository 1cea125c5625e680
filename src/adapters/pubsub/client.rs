//! Pub/Sub publisher for poll messages

use super::models::{PublishRequest, PublishResponse};
use crate::adapters::http::{join_url, RestClient};
use crate::adapters::traits::PollPublisher;
use crate::config::{GcpConfig, PubSubConfig};
use crate::domain::{ExporterError, PollMessage, Result, Service, UpstreamError};
use async_trait::async_trait;

/// Publishes poll messages to the status-check topic
pub struct PubSubPublisher {
    rest: RestClient,
    publish_url: String,
}

impl PubSubPublisher {
    /// Creates a publisher bound to the configured topic
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(gcp: &GcpConfig, pubsub: &PubSubConfig) -> Result<Self> {
        let publish_url = join_url(
            &gcp.pubsub_endpoint,
            &format!(
                "v1/projects/{}/topics/{}:publish",
                gcp.project_id, pubsub.status_topic
            ),
        );

        Ok(Self {
            rest: RestClient::new(Service::PubSub, gcp)?,
            publish_url,
        })
    }
}

#[async_trait]
impl PollPublisher for PubSubPublisher {
    async fn publish(&self, message: &PollMessage) -> Result<String> {
        let request = PublishRequest::single(message.to_base64()?);
        let response = self
            .rest
            .post_json(&self.publish_url, &request, "publish poll message")
            .await?;

        let response: PublishResponse = serde_json::from_value(response).map_err(|e| {
            ExporterError::upstream(
                Service::PubSub,
                UpstreamError::InvalidResponse(format!("publish response: {e}")),
            )
        })?;

        response.message_ids.into_iter().next().ok_or_else(|| {
            ExporterError::upstream(
                Service::PubSub,
                UpstreamError::InvalidResponse("publish response has no message id".to_string()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobName;
    use mockito::Matcher;
    use serde_json::json;

    fn configs(endpoint: &str) -> (GcpConfig, PubSubConfig) {
        (
            GcpConfig {
                project_id: "proj".to_string(),
                bucket: "bucket".to_string(),
                pubsub_endpoint: endpoint.to_string(),
                ..Default::default()
            },
            PubSubConfig {
                status_topic: "export-status".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_publish_encodes_message() {
        let mut server = mockito::Server::new_async().await;
        // base64 of {"name":"ops/123"}
        let mock = server
            .mock("POST", "/v1/projects/proj/topics/export-status:publish")
            .match_body(Matcher::Json(json!({
                "messages": [{"data": "eyJuYW1lIjoib3BzLzEyMyJ9"}]
            })))
            .with_status(200)
            .with_body(r#"{"messageIds": ["42"]}"#)
            .create_async()
            .await;

        let (gcp, pubsub) = configs(&server.url());
        let publisher = PubSubPublisher::new(&gcp, &pubsub).unwrap();
        let message = PollMessage::new(JobName::new("ops/123").unwrap());

        let id = publisher.publish(&message).await.unwrap();
        assert_eq!(id, "42");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_publish_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/projects/proj/topics/export-status:publish")
            .with_status(404)
            .with_body(r#"{"error": {"message": "Resource not found"}}"#)
            .create_async()
            .await;

        let (gcp, pubsub) = configs(&server.url());
        let publisher = PubSubPublisher::new(&gcp, &pubsub).unwrap();
        let message = PollMessage::new(JobName::new("ops/123").unwrap());

        let err = publisher.publish(&message).await.unwrap_err();
        assert!(err.is_upstream_rejection());
    }

    #[tokio::test]
    async fn test_publish_without_message_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/projects/proj/topics/export-status:publish")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let (gcp, pubsub) = configs(&server.url());
        let publisher = PubSubPublisher::new(&gcp, &pubsub).unwrap();
        let message = PollMessage::new(JobName::new("ops/123").unwrap());

        let err = publisher.publish(&message).await.unwrap_err();
        assert!(!err.is_upstream_rejection());
    }
}
