//! Shared JSON-over-HTTPS plumbing for the Google Cloud REST adapters
//!
//! Each call is bounded by the configured request timeout and is attempted
//! exactly once. Non-success responses are logged with their full body and
//! returned as [`UpstreamError::Rejected`].

use crate::config::{GcpConfig, SecretString};
use crate::domain::{ExporterError, Result, Service, UpstreamError};
use crate::log_upstream_rejected;
use reqwest::{Client, ClientBuilder, RequestBuilder};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Thin JSON client bound to one Google Cloud service
#[derive(Clone)]
pub struct RestClient {
    service: Service,
    http: Client,
    access_token: Option<SecretString>,
}

impl RestClient {
    /// Builds a client using the timeout and token from `config`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(service: Service, config: &GcpConfig) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("fsbq/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ExporterError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            service,
            http,
            access_token: config.access_token.clone(),
        })
    }

    /// POSTs a JSON body and returns the parsed JSON response
    pub async fn post_json<B>(&self, url: &str, body: &B, action: &str) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(service = %self.service, url = %url, action = action, "POST");
        let request = self.authorize(self.http.post(url).json(body));
        self.execute(request, action).await
    }

    /// GETs a URL and returns the parsed JSON response
    pub async fn get_json(&self, url: &str, action: &str) -> Result<Value> {
        tracing::debug!(service = %self.service, url = %url, action = action, "GET");
        let request = self.authorize(self.http.get(url));
        self.execute(request, action).await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token.expose_secret().as_ref()),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder, action: &str) -> Result<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| ExporterError::upstream(self.service, UpstreamError::from(e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExporterError::upstream(self.service, UpstreamError::from(e)))?;

        if !status.is_success() {
            log_upstream_rejected!(self.service, status.as_u16(), body, action);
            return Err(ExporterError::upstream(
                self.service,
                UpstreamError::Rejected {
                    status: status.as_u16(),
                    body,
                },
            ));
        }

        if body.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }

        serde_json::from_str(&body).map_err(|e| {
            ExporterError::upstream(
                self.service,
                UpstreamError::InvalidResponse(format!("{action}: {e}: {body}")),
            )
        })
    }
}

/// Joins an endpoint root and a path without doubling slashes
pub fn join_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use mockito::Matcher;

    fn config() -> GcpConfig {
        GcpConfig {
            project_id: "proj".to_string(),
            bucket: "bucket".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://a.com/", "/v1/x"), "https://a.com/v1/x");
        assert_eq!(join_url("https://a.com", "v1/x"), "https://a.com/v1/x");
    }

    #[tokio::test]
    async fn test_bearer_token_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/thing")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let mut cfg = config();
        cfg.access_token = Some(secret_string("tok"));
        let client = RestClient::new(Service::Firestore, &cfg).unwrap();
        let value = client
            .get_json(&join_url(&server.url(), "/thing"), "get thing")
            .await
            .unwrap();

        assert_eq!(value["ok"], true);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejection_keeps_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/thing")
            .match_body(Matcher::Json(serde_json::json!({"a": 1})))
            .with_status(409)
            .with_body(r#"{"error": {"message": "busy"}}"#)
            .create_async()
            .await;

        let client = RestClient::new(Service::BigQuery, &config()).unwrap();
        let err = client
            .post_json(
                &join_url(&server.url(), "/thing"),
                &serde_json::json!({"a": 1}),
                "post thing",
            )
            .await
            .unwrap_err();

        match err {
            ExporterError::Upstream {
                service: Service::BigQuery,
                source: UpstreamError::Rejected { status, body },
            } => {
                assert_eq!(status, 409);
                assert!(body.contains("busy"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/thing")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let client = RestClient::new(Service::PubSub, &config()).unwrap();
        let err = client
            .get_json(&join_url(&server.url(), "/thing"), "get thing")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExporterError::Upstream {
                source: UpstreamError::InvalidResponse(_),
                ..
            }
        ));
    }
}
