//! Firestore export client

use super::models::Operation;
use crate::adapters::http::{join_url, RestClient};
use crate::adapters::traits::ExportOperations;
use crate::config::GcpConfig;
use crate::domain::{ExportRequest, ExporterError, JobName, Result, Service, UpstreamError};
use crate::log_upstream_rejected;
use async_trait::async_trait;
use serde_json::Value;

/// Client for the Firestore admin export API
pub struct FirestoreClient {
    rest: RestClient,
    endpoint: String,
    database_path: String,
}

impl FirestoreClient {
    /// Creates a client for the configured project and database
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &GcpConfig) -> Result<Self> {
        Ok(Self {
            rest: RestClient::new(Service::Firestore, config)?,
            endpoint: config.firestore_endpoint.clone(),
            database_path: format!(
                "projects/{}/databases/{}",
                config.project_id, config.database_id
            ),
        })
    }

    fn export_url(&self) -> String {
        join_url(
            &self.endpoint,
            &format!("v1/{}:exportDocuments", self.database_path),
        )
    }

    fn operation_url(&self, job_name: &JobName) -> String {
        join_url(&self.endpoint, &format!("v1/{}", job_name.as_str()))
    }
}

#[async_trait]
impl ExportOperations for FirestoreClient {
    async fn start_export(&self, request: &ExportRequest) -> Result<JobName> {
        let response = self
            .rest
            .post_json(&self.export_url(), request, "start export")
            .await?;

        let operation: Operation = serde_json::from_value(response.clone()).map_err(|e| {
            ExporterError::upstream(
                Service::Firestore,
                UpstreamError::InvalidResponse(format!("export response: {e}")),
            )
        })?;

        if let Some(error) = operation.error {
            let body = error.to_string();
            log_upstream_rejected!(Service::Firestore, 200u16, body, "start export");
            return Err(ExporterError::upstream(
                Service::Firestore,
                UpstreamError::Rejected { status: 200, body },
            ));
        }

        let name = operation.name.ok_or_else(|| {
            ExporterError::upstream(
                Service::Firestore,
                UpstreamError::InvalidResponse(format!(
                    "export response has no operation name: {response}"
                )),
            )
        })?;

        JobName::new(name).map_err(|e| {
            ExporterError::upstream(Service::Firestore, UpstreamError::InvalidResponse(e))
        })
    }

    async fn get_operation(&self, job_name: &JobName) -> Result<Value> {
        self.rest
            .get_json(&self.operation_url(job_name), "get export status")
            .await
    }
}
