//! BigQuery load job client

use super::models::{Job, JobInsertRequest};
use crate::adapters::http::{join_url, RestClient};
use crate::adapters::traits::{LoadJobReceipt, LoadJobSubmitter};
use crate::config::{BigQueryConfig, GcpConfig};
use crate::domain::{ExporterError, LoadJobSpec, Result, Service, UpstreamError};
use crate::log_upstream_rejected;
use async_trait::async_trait;

/// Client for the BigQuery jobs API
pub struct BigQueryClient {
    rest: RestClient,
    endpoint: String,
    location: Option<String>,
}

impl BigQueryClient {
    /// Creates a client; `location` pins the job region when set
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(gcp: &GcpConfig, bigquery: &BigQueryConfig) -> Result<Self> {
        Ok(Self {
            rest: RestClient::new(Service::BigQuery, gcp)?,
            endpoint: gcp.bigquery_endpoint.clone(),
            location: bigquery.location.clone(),
        })
    }

    fn jobs_url(&self, project_id: &str) -> String {
        join_url(
            &self.endpoint,
            &format!("bigquery/v2/projects/{project_id}/jobs"),
        )
    }
}

/// Unique job id for a load into `table_id`
///
/// Job ids may only hold letters, digits, dashes and underscores.
pub fn load_job_id(table_id: &str) -> String {
    let table: String = table_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("fsbq_load_{table}_{}", uuid::Uuid::new_v4().simple())
}

#[async_trait]
impl LoadJobSubmitter for BigQueryClient {
    async fn submit_load_job(&self, spec: &LoadJobSpec) -> Result<LoadJobReceipt> {
        let job_id = load_job_id(&spec.table_id);
        let request = JobInsertRequest::load(spec, job_id.clone(), self.location.clone());

        let response = self
            .rest
            .post_json(&self.jobs_url(&spec.project_id), &request, "submit load job")
            .await?;

        let job: Job = serde_json::from_value(response.clone()).map_err(|e| {
            ExporterError::upstream(
                Service::BigQuery,
                UpstreamError::InvalidResponse(format!("job insert response: {e}")),
            )
        })?;

        let status = job.status.unwrap_or_default();
        if let Some(error) = status.error_result {
            let body = response.to_string();
            log_upstream_rejected!(Service::BigQuery, 200u16, body, "submit load job");
            return Err(ExporterError::upstream(
                Service::BigQuery,
                UpstreamError::Rejected {
                    status: 200,
                    body: error
                        .message
                        .or(error.reason)
                        .unwrap_or(body),
                },
            ));
        }

        let job_id = job
            .job_reference
            .map(|r| r.job_id)
            .filter(|id| !id.is_empty())
            .unwrap_or(job_id);

        Ok(LoadJobReceipt {
            job_id,
            table: spec.table_path(),
            state: status.state,
        })
    }
}
