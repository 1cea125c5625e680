//! BigQuery REST API models

use crate::domain::import::{CreateDisposition, LoadJobSpec, SourceFormat, WriteDisposition};
use serde::{Deserialize, Serialize};

/// Body of `POST projects/{project}/jobs`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInsertRequest {
    pub job_reference: JobReference,
    pub configuration: JobConfiguration,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfiguration {
    pub load: LoadConfiguration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadConfiguration {
    pub source_uris: Vec<String>,
    pub destination_table: TableReference,
    pub source_format: SourceFormat,
    pub create_disposition: CreateDisposition,
    pub write_disposition: WriteDisposition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

/// Job resource returned by an insert
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default)]
    pub job_reference: Option<JobReference>,
    #[serde(default)]
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error_result: Option<ErrorProto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorProto {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl JobInsertRequest {
    /// Builds an insert request for a load job
    pub fn load(spec: &LoadJobSpec, job_id: String, location: Option<String>) -> Self {
        Self {
            job_reference: JobReference {
                project_id: spec.project_id.clone(),
                job_id,
                location,
            },
            configuration: JobConfiguration {
                load: LoadConfiguration {
                    source_uris: vec![spec.source_uri.clone()],
                    destination_table: TableReference {
                        project_id: spec.project_id.clone(),
                        dataset_id: spec.dataset_id.clone(),
                        table_id: spec.table_id.clone(),
                    },
                    source_format: spec.source_format,
                    create_disposition: spec.create_disposition,
                    write_disposition: spec.write_disposition,
                },
            },
        }
    }
}
