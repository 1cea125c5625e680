//! Shared recording fakes for the three adapter traits

#![allow(dead_code)]

use async_trait::async_trait;
use firestore_bq_export::adapters::{
    Adapters, ExportOperations, LoadJobReceipt, LoadJobSubmitter, PollPublisher,
};
use firestore_bq_export::config::ExporterConfig;
use firestore_bq_export::core::Pipeline;
use firestore_bq_export::domain::{
    ExportRequest, ExporterError, JobName, LoadJobSpec, PollMessage, PubSubEvent, Result,
    Service, UpstreamError,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const JOB_NAME: &str = "ops/123";

/// Firestore fake returning scripted statuses; the last one repeats
#[derive(Default)]
pub struct ScriptedFirestore {
    pub job_name: Option<String>,
    pub statuses: Mutex<VecDeque<Value>>,
    pub export_requests: Mutex<Vec<ExportRequest>>,
    pub status_reads: Mutex<Vec<JobName>>,
    pub reject_exports: bool,
}

impl ScriptedFirestore {
    pub fn with_statuses(statuses: Vec<Value>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            ..Default::default()
        }
    }

    pub fn export_count(&self) -> usize {
        self.export_requests.lock().unwrap().len()
    }

    pub fn read_count(&self) -> usize {
        self.status_reads.lock().unwrap().len()
    }
}

#[async_trait]
impl ExportOperations for ScriptedFirestore {
    async fn start_export(&self, request: &ExportRequest) -> Result<JobName> {
        self.export_requests.lock().unwrap().push(request.clone());
        if self.reject_exports {
            return Err(ExporterError::upstream(
                Service::Firestore,
                UpstreamError::Rejected {
                    status: 400,
                    body: r#"{"error": {"status": "FAILED_PRECONDITION"}}"#.to_string(),
                },
            ));
        }
        let name = self.job_name.clone().unwrap_or_else(|| JOB_NAME.to_string());
        Ok(JobName::new(name).unwrap())
    }

    async fn get_operation(&self, job_name: &JobName) -> Result<Value> {
        self.status_reads.lock().unwrap().push(job_name.clone());
        let mut statuses = self.statuses.lock().unwrap();
        let status = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().cloned()
        };
        Ok(status.unwrap_or_else(|| json!({})))
    }
}

/// Publisher fake recording every message
#[derive(Default)]
pub struct RecordingPublisher {
    pub messages: Mutex<Vec<PollMessage>>,
    pub fail: bool,
}

impl RecordingPublisher {
    pub fn published(&self) -> Vec<PollMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// Turns the last published message back into a delivery
    pub fn last_as_event(&self) -> Option<PubSubEvent> {
        self.messages
            .lock()
            .unwrap()
            .last()
            .map(|m| PubSubEvent::from_data(m.to_base64().unwrap()))
    }
}

#[async_trait]
impl PollPublisher for RecordingPublisher {
    async fn publish(&self, message: &PollMessage) -> Result<String> {
        if self.fail {
            return Err(ExporterError::upstream(
                Service::PubSub,
                UpstreamError::ConnectionFailed("connection refused".to_string()),
            ));
        }
        let mut messages = self.messages.lock().unwrap();
        messages.push(message.clone());
        Ok(messages.len().to_string())
    }
}

/// BigQuery fake recording load specs; rejects the listed tables
#[derive(Default)]
pub struct RecordingWarehouse {
    pub specs: Mutex<Vec<LoadJobSpec>>,
    pub reject_tables: Vec<String>,
}

impl RecordingWarehouse {
    pub fn loads(&self) -> Vec<LoadJobSpec> {
        self.specs.lock().unwrap().clone()
    }
}

#[async_trait]
impl LoadJobSubmitter for RecordingWarehouse {
    async fn submit_load_job(&self, spec: &LoadJobSpec) -> Result<LoadJobReceipt> {
        self.specs.lock().unwrap().push(spec.clone());
        if self.reject_tables.contains(&spec.table_id) {
            return Err(ExporterError::upstream(
                Service::BigQuery,
                UpstreamError::Rejected {
                    status: 403,
                    body: format!("Access Denied: Table {}", spec.table_path()),
                },
            ));
        }
        Ok(LoadJobReceipt {
            job_id: format!("load_{}", spec.table_id),
            table: spec.table_path(),
            state: Some("PENDING".to_string()),
        })
    }
}

/// Valid configuration with a zero poll interval
pub fn test_config() -> ExporterConfig {
    let mut config = ExporterConfig::default();
    config.gcp.project_id = "proj".to_string();
    config.gcp.bucket = "bucket".to_string();
    config.pubsub.status_topic = "export-status".to_string();
    config.bigquery.dataset = "analytics".to_string();
    config.poller.interval_seconds = 0;
    config
}

/// Fakes plus a pipeline wired to them
pub struct Harness {
    pub firestore: Arc<ScriptedFirestore>,
    pub publisher: Arc<RecordingPublisher>,
    pub warehouse: Arc<RecordingWarehouse>,
    pub pipeline: Pipeline,
}

impl Harness {
    pub fn new(firestore: ScriptedFirestore) -> Self {
        Self::with_parts(
            firestore,
            RecordingPublisher::default(),
            RecordingWarehouse::default(),
            test_config(),
        )
    }

    pub fn with_parts(
        firestore: ScriptedFirestore,
        publisher: RecordingPublisher,
        warehouse: RecordingWarehouse,
        config: ExporterConfig,
    ) -> Self {
        let firestore = Arc::new(firestore);
        let publisher = Arc::new(publisher);
        let warehouse = Arc::new(warehouse);
        let pipeline = Pipeline::new(
            &config,
            Adapters {
                exporter: firestore.clone(),
                publisher: publisher.clone(),
                submitter: warehouse.clone(),
            },
        );
        Self {
            firestore,
            publisher,
            warehouse,
            pipeline,
        }
    }
}

pub fn processing() -> Value {
    json!({"name": JOB_NAME, "metadata": {"operationState": "PROCESSING"}})
}

pub fn successful(collections: &[&str], prefix: &str) -> Value {
    json!({
        "name": JOB_NAME,
        "done": true,
        "metadata": {
            "operationState": "SUCCESSFUL",
            "collectionIds": collections,
            "outputUriPrefix": prefix
        }
    })
}

pub fn with_state(state: &str) -> Value {
    json!({"name": JOB_NAME, "metadata": {"operationState": state}})
}

pub fn event_for(job_name: &str) -> PubSubEvent {
    let message = PollMessage::new(JobName::new(job_name).unwrap());
    PubSubEvent::from_data(message.to_base64().unwrap())
}
