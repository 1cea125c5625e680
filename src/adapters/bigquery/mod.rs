//! BigQuery jobs adapter
//!
//! Submits `DATASTORE_BACKUP` load jobs. Submission is fire-and-forget:
//! the job is inserted and its id returned without waiting for completion.

pub mod client;
pub mod models;

pub use client::BigQueryClient;
pub use models::{Job, JobInsertRequest};
