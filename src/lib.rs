// firestore-bq-export - Firestore to BigQuery export pipeline
// Copyright (c) 2025 firestore-bq-export Contributors
// Licensed under the MIT License

//! # firestore-bq-export
//!
//! Exports Firestore collections to Cloud Storage and loads each exported
//! collection into its own BigQuery table, coordinated entirely through
//! short-lived invocations and a Pub/Sub topic.
//!
//! ## Overview
//!
//! - **Trigger** a managed export for a set of collections
//! - **Poll** the export by republishing `{"name": job}` until it finishes
//! - **Load** one `DATASTORE_BACKUP` job per collection, truncating the table
//!
//! No invocation waits on another. The wait between polls is a delayed
//! republish of the poll message, so nothing holds a process while the export
//! runs, and the job name in the message is the only state carried forward.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pipeline logic (initiator, poller, dispatcher, handlers)
//! - [`adapters`] - Firestore, Pub/Sub and BigQuery REST clients
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use firestore_bq_export::adapters::create_adapters;
//! use firestore_bq_export::config::load_config;
//! use firestore_bq_export::core::{EventOutcome, Pipeline};
//! use firestore_bq_export::domain::PubSubEvent;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // GCP_PROJECT, GCP_BUCKET, PS_JOB_STATUS_TOPIC and BQ_DATASET must be set
//!     let config = load_config(None::<&str>)?;
//!     let pipeline = Pipeline::new(&config, create_adapters(&config)?);
//!
//!     // Start an export; the first poll message is published for us
//!     let response = pipeline.handle_trigger(Some("users,orders")).await?;
//!     println!("{}", response.body());
//!
//!     // Later, for each delivery on the status topic
//!     let event = PubSubEvent::from_json(r#"{"data": "eyJuYW1lIjoib3BzLzEyMyJ9"}"#)?;
//!     if let EventOutcome::Polled(outcome) = pipeline.handle_status_event(&event).await? {
//!         println!("{outcome:?}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All library calls return [`domain::Result`], whose error type is
//! [`domain::ExporterError`]. Upstream failures carry the service they came
//! from and, for rejections, the HTTP status and full response body.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
