//! Core pipeline logic.
//!
//! # Modules
//!
//! - [`initiator`] - starts an export and seeds the polling chain
//! - [`poller`] - one step of the export state machine per queue delivery
//! - [`dispatcher`] - fans a finished export out into BigQuery load jobs
//! - [`summary`] - per-collection import results
//! - [`handlers`] - invocation entrypoints wiring the above together
//!
//! # Workflow
//!
//! 1. **Trigger**: `exportDocuments` is called and `{"name": job}` published
//! 2. **Poll**: each delivery reads the operation state
//!    - `PROCESSING`: wait, publish the successor message, exit
//!    - `SUCCESSFUL`: dispatch imports
//!    - anything else: log and stop
//! 3. **Import**: one `WRITE_TRUNCATE` load job per exported collection
//!
//! No invocation keeps state in memory; the job name inside the queue
//! message is the only thing carried forward.
//!
//! # Example
//!
//! ```rust,no_run
//! use firestore_bq_export::adapters::create_adapters;
//! use firestore_bq_export::config::load_config;
//! use firestore_bq_export::core::Pipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None::<&str>)?;
//! let pipeline = Pipeline::new(&config, create_adapters(&config)?);
//!
//! let response = pipeline.handle_trigger(Some("users,orders")).await?;
//! println!("{}", response.body());
//! # Ok(())
//! # }
//! ```

pub mod dispatcher;
pub mod handlers;
pub mod initiator;
pub mod poller;
pub mod summary;

pub use dispatcher::ImportDispatcher;
pub use handlers::{EventOutcome, Pipeline, TriggerResponse};
pub use initiator::ExportInitiator;
pub use poller::{PollOutcome, StatusPoller};
pub use summary::{ImportFailure, ImportSummary, SubmittedLoadJob};
