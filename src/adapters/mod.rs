//! Google Cloud integrations.
//!
//! - [`firestore`] - managed export and operation status
//! - [`pubsub`] - poll message publisher
//! - [`bigquery`] - load job submission
//! - [`dry_run`] - logging stand-ins for the write paths
//!
//! # Design Pattern
//!
//! The pipeline depends only on the traits in [`traits`]. Concrete clients are
//! built once by [`factory::create_adapters`] and shared as `Arc<dyn ...>`,
//! which lets tests substitute recording fakes.
//!
//! ```rust,no_run
//! use firestore_bq_export::adapters::create_adapters;
//! use firestore_bq_export::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None::<&str>)?;
//! let adapters = create_adapters(&config)?;
//! let status = adapters
//!     .exporter
//!     .get_operation(&"projects/p/databases/(default)/operations/ASA1".parse()?)
//!     .await?;
//! println!("{status}");
//! # Ok(())
//! # }
//! ```

pub mod bigquery;
pub mod dry_run;
pub mod factory;
pub mod firestore;
pub mod http;
pub mod pubsub;
pub mod traits;

pub use factory::{create_adapters, Adapters};
pub use traits::{ExportOperations, LoadJobReceipt, LoadJobSubmitter, PollPublisher};
