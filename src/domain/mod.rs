//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`JobName`], [`CollectionId`])
//! - **Export types** ([`ExportRequest`], [`ExportJob`])
//! - **Operation snapshots** ([`OperationStatus`], [`OperationState`])
//! - **Queue messages** ([`PollMessage`], [`PubSubEvent`])
//! - **Import types** ([`ImportTask`], [`LoadJobSpec`])
//! - **Error types** ([`ExporterError`], [`UpstreamError`])
//!
//! Nothing here is mutated after construction: each poll builds a fresh
//! [`OperationStatus`] and each successful export a fresh set of
//! [`ImportTask`]s.
//!
//! # Example
//!
//! ```rust
//! use firestore_bq_export::domain::{CollectionId, ImportTask};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let users = CollectionId::new("users")?;
//! let task = ImportTask::new(users, "gs://bucket/2024");
//! assert_eq!(task.target_table_name, "users");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod export;
pub mod ids;
pub mod import;
pub mod message;
pub mod operation;
pub mod result;

pub use errors::{ExporterError, Service, UpstreamError};
pub use export::{ExportJob, ExportRequest};
pub use ids::{CollectionId, JobName};
pub use import::{ImportTask, LoadJobSpec};
pub use message::{PollMessage, PubSubEvent};
pub use operation::{OperationState, OperationStatus};
pub use result::Result;
