//! Logging and observability
//!
//! Every failure in the pipeline is observed through logs, since nothing
//! besides the trigger call has a synchronous caller. The macros below keep
//! the field names consistent (`job_name`, `collection_id`, `state`,
//! `attempt`) so log-based alerts can key on them.
//!
//! # Example
//!
//! ```no_run
//! use firestore_bq_export::logging::init_logging;
//! use firestore_bq_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(job_name = "ops/123", "Export started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a requeued poll
///
/// # Example
///
/// ```no_run
/// use firestore_bq_export::log_poll_requeued;
/// use std::time::Duration;
///
/// log_poll_requeued!("ops/123", 2, Duration::from_secs(120));
/// ```
#[macro_export]
macro_rules! log_poll_requeued {
    ($job_name:expr, $attempt:expr, $delay:expr) => {
        tracing::info!(
            job_name = %$job_name,
            attempt = $attempt,
            delay_secs = $delay.as_secs(),
            "Export still processing, poll requeued"
        );
    };
}

/// Log a non-success response from an upstream API
///
/// # Example
///
/// ```no_run
/// use firestore_bq_export::log_upstream_rejected;
///
/// log_upstream_rejected!("BigQuery", 403, "{\"error\": \"denied\"}", "submit load job");
/// ```
#[macro_export]
macro_rules! log_upstream_rejected {
    ($service:expr, $status:expr, $body:expr, $action:expr) => {
        tracing::error!(
            service = %$service,
            status = $status,
            response = %$body,
            action = $action,
            "Upstream request rejected"
        );
    };
}

/// Log a load-job submission failure for one collection
///
/// # Example
///
/// ```no_run
/// use firestore_bq_export::log_import_failure;
///
/// log_import_failure!("ops/123", "users", "quota exceeded");
/// ```
#[macro_export]
macro_rules! log_import_failure {
    ($job_name:expr, $collection_id:expr, $error:expr) => {
        tracing::error!(
            job_name = %$job_name,
            collection_id = %$collection_id,
            error = %$error,
            "Load job submission failed"
        );
    };
}
