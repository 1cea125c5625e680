//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so a single
//! test initializes it.

use firestore_bq_export::config::LoggingConfig;
use firestore_bq_export::logging::init_logging;
use firestore_bq_export::{log_import_failure, log_poll_requeued, log_upstream_rejected};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.format, "pretty");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_file_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        format: "json".to_string(),
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    assert!(!log_path.exists());
    let guard = init_logging("debug", &config).expect("Failed to initialize logging");
    assert!(log_path.exists());

    log_poll_requeued!("ops/123", 1, Duration::from_secs(120));
    log_upstream_rejected!("BigQuery", 403, "{\"error\": \"denied\"}", "submit load job");
    log_import_failure!("ops/123", "users", "quota exceeded");

    drop(guard);
}
