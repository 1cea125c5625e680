//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ExporterConfig;
use super::secret::secret_string;
use crate::domain::errors::ExporterError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration
///
/// This function:
/// 1. Reads the TOML file, if a path is given
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ExporterConfig`] (defaults when no file)
/// 4. Applies environment variable overrides
/// 5. Validates the configuration
///
/// The deployment values come from the same variables the Cloud Functions
/// use: `GCP_PROJECT`, `GCP_BUCKET`, `PS_JOB_STATUS_TOPIC`, `BQ_DATASET`.
///
/// # Errors
///
/// Returns [`ExporterError::Configuration`] if the file is missing or invalid,
/// a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use firestore_bq_export::config::loader::load_config;
///
/// // Environment only
/// let config = load_config(None::<&str>).expect("Failed to load config");
///
/// // File plus environment
/// let config = load_config(Some("fsbq.toml")).expect("Failed to load config");
/// ```
pub fn load_config(path: Option<impl AsRef<Path>>) -> Result<ExporterConfig> {
    let mut config = match path {
        Some(path) => parse_file(path.as_ref())?,
        None => ExporterConfig::default(),
    };

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ExporterError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<ExporterConfig> {
    if !path.exists() {
        return Err(ExporterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ExporterError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    toml::from_str(&contents)
        .map_err(|e| ExporterError::Configuration(format!("Failed to parse TOML: {e}")))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExporterError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExporterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies overrides from the process environment
fn apply_env_overrides(config: &mut ExporterConfig) -> Result<()> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Applies overrides from an arbitrary key lookup
///
/// Deployment values use the plain names shared with the Cloud Functions
/// runtime; tuning knobs use the `EXPORTER_<SECTION>_<KEY>` pattern.
pub(crate) fn apply_overrides<F>(config: &mut ExporterConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    // Deployment
    if let Some(val) = lookup("GCP_PROJECT") {
        config.gcp.project_id = val;
    }
    if let Some(val) = lookup("GCP_BUCKET") {
        config.gcp.bucket = val;
    }
    if let Some(val) = lookup("PS_JOB_STATUS_TOPIC") {
        config.pubsub.status_topic = val;
    }
    if let Some(val) = lookup("BQ_DATASET") {
        config.bigquery.dataset = val;
    }
    if let Some(val) = lookup("GCP_ACCESS_TOKEN") {
        config.gcp.access_token = Some(secret_string(val));
    }

    // Application
    if let Some(val) = lookup("EXPORTER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = lookup("EXPORTER_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_value("EXPORTER_APPLICATION_DRY_RUN", &val)?;
    }

    // Endpoints
    if let Some(val) = lookup("EXPORTER_GCP_DATABASE_ID") {
        config.gcp.database_id = val;
    }
    if let Some(val) = lookup("EXPORTER_GCP_FIRESTORE_ENDPOINT") {
        config.gcp.firestore_endpoint = val;
    }
    if let Some(val) = lookup("EXPORTER_GCP_PUBSUB_ENDPOINT") {
        config.gcp.pubsub_endpoint = val;
    }
    if let Some(val) = lookup("EXPORTER_GCP_BIGQUERY_ENDPOINT") {
        config.gcp.bigquery_endpoint = val;
    }
    if let Some(val) = lookup("EXPORTER_GCP_REQUEST_TIMEOUT_SECONDS") {
        config.gcp.request_timeout_seconds =
            parse_value("EXPORTER_GCP_REQUEST_TIMEOUT_SECONDS", &val)?;
    }
    if let Some(val) = lookup("EXPORTER_BIGQUERY_LOCATION") {
        config.bigquery.location = Some(val);
    }

    // Poller and import
    if let Some(val) = lookup("EXPORTER_POLLER_INTERVAL_SECONDS") {
        config.poller.interval_seconds = parse_value("EXPORTER_POLLER_INTERVAL_SECONDS", &val)?;
    }
    if let Some(val) = lookup("EXPORTER_POLLER_MAX_POLLS") {
        config.poller.max_polls = parse_value("EXPORTER_POLLER_MAX_POLLS", &val)?;
    }
    if let Some(val) = lookup("EXPORTER_IMPORT_MAX_CONCURRENCY") {
        config.import.max_concurrency = parse_value("EXPORTER_IMPORT_MAX_CONCURRENCY", &val)?;
    }

    // Logging
    if let Some(val) = lookup("EXPORTER_LOGGING_FORMAT") {
        config.logging.format = val;
    }
    if let Some(val) = lookup("EXPORTER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_value("EXPORTER_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = lookup("EXPORTER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ExporterError::Configuration(format!("Invalid value for {key} '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("FSBQ_TEST_SUBST_VAR", "test_value");
        let input = "bucket = \"${FSBQ_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "bucket = \"test_value\"\n");
        std::env::remove_var("FSBQ_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("FSBQ_TEST_MISSING_VAR");
        let input = "bucket = \"${FSBQ_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("FSBQ_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("FSBQ_TEST_COMMENTED_VAR");
        let input = "# bucket = \"${FSBQ_TEST_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_deployment_overrides() {
        let mut config = ExporterConfig::default();
        apply_overrides(
            &mut config,
            lookup_from(&[
                ("GCP_PROJECT", "proj"),
                ("GCP_BUCKET", "bucket"),
                ("PS_JOB_STATUS_TOPIC", "export-status"),
                ("BQ_DATASET", "analytics"),
                ("GCP_ACCESS_TOKEN", "ya29.abc"),
            ]),
        )
        .unwrap();

        assert_eq!(config.gcp.project_id, "proj");
        assert_eq!(config.gcp.bucket, "bucket");
        assert_eq!(config.pubsub.status_topic, "export-status");
        assert_eq!(config.bigquery.dataset, "analytics");
        assert_eq!(
            config
                .gcp
                .access_token
                .as_ref()
                .map(|t| t.expose_secret().as_ref().to_string()),
            Some("ya29.abc".to_string())
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tuning_overrides() {
        let mut config = ExporterConfig::default();
        apply_overrides(
            &mut config,
            lookup_from(&[
                ("EXPORTER_POLLER_INTERVAL_SECONDS", "5"),
                ("EXPORTER_POLLER_MAX_POLLS", "12"),
                ("EXPORTER_IMPORT_MAX_CONCURRENCY", "2"),
                ("EXPORTER_APPLICATION_DRY_RUN", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.poller.interval_seconds, 5);
        assert_eq!(config.poller.max_polls, 12);
        assert_eq!(config.import.max_concurrency, 2);
        assert!(config.application.dry_run);
    }

    #[test]
    fn test_invalid_numeric_override() {
        let mut config = ExporterConfig::default();
        let err = apply_overrides(
            &mut config,
            lookup_from(&[("EXPORTER_POLLER_MAX_POLLS", "many")]),
        )
        .unwrap_err();
        assert!(matches!(err, ExporterError::Configuration(_)));
        assert!(err.to_string().contains("EXPORTER_POLLER_MAX_POLLS"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Some("nonexistent.toml"));
        assert!(matches!(result, Err(ExporterError::Configuration(_))));
    }

    #[test]
    fn test_parse_file_valid() {
        let toml_content = r#"
[gcp]
project_id = "proj"
bucket = "bucket"

[pubsub]
status_topic = "export-status"

[bigquery]
dataset = "analytics"

[poller]
interval_seconds = 60
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = parse_file(temp_file.path()).unwrap();
        assert_eq!(config.gcp.project_id, "proj");
        assert_eq!(config.poller.interval_seconds, 60);
        assert_eq!(config.poller.max_polls, 360);
        assert!(config.validate().is_ok());
    }
}
