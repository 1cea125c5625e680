// firestore-bq-export - Firestore to BigQuery export pipeline
// Copyright (c) 2025 firestore-bq-export Contributors
// Licensed under the MIT License

use clap::Parser;
use firestore_bq_export::cli::{Cli, Commands, EXIT_CONFIG, EXIT_FATAL};
use firestore_bq_export::config::{load_config, ExporterConfig, LoggingConfig};
use firestore_bq_export::logging::{init_logging, LoggingGuard};
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // init needs no configuration and must work before one exists
    if let Commands::Init(args) = &cli.command {
        let _guard = start_logging(&cli, &LoggingConfig::default(), "info");
        let code = args.execute().await.unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            EXIT_FATAL
        });
        process::exit(code);
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(mut config) => {
            if cli.dry_run {
                config.application.dry_run = true;
            }
            config
        }
        Err(e) => {
            let _guard = start_logging(&cli, &LoggingConfig::default(), "info");
            tracing::error!(error = %e, "Failed to load configuration");
            println!("❌ Failed to load configuration");
            println!("   Error: {e}");
            process::exit(EXIT_CONFIG);
        }
    };

    let _guard = start_logging(&cli, &config.logging, &config.application.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        project_id = %config.gcp.project_id,
        dry_run = config.application.dry_run,
        "fsbq - Firestore to BigQuery export pipeline"
    );

    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    process::exit(exit_code);
}

/// Initializes logging or exits; `--log-level` wins over the configured level
fn start_logging(cli: &Cli, logging: &LoggingConfig, configured_level: &str) -> LoggingGuard {
    let log_level = cli.log_level.as_deref().unwrap_or(configured_level);
    match init_logging(log_level, logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: &ExporterConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Trigger(args) => args.execute(config).await,
        Commands::CheckStatus(args) => args.execute(config).await,
        Commands::Status(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(config).await,
        Commands::Init(args) => args.execute().await,
    }
}
