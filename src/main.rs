// dentaldesk - Dental practice records
// Copyright (c) 2025 dentaldesk Contributors
// Licensed under the MIT License

use dentaldesk::cli::{exit_code, Cli, Commands};
use dentaldesk::cli::commands::session;
use dentaldesk::config::{load_config_or_default, LoggingConfig};
use dentaldesk::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging follows the configuration when it loads; a broken
    // configuration is reported by the command itself
    let file_config = load_config_or_default(&cli.config).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "warn".to_string());
    let logging_config = file_config
        .map(|c| c.logging)
        .unwrap_or_else(LoggingConfig::default);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(exit_code::FATAL);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "dentaldesk starting");

    let code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            exit_code::FATAL
        }
    };

    // Drop the guard first so buffered file logs are flushed
    drop(guard);
    process::exit(code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Init(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Login(args) => args.execute(&cli.config).await,
        Commands::Logout => session::logout(&cli.config).await,
        Commands::Whoami => session::whoami(&cli.config).await,
        Commands::Patients(command) => command.execute(&cli.config).await,
        Commands::Appointments(command) => command.execute(&cli.config).await,
        Commands::Stats(args) => args.execute(&cli.config).await,
        Commands::Calendar(args) => args.execute(&cli.config).await,
    }
}
