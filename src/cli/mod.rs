//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for dentaldesk using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Process exit codes shared by all commands
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const CONFIGURATION: i32 = 2;
    /// Not signed in, wrong role, or rejected credentials
    pub const ACCESS_DENIED: i32 = 3;
    pub const STORAGE: i32 = 4;
    pub const FATAL: i32 = 5;
}

/// dentaldesk - dental practice records
#[derive(Parser, Debug)]
#[command(name = "dentaldesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "dentaldesk.toml", env = "DENTALDESK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DENTALDESK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Sign in with a roster account
    Login(commands::session::LoginArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage patients (admin)
    #[command(subcommand)]
    Patients(commands::patients::PatientsCommand),

    /// Manage and query appointments
    #[command(subcommand)]
    Appointments(commands::appointments::AppointmentsCommand),

    /// Show dashboard statistics
    Stats(commands::stats::StatsArgs),

    /// Show the appointment calendar (admin)
    Calendar(commands::calendar::CalendarArgs),
}
