//! login, logout and whoami commands

use super::context::{report_failure, CommandContext};
use crate::cli::exit_code;
use clap::Args;

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    pub email: String,

    /// Account password
    #[arg(short, long, env = "DENTALDESK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl LoginArgs {
    /// Execute the login command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut ctx = match CommandContext::open(config_path) {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        println!("🔑 Signing in as {}...", self.email);
        match ctx.identity.login(&self.email, &self.password).await {
            Ok(true) => {
                if let Some(user) = ctx.identity.current_user() {
                    println!("✅ Welcome, {} {}", user.name, user.avatar);
                    println!("   Role: {}", user.role);
                }
                Ok(exit_code::SUCCESS)
            }
            Ok(false) => {
                println!("❌ Invalid email or password");
                Ok(exit_code::ACCESS_DENIED)
            }
            Err(e) => Ok(report_failure(&e, "Failed to save session")),
        }
    }
}

/// Execute the logout command
pub async fn logout(config_path: &str) -> anyhow::Result<i32> {
    let mut ctx = match CommandContext::open(config_path) {
        Ok(ctx) => ctx,
        Err(code) => return Ok(code),
    };

    match ctx.identity.logout() {
        Ok(()) => {
            println!("👋 Signed out");
            Ok(exit_code::SUCCESS)
        }
        Err(e) => Ok(report_failure(&e, "Failed to clear session")),
    }
}

/// Execute the whoami command
pub async fn whoami(config_path: &str) -> anyhow::Result<i32> {
    let ctx = match CommandContext::open(config_path) {
        Ok(ctx) => ctx,
        Err(code) => return Ok(code),
    };

    let Some(user) = ctx.identity.current_user() else {
        println!("Not signed in.");
        return Ok(exit_code::ACCESS_DENIED);
    };

    println!("{} {}", user.avatar, user.name);
    println!("  Email: {}", user.email);
    println!("  Role: {}", user.role);
    if let Some(specialty) = &user.specialty {
        println!("  Specialty: {specialty}");
    }
    if let Some(patient_id) = &user.patient_id {
        println!("  Patient record: {patient_id}");
    }
    Ok(exit_code::SUCCESS)
}
