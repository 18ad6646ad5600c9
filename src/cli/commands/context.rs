//! Shared setup for commands that touch stored data
//!
//! Every data command loads the configuration, opens the configured backend,
//! restores the session and checks the access guard before doing anything.
//! Failures are reported to the user here and surface as an exit code.

use crate::adapters::storage::{create_key_value_store, KeyValueStore};
use crate::cli::exit_code;
use crate::config::{load_config_or_default, DeskConfig};
use crate::core::clock::{Clock, SystemClock};
use crate::core::identity::{authorize, Access, IdentityStore, Roster, View};
use crate::core::query::UpcomingWindow;
use crate::core::records::RecordStore;
use crate::domain::{DeskError, TimestampIdGenerator, User};
use crate::log_error_with_context;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Configuration, backend and session for one command invocation
pub struct CommandContext {
    pub config: DeskConfig,
    pub identity: IdentityStore,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl CommandContext {
    /// Loads configuration, opens the backend and restores the session
    ///
    /// On failure the problem has already been printed and the `Err` holds
    /// the exit code to return.
    pub fn open(config_path: &str) -> Result<Self, i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Err(exit_code::CONFIGURATION);
            }
        };

        let storage = create_key_value_store(&config.storage).map_err(|e| report_storage(&e))?;
        let identity = IdentityStore::restore(
            storage.clone(),
            Roster::builtin(),
            Duration::from_millis(config.auth.login_delay_ms),
        )
        .map_err(|e| report_storage(&e))?;

        Ok(Self {
            config,
            identity,
            storage,
            clock: Arc::new(SystemClock),
        })
    }

    /// Checks the access guard for `view` and returns the signed-in user
    pub fn require(&self, view: View) -> Result<User, i32> {
        let user = self.identity.current_user();
        match authorize(user, view) {
            Access::Granted => match user {
                Some(user) => Ok(user.clone()),
                None => Err(exit_code::ACCESS_DENIED),
            },
            Access::RedirectToLogin => {
                println!("🔒 Not signed in. Run 'dentaldesk login <email>' first.");
                Err(exit_code::ACCESS_DENIED)
            }
            Access::RedirectToHome => {
                println!("🔒 The {view} view is only available to practice staff.");
                Err(exit_code::ACCESS_DENIED)
            }
        }
    }

    /// Loads the record collections (seeding them on first use)
    pub fn records(&self) -> Result<RecordStore, i32> {
        RecordStore::load(
            self.storage.clone(),
            self.clock.clone(),
            Arc::new(TimestampIdGenerator::new()),
        )
        .map_err(|e| report_storage(&e))
    }

    pub fn window(&self) -> UpcomingWindow {
        UpcomingWindow::from(&self.config.schedule)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn local_now(&self) -> DateTime<FixedOffset> {
        self.clock.local_now()
    }
}

/// Prints a failed operation and maps it to an exit code
pub fn report_failure(error: &DeskError, action: &str) -> i32 {
    log_error_with_context!(error, action);
    println!("❌ {action}");
    println!("   Error: {error}");
    match error {
        DeskError::Configuration(_) => exit_code::CONFIGURATION,
        DeskError::Storage(_) | DeskError::Io(_) | DeskError::Serialization(_) => exit_code::STORAGE,
        DeskError::Validation(_) | DeskError::Other(_) => exit_code::FATAL,
    }
}

fn report_storage(error: &DeskError) -> i32 {
    report_failure(error, "Failed to open storage")
}

/// Parses an appointment time
///
/// Accepts RFC 3339 (`2025-01-15T14:00:00Z`) or a local
/// `YYYY-MM-DD HH:MM` / `YYYY-MM-DDTHH:MM`.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|at| at.with_timezone(&Utc))
                .ok_or_else(|| format!("'{value}' does not exist in the local time zone"));
        }
    }
    Err(format!(
        "Invalid date/time '{value}'. Use RFC 3339 or 'YYYY-MM-DD HH:MM'"
    ))
}

/// Parses a calendar date `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{value}'. Use YYYY-MM-DD"))
}

/// Renders a timestamp as wall-clock time in `tz`
pub fn display_time<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}
