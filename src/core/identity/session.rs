//! Signed-in session state
//!
//! [`IdentityStore`] holds the current user, validates credentials against the
//! [`Roster`], and mirrors the session to the key-value backend under
//! [`SESSION_KEY`].

use super::roster::Roster;
use crate::adapters::storage::KeyValueStore;
use crate::domain::{Result, User};
use std::sync::Arc;
use std::time::Duration;

/// Backend key holding the serialized session user
pub const SESSION_KEY: &str = "dental_user";

/// Current-user store
pub struct IdentityStore {
    storage: Arc<dyn KeyValueStore>,
    roster: Roster,
    login_delay: Duration,
    current: Option<User>,
}

impl IdentityStore {
    /// Restores the persisted session, if any
    ///
    /// A session blob that fails to parse is discarded: the key is removed
    /// and the store starts signed out.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read.
    pub fn restore(
        storage: Arc<dyn KeyValueStore>,
        roster: Roster,
        login_delay: Duration,
    ) -> Result<Self> {
        let current = match storage.get(SESSION_KEY)? {
            None => None,
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    tracing::debug!(user_id = %user.id, role = %user.role, "Restored session");
                    Some(user)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding corrupt session data");
                    if let Err(remove_err) = storage.remove(SESSION_KEY) {
                        tracing::warn!(error = %remove_err, "Failed to remove corrupt session data");
                    }
                    None
                }
            },
        };

        Ok(Self {
            storage,
            roster,
            login_delay,
            current,
        })
    }

    /// Signs in with exact email and password
    ///
    /// Waits for the configured delay first so callers can show a pending
    /// state. On a match the account (without password) becomes the session
    /// and is persisted; otherwise the session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting a successful session fails.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        let Some(user) = self.roster.authenticate(email, password).cloned() else {
            tracing::info!("Sign-in rejected");
            return Ok(false);
        };

        let raw = serde_json::to_string(&user)?;
        self.storage.set(SESSION_KEY, &raw)?;
        tracing::info!(user_id = %user.id, role = %user.role, "Signed in");
        self.current = Some(user);
        Ok(true)
    }

    /// Clears the session and its persisted copy
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the removal.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, "Signed out");
        }
        self.storage.remove(SESSION_KEY)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn login_delay(&self) -> Duration {
        self.login_delay
    }
}
