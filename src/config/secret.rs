//! Credential handling using the secrecy crate
//!
//! Roster passwords are kept as [`SecretString`]: memory is zeroed on drop,
//! `Debug` output is redacted, and comparing against a candidate goes through
//! [`secret_matches`] instead of exposing the value to callers.
//!
//! # Example
//!
//! ```rust
//! use dentaldesk::config::{secret_matches, secret_string};
//!
//! let password = secret_string("admin123");
//! assert!(secret_matches(&password, "admin123"));
//! assert!(!format!("{password:?}").contains("admin123"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl From<&str> for SecretValue {
    fn from(s: &str) -> Self {
        SecretValue(s.to_string())
    }
}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compares without short-circuiting on the first differing byte
    fn matches(&self, candidate: &str) -> bool {
        let stored = self.0.as_bytes();
        let candidate = candidate.as_bytes();
        if stored.len() != candidate.len() {
            return false;
        }
        stored
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Wraps `value` in a [`SecretString`]
#[inline]
pub fn secret_string(value: impl Into<SecretValue>) -> SecretString {
    Secret::new(value.into())
}

/// True if `secret` equals `candidate`
pub fn secret_matches(secret: &SecretString, candidate: &str) -> bool {
    secret.expose_secret().matches(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_matches() {
        let secret = secret_string("patient123");
        assert!(secret_matches(&secret, "patient123"));
        assert!(!secret_matches(&secret, "patient12"));
        assert!(!secret_matches(&secret, "patient124"));
        assert!(!secret_matches(&secret, ""));
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive-data"));
        assert!(debug_output.contains("REDACTED") || debug_output.contains("Secret"));
    }

    #[test]
    fn test_secret_clone_keeps_value() {
        let secret = secret_string("admin123");
        let cloned = secret.clone();
        assert!(secret_matches(&cloned, "admin123"));
        assert!(!cloned.expose_secret().is_empty());
    }
}
