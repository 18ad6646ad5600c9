//! Fixed account roster
//!
//! Sign-in is mocked: the only accounts are the three below, and credentials
//! are matched exactly.

use crate::config::{secret_matches, secret_string, SecretString};
use crate::domain::{PatientId, User, UserId, UserRole};

/// One roster entry: the account plus its password
#[derive(Debug, Clone)]
pub struct RosterAccount {
    pub user: User,
    password: SecretString,
}

impl RosterAccount {
    pub fn new(user: User, password: impl Into<String>) -> Self {
        Self {
            user,
            password: secret_string(password.into()),
        }
    }

    fn accepts(&self, email: &str, password: &str) -> bool {
        self.user.email == email && secret_matches(&self.password, password)
    }
}

/// The set of accounts that may sign in
#[derive(Debug, Clone)]
pub struct Roster {
    accounts: Vec<RosterAccount>,
}

impl Roster {
    pub fn new(accounts: Vec<RosterAccount>) -> Self {
        Self { accounts }
    }

    /// The practice's built-in accounts
    pub fn builtin() -> Self {
        let patient = |id: &str, email: &str, name: &str, avatar: &str, patient_id: &str| {
            RosterAccount::new(
                User {
                    id: UserId(id.to_string()),
                    role: UserRole::Patient,
                    email: email.to_string(),
                    name: name.to_string(),
                    avatar: avatar.to_string(),
                    patient_id: Some(PatientId(patient_id.to_string())),
                    specialty: None,
                },
                "patient123",
            )
        };

        Self::new(vec![
            RosterAccount::new(
                User {
                    id: UserId("1".to_string()),
                    role: UserRole::Admin,
                    email: "admin@entnt.in".to_string(),
                    name: "Dr. Arya Singh".to_string(),
                    avatar: "👩‍⚕️".to_string(),
                    patient_id: None,
                    specialty: Some("General Dentistry".to_string()),
                },
                "admin123",
            ),
            patient("2", "john@entnt.in", "John Doe", "👨", "p1"),
            patient("3", "jane@entnt.in", "Jane Smith", "👩", "p2"),
        ])
    }

    /// Returns the account matching both email and password exactly
    ///
    /// An unknown email and a wrong password are indistinguishable.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&User> {
        self.accounts
            .iter()
            .find(|account| account.accepts(email, password))
            .map(|account| &account.user)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::builtin()
    }
}
