//! Access guard for front-end views
//!
//! Session presence and role are the only authorization signal: no session
//! sends the caller to sign-in, and a non-admin on an admin-only view is sent
//! back to the default view.

use crate::domain::{User, UserRole};
use std::fmt;

/// A screen the front end can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Default landing view, any signed-in user
    Dashboard,
    /// Patient directory, admin only
    Patients,
    /// Appointment management, admin only
    Appointments,
    /// Practice calendar, admin only
    Calendar,
    /// The signed-in patient's own history, any signed-in user
    MyAppointments,
}

impl View {
    pub fn admin_only(self) -> bool {
        matches!(self, View::Patients | View::Appointments | View::Calendar)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Dashboard => "dashboard",
            View::Patients => "patients",
            View::Appointments => "appointments",
            View::Calendar => "calendar",
            View::MyAppointments => "my-appointments",
        };
        f.write_str(name)
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
    RedirectToHome,
}

/// Decides whether `session` may open `view`
pub fn authorize(session: Option<&User>, view: View) -> Access {
    match session {
        None => Access::RedirectToLogin,
        Some(user) if view.admin_only() && user.role != UserRole::Admin => {
            tracing::debug!(user_id = %user.id, view = %view, "Admin-only view refused");
            Access::RedirectToHome
        }
        Some(_) => Access::Granted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use test_case::test_case;

    fn user(role: UserRole) -> User {
        User {
            id: UserId::new("9").unwrap(),
            role,
            email: "someone@entnt.in".to_string(),
            name: "Someone".to_string(),
            avatar: String::new(),
            patient_id: None,
            specialty: None,
        }
    }

    #[test_case(None, View::Dashboard, Access::RedirectToLogin)]
    #[test_case(None, View::Patients, Access::RedirectToLogin)]
    #[test_case(Some(UserRole::Patient), View::Dashboard, Access::Granted)]
    #[test_case(Some(UserRole::Patient), View::MyAppointments, Access::Granted)]
    #[test_case(Some(UserRole::Patient), View::Patients, Access::RedirectToHome)]
    #[test_case(Some(UserRole::Patient), View::Appointments, Access::RedirectToHome)]
    #[test_case(Some(UserRole::Patient), View::Calendar, Access::RedirectToHome)]
    #[test_case(Some(UserRole::Admin), View::Calendar, Access::Granted)]
    #[test_case(Some(UserRole::Admin), View::MyAppointments, Access::Granted)]
    fn test_authorize(role: Option<UserRole>, view: View, expected: Access) {
        let session = role.map(user);
        assert_eq!(authorize(session.as_ref(), view), expected);
    }
}
