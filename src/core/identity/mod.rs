// Sign-in, session persistence and view access

pub mod guard;
pub mod roster;
pub mod session;

pub use guard::{authorize, Access, View};
pub use roster::{Roster, RosterAccount};
pub use session::{IdentityStore, SESSION_KEY};
