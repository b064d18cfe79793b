//! Interactive paging sessions.
//!
//! One session drives one posted message: it owns the entry source, the set
//! of principals allowed to press its buttons and an idle timeout.

mod error;
mod interactive;

use std::fmt;
use std::time::Duration;

pub use error::SessionError;
pub use interactive::{Advance, InteractiveSession};

/// Idle time after which a session stops responding.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(600);

/// `Active -> Expired` and `Active -> Closed`; nothing leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Expired,
    Closed,
}

impl SessionState {
    pub fn is_active(self) -> bool {
        matches!(self, SessionState::Active)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Active => "active",
            SessionState::Expired => "expired",
            SessionState::Closed => "closed",
        };
        f.write_str(s)
    }
}
