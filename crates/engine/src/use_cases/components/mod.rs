//! Component (button) use cases.

mod expire_sessions;
mod handle_component;

use std::sync::Arc;

use crate::infrastructure::ports::MessagingError;
use crate::session::SessionError;

pub use expire_sessions::ExpireSessions;
pub use handle_component::HandleComponent;

/// Reply to a press from someone who does not own the message.
pub const NOT_OWNER: &str = "You do not own this message";
/// Reply to a press on a message with no live session.
pub const STALE_SESSION: &str = "This session is no longer active.";
/// Reply when "next" runs past the last entry.
pub const NO_MORE_ENTRIES: &str = "No more entries.";

#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// No live session is bound to the pressed message.
    #[error("No active session for this message")]
    StaleSession,
    #[error("Session error: {0}")]
    Session(SessionError),
    #[error(transparent)]
    Messaging(#[from] MessagingError),
}

/// Container for component use cases.
pub struct ComponentUseCases {
    pub handle: Arc<HandleComponent>,
    pub expire: Arc<ExpireSessions>,
}

impl ComponentUseCases {
    pub fn new(handle: Arc<HandleComponent>, expire: Arc<ExpireSessions>) -> Self {
        Self { handle, expire }
    }
}
