//! Periodic eviction of idle sessions.

use std::sync::Arc;

use flakerank_shared::{ActionRow, MessageEdit};

use crate::infrastructure::ports::MessagingPort;
use crate::stores::SessionRegistry;

/// Sweeps expired sessions and strips the Next button from their messages.
///
/// The message itself stays; its delete button keeps working because the
/// token is self-describing.
pub struct ExpireSessions {
    registry: Arc<SessionRegistry>,
    messaging: Arc<dyn MessagingPort>,
}

impl ExpireSessions {
    pub fn new(registry: Arc<SessionRegistry>, messaging: Arc<dyn MessagingPort>) -> Self {
        Self {
            registry,
            messaging,
        }
    }

    /// Returns how many sessions were evicted.
    pub async fn execute(&self) -> usize {
        let evicted = self.registry.sweep_expired().await;

        for session in &evicted {
            let edit = MessageEdit::components(vec![ActionRow::delete_only(session.delete_token.encode())]);
            if let Err(e) = self.messaging.update_message(session.message_id, edit).await {
                tracing::warn!(
                    message_id = %session.message_id,
                    session_id = %session.session_id,
                    error = %e,
                    "Failed to unbind controls of expired session"
                );
            }
        }

        evicted.len()
    }
}
