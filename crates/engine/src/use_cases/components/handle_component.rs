//! Button presses on paged messages.

use std::sync::Arc;

use flakerank_domain::DeleteButtonToken;
use flakerank_shared::{
    ActionRow, ComponentInteraction, InteractionOutcome, MessageEdit, NEXT_CUSTOM_ID,
};

use super::{ComponentError, NOT_OWNER, NO_MORE_ENTRIES, STALE_SESSION};
use crate::infrastructure::ports::{MessagingPort, UpstreamFetchError};
use crate::session::{Advance, SessionError, SessionState};
use crate::stores::{BoundSession, Lookup, SessionRegistry};

/// Dispatches a component interaction.
///
/// Delete buttons are checked against their own token and need no live
/// session. "Next" presses are routed through the registry; a press that
/// completes after its session was replaced, closed or expired is
/// discarded.
pub struct HandleComponent {
    registry: Arc<SessionRegistry>,
    messaging: Arc<dyn MessagingPort>,
}

impl HandleComponent {
    pub fn new(registry: Arc<SessionRegistry>, messaging: Arc<dyn MessagingPort>) -> Self {
        Self {
            registry,
            messaging,
        }
    }

    pub async fn execute(&self, event: &ComponentInteraction) -> Result<InteractionOutcome, ComponentError> {
        match DeleteButtonToken::parse(&event.custom_id) {
            Ok(Some(token)) => return self.delete(event, &token).await,
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(custom_id = %event.custom_id, error = %e, "Ignoring malformed delete token");
                return Ok(InteractionOutcome::Ignored);
            }
        }

        if event.custom_id != NEXT_CUSTOM_ID {
            tracing::debug!(custom_id = %event.custom_id, "Ignoring foreign component");
            return Ok(InteractionOutcome::Ignored);
        }

        match self.next(event).await {
            Ok(()) => Ok(InteractionOutcome::Handled),
            Err(ComponentError::StaleSession) => {
                self.reply(event, STALE_SESSION).await?;
                Ok(InteractionOutcome::Handled)
            }
            Err(ComponentError::Session(SessionError::Unauthorized)) => {
                self.reply(event, NOT_OWNER).await?;
                Ok(InteractionOutcome::Handled)
            }
            Err(e) => Err(e),
        }
    }

    async fn delete(
        &self,
        event: &ComponentInteraction,
        token: &DeleteButtonToken,
    ) -> Result<InteractionOutcome, ComponentError> {
        let requester = event.requester();
        if !token.authorizes(&requester) {
            tracing::info!(
                message_id = %event.message_id,
                user_id = %event.user_id,
                "Rejected delete from non-owner"
            );
            self.reply(event, NOT_OWNER).await?;
            return Ok(InteractionOutcome::Handled);
        }

        // No binding is fine: the token alone authorizes the delete.
        if let Some(bound) = self.registry.unregister(event.message_id).await {
            let mut session = bound.handle.lock().await;
            if let Err(e) = session.close(&requester) {
                tracing::debug!(session_id = %bound.session_id, error = %e, "Session not closable, releasing");
                session.release();
            }
        }

        self.messaging.delete_message(event.message_id).await?;
        tracing::info!(message_id = %event.message_id, user_id = %event.user_id, "Deleted paged message");
        Ok(InteractionOutcome::Handled)
    }

    async fn next(&self, event: &ComponentInteraction) -> Result<(), ComponentError> {
        let requester = event.requester();
        let bound = match self.registry.lookup(event.message_id).await {
            Lookup::Bound(bound) => bound,
            Lookup::Expired(evicted) => {
                self.strip_next(event, &evicted.delete_token).await?;
                return Err(ComponentError::StaleSession);
            }
            Lookup::Missing => return Err(ComponentError::StaleSession),
        };

        let (result, delete_token) = {
            let mut session = bound.handle.lock().await;
            let result = session.advance(&requester).await;
            (result, session.delete_token())
        };

        if let Err(SessionError::Inactive(state)) = &result {
            tracing::debug!(session_id = %bound.session_id, state = %state, "Press on inactive session");
            let detached = self.registry.detach(event.message_id, bound.session_id).await;
            // Closed sessions already had their controls replaced by whoever closed them.
            if detached.is_some() && *state == SessionState::Expired {
                self.strip_next(event, &delete_token).await?;
            }
            return Err(ComponentError::StaleSession);
        }

        // The binding may have changed while the page was in flight.
        if !self.registry.is_current(event.message_id, bound.session_id).await {
            tracing::info!(
                message_id = %event.message_id,
                session_id = %bound.session_id,
                "Discarding result for replaced session"
            );
            return Err(ComponentError::StaleSession);
        }

        match result {
            Ok(Advance::Entry(entry)) => {
                self.messaging
                    .update_message(event.message_id, MessageEdit::entry(entry))
                    .await?;
                Ok(())
            }
            Ok(Advance::NoMoreEntries) => self.finish(event, &bound, &delete_token, None).await,
            Err(SessionError::Upstream(e)) => self.finish(event, &bound, &delete_token, Some(e)).await,
            Err(e) => Err(ComponentError::Session(e)),
        }
    }

    /// End of the sequence: unbind, keep only the delete button.
    async fn finish(
        &self,
        event: &ComponentInteraction,
        bound: &BoundSession,
        delete_token: &DeleteButtonToken,
        cause: Option<UpstreamFetchError>,
    ) -> Result<(), ComponentError> {
        match &cause {
            Some(e) => tracing::warn!(session_id = %bound.session_id, error = %e, "Ending session after failed page"),
            None => tracing::info!(session_id = %bound.session_id, "Session exhausted"),
        }

        if let Some(detached) = self.registry.detach(event.message_id, bound.session_id).await {
            detached.handle.lock().await.release();
        }

        self.strip_next(event, delete_token).await?;
        self.reply(event, NO_MORE_ENTRIES).await
    }

    /// Replace the controls with a lone delete button.
    async fn strip_next(
        &self,
        event: &ComponentInteraction,
        delete_token: &DeleteButtonToken,
    ) -> Result<(), ComponentError> {
        self.messaging
            .update_message(
                event.message_id,
                MessageEdit::components(vec![ActionRow::delete_only(delete_token.encode())]),
            )
            .await?;
        Ok(())
    }

    async fn reply(&self, event: &ComponentInteraction, text: &str) -> Result<(), ComponentError> {
        self.messaging
            .acknowledge_ephemeral(event.interaction_id, event.user_id, text)
            .await?;
        Ok(())
    }
}
