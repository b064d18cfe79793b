//! The per-message session state machine.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use flakerank_domain::{AuthorizedPrincipals, DeleteButtonToken, MessageId, Requester, SessionId};
use flakerank_shared::RenderedEntry;

use super::{SessionError, SessionState};
use crate::infrastructure::ports::ClockPort;
use crate::paging::EntrySource;

/// Result of a successful [`InteractiveSession::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Entry(RenderedEntry),
    /// The source is exhausted. The session stays `Active`.
    NoMoreEntries,
}

/// Couples an entry source to a posted message.
///
/// Every operation checks authorization first, so a rejected requester never
/// changes the state, the idle timer or the source position. Expiry is
/// evaluated lazily against the injected clock.
pub struct InteractiveSession {
    id: SessionId,
    source: Box<dyn EntrySource>,
    owners: AuthorizedPrincipals,
    bound_message: Option<MessageId>,
    last_activity: DateTime<Utc>,
    timeout: Duration,
    state: SessionState,
    clock: Arc<dyn ClockPort>,
}

impl InteractiveSession {
    pub fn new(
        source: Box<dyn EntrySource>,
        owners: AuthorizedPrincipals,
        timeout: Duration,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let now = clock.now();
        Self {
            id: SessionId::new(),
            source,
            owners,
            bound_message: None,
            last_activity: now,
            timeout,
            state: SessionState::Active,
            clock,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn owners(&self) -> &AuthorizedPrincipals {
        &self.owners
    }

    pub fn bound_message(&self) -> Option<MessageId> {
        self.bound_message
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// Token for the delete button, carrying the same owners.
    pub fn delete_token(&self) -> DeleteButtonToken {
        DeleteButtonToken::new(self.owners.clone())
    }

    pub(crate) fn bind(&mut self, message_id: MessageId) {
        self.bound_message = Some(message_id);
    }

    /// Move to `Expired` if the idle timeout has elapsed. Returns the
    /// resulting state.
    pub fn refresh_expiry(&mut self) -> SessionState {
        if self.state.is_active() {
            let idle = (self.clock.now() - self.last_activity)
                .to_std()
                .unwrap_or_default();
            if idle >= self.timeout {
                self.state = SessionState::Expired;
                tracing::info!(
                    session_id = %self.id,
                    idle_secs = idle.as_secs(),
                    "Session expired"
                );
            }
        }
        self.state
    }

    /// Pull the next entry for `requester`.
    pub async fn advance(&mut self, requester: &Requester) -> Result<Advance, SessionError> {
        self.authorize(requester)?;
        self.ensure_active()?;

        let next = self.source.next_entry().await?;
        self.last_activity = self.clock.now();
        Ok(match next {
            Some(entry) => Advance::Entry(entry),
            None => Advance::NoMoreEntries,
        })
    }

    /// Close on behalf of `requester`.
    pub fn close(&mut self, requester: &Requester) -> Result<(), SessionError> {
        self.authorize(requester)?;
        self.ensure_active()?;
        self.state = SessionState::Closed;
        self.last_activity = self.clock.now();
        tracing::info!(session_id = %self.id, user_id = %requester.user_id, "Session closed");
        Ok(())
    }

    /// Close without an authorization check. Used by the registry when a
    /// binding is replaced, torn down or exhausted.
    pub(crate) fn release(&mut self) {
        if self.state.is_active() {
            self.state = SessionState::Closed;
            tracing::debug!(session_id = %self.id, "Session released");
        }
    }

    fn authorize(&self, requester: &Requester) -> Result<(), SessionError> {
        if self.owners.permits_requester(requester) {
            Ok(())
        } else {
            tracing::info!(
                session_id = %self.id,
                user_id = %requester.user_id,
                "Rejected interaction from non-owner"
            );
            Err(SessionError::Unauthorized)
        }
    }

    fn ensure_active(&mut self) -> Result<(), SessionError> {
        match self.refresh_expiry() {
            SessionState::Active => Ok(()),
            state => Err(SessionError::Inactive(state)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::ManualClock;
    use crate::infrastructure::ports::UpstreamFetchError;
    use crate::paging::MockEntrySource;
    use crate::test_fixtures::{entry, manual_clock, owners, MOD_ROLE, OWNER, STRANGER};
    use flakerank_domain::PrincipalId;

    fn session(source: MockEntrySource, clock: Arc<ManualClock>) -> InteractiveSession {
        InteractiveSession::new(Box::new(source), owners(), Duration::from_secs(600), clock)
    }

    #[tokio::test]
    async fn owner_advances_through_entries() {
        let mut source = MockEntrySource::new();
        let mut titles = vec!["second", "first"];
        source
            .expect_next_entry()
            .times(2)
            .returning(move || Ok(titles.pop().map(entry)));

        let mut session = session(source, manual_clock());
        let owner = Requester::user(OWNER);

        assert_eq!(
            session.advance(&owner).await,
            Ok(Advance::Entry(entry("first")))
        );
        assert_eq!(
            session.advance(&owner).await,
            Ok(Advance::Entry(entry("second")))
        );
    }

    #[tokio::test]
    async fn role_grant_authorizes() {
        let mut source = MockEntrySource::new();
        source
            .expect_next_entry()
            .times(1)
            .returning(|| Ok(Some(entry("x"))));

        let mut session = session(source, manual_clock());
        let moderator = Requester::new(STRANGER, vec![MOD_ROLE]);

        assert!(session.advance(&moderator).await.is_ok());
    }

    #[tokio::test]
    async fn stranger_is_rejected_without_side_effects() {
        let mut source = MockEntrySource::new();
        source.expect_next_entry().never();

        let clock = manual_clock();
        let mut session = session(source, clock.clone());
        let created = session.last_activity();
        clock.advance(chrono::Duration::minutes(5));

        let stranger = Requester::new(STRANGER, vec![PrincipalId::new(999)]);
        assert_eq!(
            session.advance(&stranger).await,
            Err(SessionError::Unauthorized)
        );
        assert_eq!(session.close(&stranger), Err(SessionError::Unauthorized));
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.last_activity(), created);
    }

    #[tokio::test]
    async fn exhaustion_keeps_session_active() {
        let mut source = MockEntrySource::new();
        source.expect_next_entry().returning(|| Ok(None));

        let mut session = session(source, manual_clock());
        assert_eq!(
            session.advance(&Requester::user(OWNER)).await,
            Ok(Advance::NoMoreEntries)
        );
        assert_eq!(session.state(), SessionState::Active);
    }

    #[tokio::test]
    async fn upstream_failure_is_surfaced() {
        let mut source = MockEntrySource::new();
        source
            .expect_next_entry()
            .returning(|| Err(UpstreamFetchError::Status { page: 1, status: 500 }));

        let mut session = session(source, manual_clock());
        let err = session
            .advance(&Requester::user(OWNER))
            .await
            .expect_err("upstream failure");
        assert!(matches!(err, SessionError::Upstream(e) if e.status() == Some(500)));
    }

    #[tokio::test]
    async fn idle_timeout_expires_the_session() {
        let mut source = MockEntrySource::new();
        source.expect_next_entry().never();

        let clock = manual_clock();
        let mut session = session(source, clock.clone());
        clock.advance(chrono::Duration::minutes(10));

        assert_eq!(
            session.advance(&Requester::user(OWNER)).await,
            Err(SessionError::Inactive(SessionState::Expired))
        );
        // Terminal: close cannot revive or re-label it.
        assert_eq!(
            session.close(&Requester::user(OWNER)),
            Err(SessionError::Inactive(SessionState::Expired))
        );
    }

    #[tokio::test]
    async fn activity_pushes_back_the_deadline() {
        let mut source = MockEntrySource::new();
        source.expect_next_entry().returning(|| Ok(Some(entry("x"))));

        let clock = manual_clock();
        let mut session = session(source, clock.clone());
        let owner = Requester::user(OWNER);

        clock.advance(chrono::Duration::minutes(9));
        assert!(session.advance(&owner).await.is_ok());
        clock.advance(chrono::Duration::minutes(9));
        assert_eq!(session.refresh_expiry(), SessionState::Active);
        clock.advance(chrono::Duration::minutes(1));
        assert_eq!(session.refresh_expiry(), SessionState::Expired);
    }

    #[tokio::test]
    async fn closed_is_final() {
        let mut source = MockEntrySource::new();
        source.expect_next_entry().never();

        let mut session = session(source, manual_clock());
        let owner = Requester::user(OWNER);

        session.close(&owner).expect("owner may close");
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(
            session.advance(&owner).await,
            Err(SessionError::Inactive(SessionState::Closed))
        );
    }

    #[test]
    fn delete_token_carries_the_owners() {
        let session = session(MockEntrySource::new(), manual_clock());
        assert_eq!(
            session.delete_token().encode(),
            "AUTHOR_DELETE_BUTTON:111,222"
        );
    }
}
