//! Shared tail of every paged command: first entry, post, register.

use std::sync::Arc;
use std::time::Duration;

use flakerank_domain::{AuthorizedPrincipals, RankingQuery};
use flakerank_shared::{ActionRow, CommandInvocation, OutgoingMessage};

use super::{CommandError, CommandOutcome, ENTRY_NOT_FOUND};
use crate::infrastructure::ports::{ClockPort, MessagingPort, RankingApiPort};
use crate::paging::PaginatedResultSource;
use crate::session::{Advance, InteractiveSession, SessionError};
use crate::stores::SessionRegistry;

/// Opens an interactive paged message for a ranking query.
///
/// The invoking user is the only owner. The first entry is pulled before
/// anything is posted; if there is none, or the first page fails, the user
/// gets an ephemeral "Entry not found" and no session is registered.
pub struct OpenSession {
    ranking: Arc<dyn RankingApiPort>,
    messaging: Arc<dyn MessagingPort>,
    clock: Arc<dyn ClockPort>,
    registry: Arc<SessionRegistry>,
    session_timeout: Duration,
}

impl OpenSession {
    pub fn new(
        ranking: Arc<dyn RankingApiPort>,
        messaging: Arc<dyn MessagingPort>,
        clock: Arc<dyn ClockPort>,
        registry: Arc<SessionRegistry>,
        session_timeout: Duration,
    ) -> Self {
        Self {
            ranking,
            messaging,
            clock,
            registry,
            session_timeout,
        }
    }

    pub async fn execute(
        &self,
        invocation: &CommandInvocation,
        query: RankingQuery,
    ) -> Result<CommandOutcome, CommandError> {
        let label = query.label();
        let source = PaginatedResultSource::new(self.ranking.clone(), self.clock.clone(), query);
        let mut session = InteractiveSession::new(
            Box::new(source),
            AuthorizedPrincipals::single(invocation.user_id),
            self.session_timeout,
            self.clock.clone(),
        );

        let first = match session.advance(&invocation.requester()).await {
            Ok(Advance::Entry(entry)) => entry,
            Ok(Advance::NoMoreEntries) => {
                tracing::info!(query = %label, "Query returned no entries");
                return self.not_found(invocation).await;
            }
            Err(SessionError::Upstream(e)) => {
                tracing::warn!(query = %label, error = %e, "First page failed");
                return self.not_found(invocation).await;
            }
            Err(e) => return Err(CommandError::Session(e)),
        };

        let controls = ActionRow::paginator(session.delete_token().encode());
        let message_id = self
            .messaging
            .post_message(invocation.channel_id, OutgoingMessage::entry(first, vec![controls]))
            .await?;

        let bound = self.registry.register(message_id, session).await;
        tracing::info!(
            message_id = %message_id,
            session_id = %bound.session_id,
            user_id = %invocation.user_id,
            query = %label,
            "Opened paged message"
        );

        Ok(CommandOutcome::Opened {
            message_id,
            session_id: bound.session_id,
        })
    }

    async fn not_found(&self, invocation: &CommandInvocation) -> Result<CommandOutcome, CommandError> {
        self.messaging
            .acknowledge_ephemeral(invocation.interaction_id, invocation.user_id, ENTRY_NOT_FOUND)
            .await?;
        Ok(CommandOutcome::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::ports::{MockMessagingPort, MockRankingApiPort, UpstreamFetchError};
    use crate::test_fixtures::{page_of, CHANNEL, INTERACTION, MESSAGE, OWNER};
    use flakerank_domain::{DeleteButtonToken, WeightVector};
    use flakerank_shared::{FractalCommand, NEXT_CUSTOM_ID};

    fn invocation() -> CommandInvocation {
        CommandInvocation {
            interaction_id: INTERACTION,
            channel_id: CHANNEL,
            user_id: OWNER,
            role_ids: Vec::new(),
            command: FractalCommand::Help,
        }
    }

    fn query() -> RankingQuery {
        RankingQuery::weighted(WeightVector::default()).expect("valid weights")
    }

    fn use_case(
        ranking: MockRankingApiPort,
        messaging: MockMessagingPort,
        registry: Arc<SessionRegistry>,
    ) -> OpenSession {
        OpenSession::new(
            Arc::new(ranking),
            Arc::new(messaging),
            Arc::new(SystemClock::new()),
            registry,
            Duration::from_secs(600),
        )
    }

    #[tokio::test]
    async fn posts_first_entry_and_registers_session() {
        let mut ranking = MockRankingApiPort::new();
        ranking
            .expect_fetch_page()
            .withf(|_, page| *page == 1)
            .times(1)
            .returning(|_, _| Ok(page_of(0, 2)));

        let mut messaging = MockMessagingPort::new();
        messaging
            .expect_post_message()
            .withf(|channel, message| {
                let row = &message.components[0];
                *channel == CHANNEL
                    && message.card.as_ref().map(|c| c.title.as_str()) == Some("Fractal 0")
                    && row.has_custom_id(NEXT_CUSTOM_ID)
                    && row.has_custom_id("AUTHOR_DELETE_BUTTON:111")
            })
            .times(1)
            .returning(|_, _| Ok(MESSAGE));

        let registry = Arc::new(SessionRegistry::new());
        let outcome = use_case(ranking, messaging, registry.clone())
            .execute(&invocation(), query())
            .await
            .expect("opened");

        let CommandOutcome::Opened { message_id, session_id } = outcome else {
            panic!("expected an opened session, got {outcome:?}");
        };
        assert_eq!(message_id, MESSAGE);
        assert!(registry.is_current(MESSAGE, session_id).await);

        let bound = registry.lookup(MESSAGE).await.into_bound().expect("bound");
        let session = bound.handle.lock().await;
        assert_eq!(
            session.delete_token(),
            DeleteButtonToken::new(AuthorizedPrincipals::single(OWNER))
        );
    }

    #[tokio::test]
    async fn first_page_failure_replies_entry_not_found() {
        let mut ranking = MockRankingApiPort::new();
        ranking
            .expect_fetch_page()
            .times(1)
            .returning(|_, page| Err(UpstreamFetchError::Status { page, status: 500 }));

        let mut messaging = MockMessagingPort::new();
        messaging.expect_post_message().never();
        messaging
            .expect_acknowledge_ephemeral()
            .withf(|interaction, user, text| {
                *interaction == INTERACTION && *user == OWNER && text == "Entry not found"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let registry = Arc::new(SessionRegistry::new());
        let outcome = use_case(ranking, messaging, registry.clone())
            .execute(&invocation(), query())
            .await
            .expect("handled");

        assert_eq!(outcome, CommandOutcome::NotFound);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn empty_first_page_replies_entry_not_found() {
        let mut ranking = MockRankingApiPort::new();
        ranking.expect_fetch_page().returning(|_, _| Ok(Vec::new()));

        let mut messaging = MockMessagingPort::new();
        messaging
            .expect_acknowledge_ephemeral()
            .withf(|_, _, text| text == "Entry not found")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let outcome = use_case(ranking, messaging, Arc::new(SessionRegistry::new()))
            .execute(&invocation(), RankingQuery::by_name("nothing"))
            .await
            .expect("handled");

        assert_eq!(outcome, CommandOutcome::NotFound);
    }
}
