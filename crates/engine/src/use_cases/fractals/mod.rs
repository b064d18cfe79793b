//! Fractal command use cases.
//!
//! Handles the `/fractals` command group:
//! - `browse` ranks by weighted stats
//! - `search` looks fractals up by name
//! - `help` explains both
//!
//! `browse` and `search` end in [`OpenSession`], which posts the first
//! entry and registers an interactive session for the message.

mod browse;
mod help;
mod open_session;
mod search;

use std::sync::Arc;

use flakerank_domain::{MessageId, SessionId};
use flakerank_shared::{CommandInvocation, FractalCommand};

use crate::infrastructure::ports::{MessagingError, MessagingPort};
use crate::session::SessionError;

pub use browse::BrowseFractals;
pub use help::{FractalHelp, HELP_TEXT};
pub use open_session::OpenSession;
pub use search::SearchFractals;

/// Ephemeral reply when a query yields nothing or its first page fails.
pub const ENTRY_NOT_FOUND: &str = "Entry not found";

const UNKNOWN_COMMAND: &str = "Unknown command. Try `/fractals help`.";

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A paged message was posted and its session registered.
    Opened {
        message_id: MessageId,
        session_id: SessionId,
    },
    /// No entries; "Entry not found" was sent.
    NotFound,
    /// Input was refused with an ephemeral explanation.
    Rejected,
    /// An informational ephemeral reply was sent.
    Replied,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Session error: {0}")]
    Session(SessionError),
    #[error(transparent)]
    Messaging(#[from] MessagingError),
}

/// Container for fractal command use cases.
pub struct FractalUseCases {
    pub browse: Arc<BrowseFractals>,
    pub search: Arc<SearchFractals>,
    pub help: Arc<FractalHelp>,
    messaging: Arc<dyn MessagingPort>,
}

impl FractalUseCases {
    pub fn new(
        browse: Arc<BrowseFractals>,
        search: Arc<SearchFractals>,
        help: Arc<FractalHelp>,
        messaging: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            browse,
            search,
            help,
            messaging,
        }
    }

    /// Route a `/fractals` invocation to its use case.
    pub async fn handle(&self, invocation: &CommandInvocation) -> Result<CommandOutcome, CommandError> {
        tracing::debug!(
            interaction_id = %invocation.interaction_id,
            user_id = %invocation.user_id,
            command = ?invocation.command,
            "Handling fractal command"
        );

        match &invocation.command {
            FractalCommand::Browse { .. } => {
                let weights = invocation.command.browse_weights().unwrap_or([1; 6]);
                self.browse.execute(invocation, weights).await
            }
            FractalCommand::Search { name } => self.search.execute(invocation, name).await,
            FractalCommand::Help => self.help.execute(invocation).await,
            FractalCommand::Unknown => {
                self.messaging
                    .acknowledge_ephemeral(invocation.interaction_id, invocation.user_id, UNKNOWN_COMMAND)
                    .await?;
                Ok(CommandOutcome::Rejected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::ports::{MockMessagingPort, MockRankingApiPort};
    use crate::stores::SessionRegistry;
    use crate::test_fixtures::{CHANNEL, INTERACTION, OWNER};

    fn use_cases(messaging: MockMessagingPort) -> FractalUseCases {
        let messaging: Arc<dyn MessagingPort> = Arc::new(messaging);
        let mut ranking = MockRankingApiPort::new();
        ranking.expect_fetch_page().never();
        let open = Arc::new(OpenSession::new(
            Arc::new(ranking),
            messaging.clone(),
            Arc::new(SystemClock::new()),
            Arc::new(SessionRegistry::new()),
            Duration::from_secs(600),
        ));
        FractalUseCases::new(
            Arc::new(BrowseFractals::new(open.clone(), messaging.clone())),
            Arc::new(SearchFractals::new(open, messaging.clone())),
            Arc::new(FractalHelp::new(messaging.clone())),
            messaging,
        )
    }

    fn invocation(command: FractalCommand) -> CommandInvocation {
        CommandInvocation {
            interaction_id: INTERACTION,
            channel_id: CHANNEL,
            user_id: OWNER,
            role_ids: Vec::new(),
            command,
        }
    }

    #[tokio::test]
    async fn routes_help() {
        let mut messaging = MockMessagingPort::new();
        messaging
            .expect_acknowledge_ephemeral()
            .withf(|_, _, text| text == HELP_TEXT)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let outcome = use_cases(messaging)
            .handle(&invocation(FractalCommand::Help))
            .await
            .expect("handled");
        assert_eq!(outcome, CommandOutcome::Replied);
    }

    #[tokio::test]
    async fn unknown_command_gets_a_pointer_to_help() {
        let mut messaging = MockMessagingPort::new();
        messaging
            .expect_acknowledge_ephemeral()
            .withf(|_, _, text| text == UNKNOWN_COMMAND)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let outcome = use_cases(messaging)
            .handle(&invocation(FractalCommand::Unknown))
            .await
            .expect("handled");
        assert_eq!(outcome, CommandOutcome::Rejected);
    }

    #[tokio::test]
    async fn messaging_failure_propagates() {
        let mut messaging = MockMessagingPort::new();
        messaging
            .expect_acknowledge_ephemeral()
            .returning(|_, _, _| Err(MessagingError::request_failed("acknowledge_ephemeral", "down")));

        let err = use_cases(messaging)
            .handle(&invocation(FractalCommand::Help))
            .await
            .expect_err("bridge down");
        assert!(matches!(err, CommandError::Messaging(_)));
    }
}
