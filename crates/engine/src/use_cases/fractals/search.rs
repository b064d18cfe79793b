//! `/fractals search`: look fractals up by name.

use std::sync::Arc;

use flakerank_domain::RankingQuery;
use flakerank_shared::CommandInvocation;

use super::open_session::OpenSession;
use super::{CommandError, CommandOutcome};
use crate::infrastructure::ports::MessagingPort;

const EMPTY_SEARCH: &str = "Please provide a fractal name to search for.";

pub struct SearchFractals {
    open: Arc<OpenSession>,
    messaging: Arc<dyn MessagingPort>,
}

impl SearchFractals {
    pub fn new(open: Arc<OpenSession>, messaging: Arc<dyn MessagingPort>) -> Self {
        Self { open, messaging }
    }

    pub async fn execute(
        &self,
        invocation: &CommandInvocation,
        name: &str,
    ) -> Result<CommandOutcome, CommandError> {
        let term = name.trim();
        if term.is_empty() {
            self.messaging
                .acknowledge_ephemeral(invocation.interaction_id, invocation.user_id, EMPTY_SEARCH)
                .await?;
            return Ok(CommandOutcome::Rejected);
        }

        self.open.execute(invocation, RankingQuery::by_name(term)).await
    }
}
