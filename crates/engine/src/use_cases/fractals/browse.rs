//! `/fractals browse`: rank by weighted stats.

use std::sync::Arc;

use flakerank_domain::{RankingQuery, WeightVector};
use flakerank_shared::CommandInvocation;

use super::open_session::OpenSession;
use super::{CommandError, CommandOutcome};
use crate::infrastructure::ports::MessagingPort;

pub struct BrowseFractals {
    open: Arc<OpenSession>,
    messaging: Arc<dyn MessagingPort>,
}

impl BrowseFractals {
    pub fn new(open: Arc<OpenSession>, messaging: Arc<dyn MessagingPort>) -> Self {
        Self { open, messaging }
    }

    /// `weights` in faction, power, purity, velocity, spin, altitude order.
    pub async fn execute(
        &self,
        invocation: &CommandInvocation,
        weights: [i64; 6],
    ) -> Result<CommandOutcome, CommandError> {
        let query = WeightVector::from_signed(weights)
            .and_then(RankingQuery::weighted);

        match query {
            Ok(query) => self.open.execute(invocation, query).await,
            Err(e) => {
                tracing::info!(user_id = %invocation.user_id, error = %e, "Rejected browse weights");
                self.messaging
                    .acknowledge_ephemeral(
                        invocation.interaction_id,
                        invocation.user_id,
                        &format!("Invalid weights: {e}"),
                    )
                    .await?;
                Ok(CommandOutcome::Rejected)
            }
        }
    }
}
