//! `/fractals help`.

use std::sync::Arc;

use flakerank_shared::CommandInvocation;

use super::{CommandError, CommandOutcome};
use crate::infrastructure::ports::MessagingPort;

pub const HELP_TEXT: &str = "\
Welcome to FlakeRank!
To search for fractals by name, type `/fractals search name`.

To find fractals with the stats you value most, use `/fractals browse`. \
Each weight says how much that stat matters to you.

`/fractals browse` with every weight equal ranks the most impressive fractals \
with each stat mattering equally, whether the weights are all 1 or all 100.

`/fractals browse altitude_wt:10 spin_wt:1 velocity_wt:1 purity_wt:5 power_wt:1 faction_wt:0` \
ranks mostly by altitude: altitude matters twice as much as purity and ten times \
as much as spin, power or velocity, and faction does not matter at all.

Percentages work the same way: \
`/fractals browse altitude_wt:10 spin_wt:10 velocity_wt:15 purity_wt:15 power_wt:25 faction_wt:25` \
cares 10% about altitude, 10% about spin, 15% about velocity, 15% about purity, \
25% about power and 25% about faction.

Weights must be zero or positive, and at least one must be above zero.";

/// Replies with usage instructions visible only to the caller.
pub struct FractalHelp {
    messaging: Arc<dyn MessagingPort>,
}

impl FractalHelp {
    pub fn new(messaging: Arc<dyn MessagingPort>) -> Self {
        Self { messaging }
    }

    pub async fn execute(&self, invocation: &CommandInvocation) -> Result<CommandOutcome, CommandError> {
        self.messaging
            .acknowledge_ephemeral(invocation.interaction_id, invocation.user_id, HELP_TEXT)
            .await?;
        Ok(CommandOutcome::Replied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockMessagingPort;
    use crate::test_fixtures::{CHANNEL, INTERACTION, OWNER};
    use flakerank_shared::FractalCommand;

    #[tokio::test]
    async fn help_is_ephemeral() {
        let mut messaging = MockMessagingPort::new();
        messaging.expect_post_message().never();
        messaging
            .expect_acknowledge_ephemeral()
            .withf(|interaction, user, text| {
                *interaction == INTERACTION && *user == OWNER && text.starts_with("Welcome to FlakeRank!")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let invocation = CommandInvocation {
            interaction_id: INTERACTION,
            channel_id: CHANNEL,
            user_id: OWNER,
            role_ids: Vec::new(),
            command: FractalCommand::Help,
        };

        let outcome = FractalHelp::new(Arc::new(messaging))
            .execute(&invocation)
            .await
            .expect("replied");
        assert_eq!(outcome, CommandOutcome::Replied);
    }
}
