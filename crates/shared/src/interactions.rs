//! Inbound interactions delivered by the chat bridge.
//!
//! ## Versioning Policy
//!
//! - New command variants can be added at the end
//! - Unknown commands deserialize to `Unknown`

use serde::{Deserialize, Serialize};

use flakerank_domain::{ChannelId, InteractionId, MessageId, PrincipalId, Requester};

/// A button press on a posted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInteraction {
    pub interaction_id: InteractionId,
    pub message_id: MessageId,
    pub channel_id: ChannelId,
    pub user_id: PrincipalId,
    /// Empty outside a guild.
    #[serde(default)]
    pub role_ids: Vec<PrincipalId>,
    pub custom_id: String,
}

impl ComponentInteraction {
    pub fn requester(&self) -> Requester {
        Requester::new(self.user_id, self.role_ids.clone())
    }
}

/// A `/fractals ...` slash command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub interaction_id: InteractionId,
    pub channel_id: ChannelId,
    pub user_id: PrincipalId,
    #[serde(default)]
    pub role_ids: Vec<PrincipalId>,
    pub command: FractalCommand,
}

impl CommandInvocation {
    pub fn requester(&self) -> Requester {
        Requester::new(self.user_id, self.role_ids.clone())
    }
}

fn default_weight() -> i64 {
    1
}

/// Subcommands of `/fractals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "subcommand", rename_all = "snake_case")]
pub enum FractalCommand {
    /// Rank by weighted stats. Every weight defaults to 1.
    Browse {
        #[serde(default = "default_weight")]
        altitude_wt: i64,
        #[serde(default = "default_weight")]
        spin_wt: i64,
        #[serde(default = "default_weight")]
        velocity_wt: i64,
        #[serde(default = "default_weight")]
        purity_wt: i64,
        #[serde(default = "default_weight")]
        power_wt: i64,
        #[serde(default = "default_weight")]
        faction_wt: i64,
    },
    /// Search by fractal name.
    Search { name: String },
    Help,
    #[serde(other)]
    Unknown,
}

impl FractalCommand {
    /// Weights in domain storage order: faction, power, purity, velocity,
    /// spin, altitude. `None` for non-browse commands.
    pub fn browse_weights(&self) -> Option<[i64; 6]> {
        match self {
            FractalCommand::Browse {
                altitude_wt,
                spin_wt,
                velocity_wt,
                purity_wt,
                power_wt,
                faction_wt,
            } => Some([
                *faction_wt,
                *power_wt,
                *purity_wt,
                *velocity_wt,
                *spin_wt,
                *altitude_wt,
            ]),
            _ => None,
        }
    }
}

/// What the engine did with an interaction, returned to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionOutcome {
    /// Handled, possibly with an ephemeral reply.
    Handled,
    /// Not addressed to this engine (foreign or malformed component id).
    Ignored,
}
