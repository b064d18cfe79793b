//! FlakeRank Shared - wire types exchanged with the chat bridge
//!
//! This crate contains every type that crosses the bridge boundary:
//! - Inbound interactions (slash commands, button presses)
//! - Outbound messages, cards and button rows
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - serde, chrono and the domain ids only
//! 2. **No business logic** - pure data types and serialization

pub mod card;
pub mod components;
pub mod interactions;
pub mod messages;

pub use card::{Card, CardField};
pub use components::{ActionRow, Button, ButtonStyle, NEXT_CUSTOM_ID, PAGINATOR_PREFIX};
pub use interactions::{
    CommandInvocation, ComponentInteraction, FractalCommand, InteractionOutcome,
};
pub use messages::{MessageEdit, OutgoingMessage, RenderedEntry};
