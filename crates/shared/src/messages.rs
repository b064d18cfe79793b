//! Outbound message payloads.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::components::ActionRow;

/// One browsable entry: optional plain content plus a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub card: Card,
}

impl RenderedEntry {
    pub fn new(card: Card) -> Self {
        Self {
            content: None,
            card,
        }
    }
}

/// A new message to post in a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default)]
    pub components: Vec<ActionRow>,
}

impl OutgoingMessage {
    pub fn entry(entry: RenderedEntry, components: Vec<ActionRow>) -> Self {
        Self {
            content: entry.content,
            card: Some(entry.card),
            components,
        }
    }
}

/// Partial update of a posted message. `None` leaves a part untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ActionRow>>,
}

impl MessageEdit {
    pub fn entry(entry: RenderedEntry) -> Self {
        Self {
            content: entry.content,
            card: Some(entry.card),
            components: None,
        }
    }

    pub fn components(components: Vec<ActionRow>) -> Self {
        Self {
            components: Some(components),
            ..Self::default()
        }
    }
}
