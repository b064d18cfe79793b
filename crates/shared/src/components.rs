//! Message components (button rows).

use serde::{Deserialize, Serialize};

/// Custom id of the paginator's "next" button.
///
/// The id is the same on every paged message; the message id of the press
/// identifies which session it belongs to.
pub const NEXT_CUSTOM_ID: &str = "flakerank:paginator:next";

/// Namespace shared by every paginator control.
pub const PAGINATOR_PREFIX: &str = "flakerank:paginator:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
}

impl Button {
    pub fn next() -> Self {
        Self {
            custom_id: NEXT_CUSTOM_ID.to_string(),
            label: "\u{25B6}".to_string(),
            style: ButtonStyle::Primary,
        }
    }

    /// Delete button whose custom id is a self-describing delete token.
    pub fn delete(custom_id: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: "\u{2716}".to_string(),
            style: ButtonStyle::Danger,
        }
    }
}

/// One horizontal row of buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRow {
    pub buttons: Vec<Button>,
}

impl ActionRow {
    pub fn new(buttons: Vec<Button>) -> Self {
        Self { buttons }
    }

    /// Next + delete, as attached to a live paged message.
    pub fn paginator(delete_custom_id: impl Into<String>) -> Self {
        Self::new(vec![Button::next(), Button::delete(delete_custom_id)])
    }

    /// Delete only, for messages that can no longer advance.
    pub fn delete_only(delete_custom_id: impl Into<String>) -> Self {
        Self::new(vec![Button::delete(delete_custom_id)])
    }

    pub fn has_custom_id(&self, custom_id: &str) -> bool {
        self.buttons.iter().any(|b| b.custom_id == custom_id)
    }
}
