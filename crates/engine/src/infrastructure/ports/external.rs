//! External service port traits (ranking API, chat bridge).

use async_trait::async_trait;
use flakerank_domain::{ChannelId, Fractal, InteractionId, MessageId, PrincipalId, RankingQuery};
use flakerank_shared::{MessageEdit, OutgoingMessage};

use super::error::{MessagingError, UpstreamFetchError};

// =============================================================================
// Ranking API
// =============================================================================

/// Paged access to the remote ranking API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankingApiPort: Send + Sync {
    /// Fetch one page (numbered from 1). An empty vector means the query has
    /// no more results.
    async fn fetch_page(
        &self,
        query: &RankingQuery,
        page: u32,
    ) -> Result<Vec<Fractal>, UpstreamFetchError>;
}

// =============================================================================
// Chat Bridge
// =============================================================================

/// Outbound message operations on the chat platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn post_message(
        &self,
        channel_id: ChannelId,
        message: OutgoingMessage,
    ) -> Result<MessageId, MessagingError>;

    async fn update_message(
        &self,
        message_id: MessageId,
        edit: MessageEdit,
    ) -> Result<(), MessagingError>;

    async fn delete_message(&self, message_id: MessageId) -> Result<(), MessagingError>;

    /// Reply to an interaction with a message only `principal_id` can see.
    async fn acknowledge_ephemeral(
        &self,
        interaction_id: InteractionId,
        principal_id: PrincipalId,
        text: &str,
    ) -> Result<(), MessagingError>;
}
