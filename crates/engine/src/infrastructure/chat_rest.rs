//! REST client for the chat bridge.
//!
//! The bridge owns the gateway connection to the chat platform and exposes
//! message operations over plain HTTP:
//!
//! - `POST   {base}/channels/{channel_id}/messages` -> `{"id": "<message id>"}`
//! - `PATCH  {base}/messages/{message_id}`
//! - `DELETE {base}/messages/{message_id}`
//! - `POST   {base}/interactions/{interaction_id}/ephemeral`

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use flakerank_domain::{ChannelId, InteractionId, MessageId, PrincipalId};
use flakerank_shared::{MessageEdit, OutgoingMessage};

use crate::infrastructure::ports::{MessagingError, MessagingPort};

/// Default chat bridge base URL.
pub const DEFAULT_CHAT_API_URL: &str = "http://localhost:8090";

#[derive(Clone)]
pub struct ChatRestClient {
    client: Client,
    base_url: String,
    bot_token: Option<String>,
}

impl ChatRestClient {
    pub fn new(base_url: &str, bot_token: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bot_token {
            Some(token) => request.header("Authorization", format!("Bot {token}")),
            None => request,
        }
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, MessagingError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| MessagingError::request_failed(operation, e))?;

        if !response.status().is_success() {
            return Err(MessagingError::Rejected {
                operation,
                status: response.status().as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl MessagingPort for ChatRestClient {
    async fn post_message(
        &self,
        channel_id: ChannelId,
        message: OutgoingMessage,
    ) -> Result<MessageId, MessagingError> {
        let request = self
            .client
            .post(format!("{}/channels/{}/messages", self.base_url, channel_id))
            .json(&message);

        let created: CreatedMessage = self
            .send("post_message", request)
            .await?
            .json()
            .await
            .map_err(|e| MessagingError::InvalidResponse(e.to_string()))?;

        Ok(created.id)
    }

    async fn update_message(
        &self,
        message_id: MessageId,
        edit: MessageEdit,
    ) -> Result<(), MessagingError> {
        let request = self
            .client
            .patch(format!("{}/messages/{}", self.base_url, message_id))
            .json(&edit);
        self.send("update_message", request).await?;
        Ok(())
    }

    async fn delete_message(&self, message_id: MessageId) -> Result<(), MessagingError> {
        let request = self
            .client
            .delete(format!("{}/messages/{}", self.base_url, message_id));
        self.send("delete_message", request).await?;
        Ok(())
    }

    async fn acknowledge_ephemeral(
        &self,
        interaction_id: InteractionId,
        principal_id: PrincipalId,
        text: &str,
    ) -> Result<(), MessagingError> {
        let body = EphemeralReply {
            principal_id,
            content: text,
        };
        let request = self
            .client
            .post(format!(
                "{}/interactions/{}/ephemeral",
                self.base_url, interaction_id
            ))
            .json(&body);
        self.send("acknowledge_ephemeral", request).await?;
        Ok(())
    }
}

// =============================================================================
// Bridge API types
// =============================================================================

#[derive(Debug, Deserialize)]
struct CreatedMessage {
    id: MessageId,
}

#[derive(Debug, Serialize)]
struct EphemeralReply<'a> {
    principal_id: PrincipalId,
    content: &'a str,
}
