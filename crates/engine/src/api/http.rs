//! HTTP routes.
//!
//! The chat bridge forwards slash commands and button presses here as JSON
//! and relays any replies through the messaging port.

use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use flakerank_shared::{CommandInvocation, ComponentInteraction, InteractionOutcome};

use crate::app::App;
use crate::use_cases::components::ComponentError;
use crate::use_cases::fractals::{CommandError, CommandOutcome};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/interactions/commands", post(handle_command))
        .route("/interactions/components", post(handle_component))
}

async fn health() -> &'static str {
    "OK"
}

/// Response body for both interaction routes.
#[derive(Debug, Serialize)]
struct InteractionResponse {
    outcome: InteractionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_id: Option<String>,
}

async fn handle_command(
    State(app): State<Arc<App>>,
    Json(invocation): Json<CommandInvocation>,
) -> Result<Json<InteractionResponse>, ApiError> {
    let outcome = app.use_cases.fractals.handle(&invocation).await?;

    let message_id = match outcome {
        CommandOutcome::Opened { message_id, .. } => Some(message_id.to_string()),
        CommandOutcome::NotFound | CommandOutcome::Rejected | CommandOutcome::Replied => None,
    };
    Ok(Json(InteractionResponse {
        outcome: InteractionOutcome::Handled,
        message_id,
    }))
}

async fn handle_component(
    State(app): State<Arc<App>>,
    Json(event): Json<ComponentInteraction>,
) -> Result<Json<InteractionResponse>, ApiError> {
    let outcome = app.use_cases.components.handle.execute(&event).await?;
    Ok(Json(InteractionResponse {
        outcome,
        message_id: None,
    }))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadGateway(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::BadGateway(msg) => {
                tracing::warn!(error = %msg, "Chat bridge call failed");
                (axum::http::StatusCode::BAD_GATEWAY, "Chat bridge unavailable").into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Interaction failed");
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                )
                    .into_response()
            }
        }
    }
}

impl From<CommandError> for ApiError {
    fn from(e: CommandError) -> Self {
        match e {
            CommandError::Messaging(e) => ApiError::BadGateway(e.to_string()),
            CommandError::Session(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ComponentError> for ApiError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::Messaging(e) => ApiError::BadGateway(e.to_string()),
            // Stale presses are answered in the use case; reaching here is a bug.
            ComponentError::StaleSession => ApiError::Internal(e.to_string()),
            ComponentError::Session(e) => ApiError::Internal(e.to_string()),
        }
    }
}
