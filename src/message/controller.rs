use crate::auth::middleware::AuthUser;
use crate::message::model::{MessageError, SendMessageRequest};
use crate::message::service::MessageService;
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UserIdPathParam {
    user_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

fn handle_error(e: MessageError) -> Response {
    let (status, error_response) = match e {
        MessageError::UserNotFound => (
            StatusCode::NOT_FOUND,
            ErrorResponse {
                error: "User not found".to_string(),
                code: "NOT_FOUND".to_string(),
            },
        ),
        MessageError::EmptyContent => (
            StatusCode::BAD_REQUEST,
            ErrorResponse {
                error: "Message content must not be empty".to_string(),
                code: "INVALID_INPUT".to_string(),
            },
        ),
        MessageError::DatabaseError(_) => {
            error!("Message operation failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "INTERNAL_ERROR".to_string(),
                },
            )
        }
    };

    (status, Json(error_response)).into_response()
}

/// List the caller's conversations, newest activity first
#[utoipa::path(
    get,
    path = "/api/messages/conversations",
    responses(
        (status = 200, description = "Conversations retrieved successfully", body = [ConversationResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "messages"
)]
pub async fn get_conversations(
    user: AuthUser,
    Extension(service): Extension<Arc<MessageService>>,
) -> Response {
    match service.conversations(user.user_id).await {
        Ok(conversations) => (StatusCode::OK, Json(conversations)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Get the message thread with another user
///
/// Opening the thread marks their messages to the caller as read.
#[utoipa::path(
    get,
    path = "/api/messages/{user_id}",
    params(("user_id" = String, Path, description = "Counterparty user ID")),
    responses(
        (status = 200, description = "Messages retrieved successfully", body = [MessageResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "messages"
)]
pub async fn get_messages(
    user: AuthUser,
    Path(params): Path<UserIdPathParam>,
    Extension(service): Extension<Arc<MessageService>>,
) -> Response {
    match service.get_messages(user.user_id, params.user_id).await {
        Ok(messages) => (StatusCode::OK, Json(messages)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Send a direct message
#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent successfully", body = MessageResponse),
        (status = 400, description = "Empty message content", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Receiver not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "messages"
)]
pub async fn send_message(
    user: AuthUser,
    Extension(service): Extension<Arc<MessageService>>,
    Json(message_data): Json<SendMessageRequest>,
) -> Response {
    match service.send_message(user.user_id, message_data).await {
        Ok(message) => {
            info!("User {} sent message {}", user.user_id, message.id);
            (StatusCode::CREATED, Json(message)).into_response()
        }
        Err(e) => handle_error(e),
    }
}

/// Mark all messages from a sender as read
#[utoipa::path(
    put,
    path = "/api/messages/{user_id}/read",
    params(("user_id" = String, Path, description = "Sender user ID")),
    responses(
        (status = 200, description = "Messages marked as read"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "messages"
)]
pub async fn mark_messages_read(
    user: AuthUser,
    Path(params): Path<UserIdPathParam>,
    Extension(service): Extension<Arc<MessageService>>,
) -> Response {
    match service.mark_read(user.user_id, params.user_id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => handle_error(e),
    }
}
