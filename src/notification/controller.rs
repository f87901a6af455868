use crate::auth::middleware::AuthUser;
use crate::notification::service::NotificationService;
use crate::notification::model::{NotificationError, UnreadCountResponse};
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

#[derive(Debug, Deserialize)]
pub struct NotificationIdPathParam {
    id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AckResponse {
    pub message: String,
}

fn handle_error(e: NotificationError) -> Response {
    error!("Notification operation failed: {:?}", e);
    let (status, error_response) = match e {
        NotificationError::NotFound => (
            StatusCode::NOT_FOUND,
            ErrorResponse {
                error: "Notification not found".to_string(),
                code: "NOT_FOUND".to_string(),
            },
        ),
        NotificationError::DatabaseError(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse {
                error: "Failed to process notifications".to_string(),
                code: "INTERNAL_ERROR".to_string(),
            },
        ),
    };

    (status, Json(error_response)).into_response()
}

/// List notifications for the authenticated user
///
/// Newest first, each entry carrying a sender summary.
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notifications retrieved successfully", body = [NotificationResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn list_notifications(
    user: AuthUser,
    Extension(service): Extension<Arc<NotificationService>>,
) -> Response {
    match service.list(user.user_id).await {
        Ok(notifications) => {
            info!(
                "Retrieved {} notifications for user {}",
                notifications.len(),
                user.user_id
            );
            (StatusCode::OK, Json(notifications)).into_response()
        }
        Err(e) => handle_error(e),
    }
}

/// Unread notification count for the authenticated user
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    responses(
        (status = 200, description = "Unread count retrieved", body = UnreadCountResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn unread_count(
    user: AuthUser,
    Extension(service): Extension<Arc<NotificationService>>,
) -> Response {
    match service.unread_count(user.user_id).await {
        Ok(count) => (StatusCode::OK, Json(UnreadCountResponse { count })).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Mark a notification as read
///
/// Fails with 404 when the notification does not exist or belongs to a
/// different recipient.
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read", body = AckResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn mark_read(
    user: AuthUser,
    Path(params): Path<NotificationIdPathParam>,
    Extension(service): Extension<Arc<NotificationService>>,
) -> Response {
    match service.mark_read(params.id, user.user_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(AckResponse {
                message: "Notification marked as read".to_string(),
            }),
        )
            .into_response(),
        Err(e) => handle_error(e),
    }
}

/// Mark all notifications as read (idempotent)
#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    responses(
        (status = 200, description = "All notifications marked as read", body = AckResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn mark_all_read(
    user: AuthUser,
    Extension(service): Extension<Arc<NotificationService>>,
) -> Response {
    match service.mark_all_read(user.user_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(AckResponse {
                message: "All notifications marked as read".to_string(),
            }),
        )
            .into_response(),
        Err(e) => handle_error(e),
    }
}
