use crate::auth::middleware::AuthUser;
use crate::comment::model::{CommentError, CreateCommentRequest};
use crate::comment::service::CommentService;
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
pub struct PostIdPathParam {
    post_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

fn handle_error(e: CommentError) -> Response {
    let (status, error_response) = match e {
        CommentError::PostNotFound => (
            StatusCode::NOT_FOUND,
            ErrorResponse {
                error: "Post not found".to_string(),
                code: "NOT_FOUND".to_string(),
            },
        ),
        CommentError::EmptyContent => (
            StatusCode::BAD_REQUEST,
            ErrorResponse {
                error: "Comment content must not be empty".to_string(),
                code: "INVALID_INPUT".to_string(),
            },
        ),
        CommentError::DatabaseError(_) | CommentError::NotificationError(_) => {
            error!("Comment operation failed: {:?}", e);
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

/// Add a comment to a post
///
/// Notifies the post owner unless they are the commenter.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/comments",
    params(("post_id" = i64, Path, description = "Post ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created successfully", body = CommentResponse),
        (status = 400, description = "Empty comment content", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn create_comment(
    user: AuthUser,
    Path(params): Path<PostIdPathParam>,
    Extension(service): Extension<Arc<CommentService>>,
    Json(comment_data): Json<CreateCommentRequest>,
) -> Response {
    match service
        .create_comment(params.post_id, user.user_id, comment_data)
        .await
    {
        Ok(comment) => {
            info!("Comment {} added to post {}", comment.id, params.post_id);
            (StatusCode::CREATED, Json(comment)).into_response()
        }
        Err(e) => handle_error(e),
    }
}

/// Get the comment thread for a post
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}/comments",
    params(("post_id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Comments retrieved successfully", body = [CommentResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn get_post_comments(
    _user: AuthUser,
    Path(params): Path<PostIdPathParam>,
    Extension(service): Extension<Arc<CommentService>>,
) -> Response {
    match service.get_post_comments(params.post_id).await {
        Ok(comments) => (StatusCode::OK, Json(comments)).into_response(),
        Err(e) => handle_error(e),
    }
}
