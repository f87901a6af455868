use crate::auth::middleware::AuthUser;
use crate::user::model::UpdateProfileRequest;
use crate::user::service::{UserError, UserService};
use axum::{
    extract::{Path, Query},
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
pub struct UsernamePathParam {
    username: String,
}

#[derive(Debug, Deserialize)]
pub struct UserIdPathParam {
    user_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchParams {
    /// Search query; empty or missing returns an empty result
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FollowResponse {
    pub message: String,
}

fn handle_error(e: UserError) -> Response {
    let (status, error_response) = match e {
        UserError::NotFound => (
            StatusCode::NOT_FOUND,
            ErrorResponse {
                error: "User not found".to_string(),
                code: "NOT_FOUND".to_string(),
            },
        ),
        UserError::AlreadyFollowing => (
            StatusCode::CONFLICT,
            ErrorResponse {
                error: "Already following this user".to_string(),
                code: "ALREADY_FOLLOWING".to_string(),
            },
        ),
        UserError::SelfFollow => (
            StatusCode::BAD_REQUEST,
            ErrorResponse {
                error: "Cannot follow yourself".to_string(),
                code: "INVALID_INPUT".to_string(),
            },
        ),
        UserError::DatabaseError(_) | UserError::NotificationError(_) => {
            error!("User operation failed: {:?}", e);
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

/// Get a user profile by username
///
/// Includes follower/following counts and whether the requester follows them.
#[utoipa::path(
    get,
    path = "/api/users/profile/{username}",
    params(("username" = String, Path, description = "Profile username")),
    responses(
        (status = 200, description = "Profile retrieved successfully", body = UserProfileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_profile(
    user: AuthUser,
    Path(params): Path<UsernamePathParam>,
    Extension(service): Extension<Arc<UserService>>,
) -> Response {
    info!("Fetching profile for username: {}", params.username);

    match service.get_profile(&params.username, user.user_id).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated successfully", body = UserProfileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_profile(
    user: AuthUser,
    Extension(service): Extension<Arc<UserService>>,
    Json(update): Json<UpdateProfileRequest>,
) -> Response {
    info!("Updating profile for user: {}", user.user_id);

    match service.update_profile(user.user_id, update).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Follow a user
///
/// Inserts a follow edge and notifies the followed user.
#[utoipa::path(
    post,
    path = "/api/users/{user_id}/follow",
    params(("user_id" = String, Path, description = "User to follow")),
    responses(
        (status = 201, description = "Successfully followed user", body = FollowResponse),
        (status = 400, description = "Cannot follow yourself", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Already following this user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn follow(
    user: AuthUser,
    Path(params): Path<UserIdPathParam>,
    Extension(service): Extension<Arc<UserService>>,
) -> Response {
    match service.follow(user.user_id, params.user_id).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(FollowResponse {
                message: "Successfully followed user".to_string(),
            }),
        )
            .into_response(),
        Err(e) => handle_error(e),
    }
}

/// Unfollow a user
///
/// Removing an edge that does not exist is not an error.
#[utoipa::path(
    post,
    path = "/api/users/{user_id}/unfollow",
    params(("user_id" = String, Path, description = "User to unfollow")),
    responses(
        (status = 200, description = "Successfully unfollowed user", body = FollowResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn unfollow(
    user: AuthUser,
    Path(params): Path<UserIdPathParam>,
    Extension(service): Extension<Arc<UserService>>,
) -> Response {
    match service.unfollow(user.user_id, params.user_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(FollowResponse {
                message: "Successfully unfollowed user".to_string(),
            }),
        )
            .into_response(),
        Err(e) => handle_error(e),
    }
}

/// Get suggested users to follow
#[utoipa::path(
    get,
    path = "/api/users/suggestions",
    responses(
        (status = 200, description = "Suggestions retrieved successfully", body = [UserSummary]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn suggestions(
    user: AuthUser,
    Extension(service): Extension<Arc<UserService>>,
) -> Response {
    match service.suggestions(user.user_id).await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Search users by name or handle
///
/// Case-insensitive substring match over first name, last name, username
/// and the full name. Results carry the requester's follow state.
#[utoipa::path(
    get,
    path = "/api/search/users",
    params(("q" = Option<String>, Query, description = "Search query")),
    responses(
        (status = 200, description = "Matching users", body = [UserSummary]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "search"
)]
pub async fn search_users(
    user: AuthUser,
    Query(params): Query<SearchParams>,
    Extension(service): Extension<Arc<UserService>>,
) -> Response {
    let query = params.q.unwrap_or_default();

    match service.search_users(&query, user.user_id).await {
        Ok(users) => {
            info!("User search for {:?} returned {} results", query, users.len());
            (StatusCode::OK, Json(users)).into_response()
        }
        Err(e) => handle_error(e),
    }
}
