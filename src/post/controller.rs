use crate::auth::middleware::AuthUser;
use crate::post::model::{CreatePostRequest, LikeToggleResponse};
use crate::post::service::{PostError, PostService};
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

#[derive(Debug, Deserialize)]
pub struct PostIdPathParam {
    post_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UsernamePathParam {
    username: String,
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

fn handle_error(e: PostError) -> Response {
    let (status, error_response) = match e {
        PostError::NotFound => (
            StatusCode::NOT_FOUND,
            ErrorResponse {
                error: "Post not found".to_string(),
                code: "NOT_FOUND".to_string(),
            },
        ),
        PostError::UserNotFound => (
            StatusCode::NOT_FOUND,
            ErrorResponse {
                error: "User not found".to_string(),
                code: "NOT_FOUND".to_string(),
            },
        ),
        PostError::InvalidInput(msg) => (
            StatusCode::BAD_REQUEST,
            ErrorResponse {
                error: msg,
                code: "INVALID_INPUT".to_string(),
            },
        ),
        PostError::DatabaseError(_) | PostError::NotificationError(_) => {
            error!("Post operation failed: {:?}", e);
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

/// Create a new post
///
/// A post needs text content, an image reference, or both.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created successfully", body = PostResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn create_post(
    user: AuthUser,
    Extension(service): Extension<Arc<PostService>>,
    Json(post_data): Json<CreatePostRequest>,
) -> Response {
    match service.create_post(user.user_id, post_data).await {
        Ok(post) => {
            info!("Successfully created post with ID: {}", post.id);
            (StatusCode::CREATED, Json(post)).into_response()
        }
        Err(e) => handle_error(e),
    }
}

/// Get a single post with its comment thread
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}",
    params(("post_id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post retrieved successfully", body = PostResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn get_post(
    user: AuthUser,
    Path(params): Path<PostIdPathParam>,
    Extension(service): Extension<Arc<PostService>>,
) -> Response {
    match service.get_post(params.post_id, user.user_id).await {
        Ok(post) => (StatusCode::OK, Json(post)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Home feed
///
/// The requester's own posts plus posts from followed users, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "Feed retrieved successfully", body = [PostResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn home_feed(
    user: AuthUser,
    Extension(service): Extension<Arc<PostService>>,
) -> Response {
    match service.home_feed(user.user_id).await {
        Ok(posts) => {
            info!("Home feed for {} returned {} posts", user.user_id, posts.len());
            (StatusCode::OK, Json(posts)).into_response()
        }
        Err(e) => handle_error(e),
    }
}

/// Trending feed
///
/// All posts ranked by combined like and comment count, ties by recency.
#[utoipa::path(
    get,
    path = "/api/posts/explore/trending",
    responses(
        (status = 200, description = "Trending posts retrieved successfully", body = [PostResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn trending_feed(
    user: AuthUser,
    Extension(service): Extension<Arc<PostService>>,
) -> Response {
    match service.trending_feed(user.user_id).await {
        Ok(posts) => (StatusCode::OK, Json(posts)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Latest feed
#[utoipa::path(
    get,
    path = "/api/posts/explore/latest",
    responses(
        (status = 200, description = "Latest posts retrieved successfully", body = [PostResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn latest_feed(
    user: AuthUser,
    Extension(service): Extension<Arc<PostService>>,
) -> Response {
    match service.latest_feed(user.user_id).await {
        Ok(posts) => (StatusCode::OK, Json(posts)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// All posts by a profile user
#[utoipa::path(
    get,
    path = "/api/posts/user/{username}",
    params(("username" = String, Path, description = "Profile username")),
    responses(
        (status = 200, description = "User posts retrieved successfully", body = [PostResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn profile_feed(
    user: AuthUser,
    Path(params): Path<UsernamePathParam>,
    Extension(service): Extension<Arc<PostService>>,
) -> Response {
    match service.profile_feed(&params.username, user.user_id).await {
        Ok(posts) => (StatusCode::OK, Json(posts)).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Toggle a like on a post
///
/// A pure toggle: the response carries the state the call produced.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/like",
    params(("post_id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Like state toggled", body = LikeToggleResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn toggle_like(
    user: AuthUser,
    Path(params): Path<PostIdPathParam>,
    Extension(service): Extension<Arc<PostService>>,
) -> Response {
    match service.toggle_like(params.post_id, user.user_id).await {
        Ok(state) => (StatusCode::OK, Json(LikeToggleResponse { state })).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Search posts by content
///
/// Case-insensitive substring match, newest first.
#[utoipa::path(
    get,
    path = "/api/search/posts",
    params(("q" = Option<String>, Query, description = "Search query")),
    responses(
        (status = 200, description = "Matching posts", body = [PostResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "search"
)]
pub async fn search_posts(
    user: AuthUser,
    Query(params): Query<SearchParams>,
    Extension(service): Extension<Arc<PostService>>,
) -> Response {
    let query = params.q.unwrap_or_default();

    match service.search_posts(&query, user.user_id).await {
        Ok(posts) => {
            info!("Post search for {:?} returned {} results", query, posts.len());
            (StatusCode::OK, Json(posts)).into_response()
        }
        Err(e) => handle_error(e),
    }
}
