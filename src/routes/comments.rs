use crate::auth::middleware::auth_middleware;
use crate::comment::controller::{create_comment, get_post_comments};
use crate::comment::service::CommentService;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Create a router for comment routes
pub fn routes(comment_service: Arc<CommentService>) -> Router {
    Router::new()
        .route("/api/posts/:post_id/comments", get(get_post_comments))
        .route("/api/posts/:post_id/comments", post(create_comment))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(axum::extract::Extension(comment_service))
}
