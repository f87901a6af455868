use crate::auth::middleware::auth_middleware;
use crate::post::controller;
use crate::post::service::PostService;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Create a router for post and feed routes
///
/// Every route requires authentication; feeds are viewer-relative.
pub fn routes(post_service: Arc<PostService>) -> Router {
    Router::new()
        .route(
            "/api/posts",
            get(controller::home_feed).post(controller::create_post),
        )
        // Static segments before the :post_id capture
        .route(
            "/api/posts/explore/trending",
            get(controller::trending_feed),
        )
        .route("/api/posts/explore/latest", get(controller::latest_feed))
        .route("/api/posts/user/:username", get(controller::profile_feed))
        .route("/api/posts/:post_id", get(controller::get_post))
        .route("/api/posts/:post_id/like", post(controller::toggle_like))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(axum::extract::Extension(post_service))
}
