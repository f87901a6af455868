use crate::auth::middleware::auth_middleware;
use crate::post::controller::search_posts;
use crate::post::service::PostService;
use crate::user::controller::search_users;
use crate::user::service::UserService;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;

/// Create a router for the search endpoints
///
/// Post and user search live under one prefix but hit different services.
pub fn routes(post_service: Arc<PostService>, user_service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/api/search/posts",
            get(search_posts).layer(axum::extract::Extension(post_service)),
        )
        .route(
            "/api/search/users",
            get(search_users).layer(axum::extract::Extension(user_service)),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
