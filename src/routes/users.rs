use crate::auth::middleware::auth_middleware;
use crate::user::controller;
use crate::user::service::UserService;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Create a router for profile and follow-graph routes
pub fn routes(user_service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/users/profile", put(controller::update_profile))
        .route(
            "/api/users/profile/:username",
            get(controller::get_profile),
        )
        .route("/api/users/suggestions", get(controller::suggestions))
        .route("/api/users/:user_id/follow", post(controller::follow))
        .route("/api/users/:user_id/unfollow", post(controller::unfollow))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(axum::extract::Extension(user_service))
}
