use crate::auth::middleware::auth_middleware;
use crate::notification::controller;
use crate::notification::service::NotificationService;
use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use std::sync::Arc;

/// Create a router for notification routes
pub fn routes(notification_service: Arc<NotificationService>) -> Router {
    Router::new()
        .route("/api/notifications", get(controller::list_notifications))
        .route(
            "/api/notifications/unread-count",
            get(controller::unread_count),
        )
        .route(
            "/api/notifications/read-all",
            put(controller::mark_all_read),
        )
        .route("/api/notifications/:id/read", put(controller::mark_read))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(axum::extract::Extension(notification_service))
}
