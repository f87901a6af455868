use crate::auth::middleware::auth_middleware;
use crate::message::controller;
use crate::message::service::MessageService;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Create a router for direct message routes
pub fn routes(message_service: Arc<MessageService>) -> Router {
    Router::new()
        .route("/api/messages", post(controller::send_message))
        .route(
            "/api/messages/conversations",
            get(controller::get_conversations),
        )
        .route("/api/messages/:user_id", get(controller::get_messages))
        .route(
            "/api/messages/:user_id/read",
            put(controller::mark_messages_read),
        )
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(axum::extract::Extension(message_service))
}
