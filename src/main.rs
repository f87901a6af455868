mod api_doc;
mod auth;
mod comment;
mod db;
mod message;
mod notification;
mod post;
mod routes;
mod schema_ext;
mod user;

use axum::{routing::get, Router};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::comment::service::CommentService;
use crate::message::service::MessageService;
use crate::notification::service::NotificationService;
use crate::post::service::PostService;
use crate::user::service::UserService;

#[derive(Debug, Clone)]
struct AppConfig {
    /// Whether a like fires a notification to the post owner
    notify_on_like: bool,
}

impl AppConfig {
    fn from_env() -> Self {
        let notify_on_like = std::env::var("NOTIFY_ON_LIKE")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Self { notify_on_like }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    tracing_subscriber::fmt::init();

    // Load .env file if it exists
    dotenv().ok();

    // Create connection pool
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&std::env::var("DATABASE_URL")?)
        .await?;

    // Check if the database is initialized
    if !db::check_db_initialized(&pool).await {
        db::init_db(&pool).await?;
    }

    let app_config = AppConfig::from_env();
    info!("Notify on like: {}", app_config.notify_on_like);

    // Create service instances
    let notification_service = Arc::new(NotificationService::new(pool.clone()));
    let post_service = Arc::new(PostService::new(
        pool.clone(),
        notification_service.clone(),
        app_config.notify_on_like,
    ));
    let comment_service = Arc::new(CommentService::new(
        pool.clone(),
        notification_service.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        pool.clone(),
        notification_service.clone(),
    ));
    let message_service = Arc::new(MessageService::new(pool.clone()));

    // Build the router
    let app = Router::new()
        // API documentation
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Health routes
        .merge(routes::health::routes(pool.clone()))
        // Auth routes
        .merge(routes::auth::routes(pool.clone()))
        // Post and feed routes
        .merge(routes::posts::routes(post_service.clone()))
        // Comment routes
        .merge(routes::comments::routes(comment_service.clone()))
        // User and follow-graph routes
        .merge(routes::users::routes(user_service.clone()))
        // Notification routes
        .merge(routes::notifications::routes(notification_service.clone()))
        // Message routes
        .merge(routes::messages::routes(message_service.clone()))
        // Search routes
        .merge(routes::search::routes(post_service, user_service))
        // Welcome route
        .route(
            "/",
            get(|| async { "Welcome to Trend Platform Backend API" }),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Try different ports
    let mut port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let max_tries = 5;
    for attempt in 1..=max_tries {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        match axum::Server::try_bind(&addr) {
            Ok(server) => {
                println!("Server started at http://localhost:{}", port);
                println!("API documentation: http://localhost:{}/docs", port);
                return server
                    .serve(app.into_make_service())
                    .await
                    .map_err(|e| e.into());
            }
            Err(_) => {
                if attempt == max_tries {
                    return Err("Failed to bind to any port".into());
                }
                port += 1;
            }
        }
    }

    Err("Failed to bind to any port".into())
}
