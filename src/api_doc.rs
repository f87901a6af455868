use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Security scheme configuration for OpenAPI
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trend Platform Backend API",
        version = "0.1.0",
        description = "REST API for the social feed and graph query service"
    ),
    paths(
        // Health check endpoints
        crate::routes::health::health_check,
        crate::routes::health::protected_health_check,
        // Authentication endpoints
        crate::auth::controller::login,
        crate::auth::controller::register,
        // Post and feed endpoints
        crate::post::controller::create_post,
        crate::post::controller::get_post,
        crate::post::controller::home_feed,
        crate::post::controller::trending_feed,
        crate::post::controller::latest_feed,
        crate::post::controller::profile_feed,
        crate::post::controller::toggle_like,
        crate::post::controller::search_posts,
        // Comment endpoints
        crate::comment::controller::create_comment,
        crate::comment::controller::get_post_comments,
        // User and follow-graph endpoints
        crate::user::controller::get_profile,
        crate::user::controller::update_profile,
        crate::user::controller::follow,
        crate::user::controller::unfollow,
        crate::user::controller::suggestions,
        crate::user::controller::search_users,
        // Notification endpoints
        crate::notification::controller::list_notifications,
        crate::notification::controller::unread_count,
        crate::notification::controller::mark_read,
        crate::notification::controller::mark_all_read,
        // Message endpoints
        crate::message::controller::get_conversations,
        crate::message::controller::get_messages,
        crate::message::controller::send_message,
        crate::message::controller::mark_messages_read
    ),
    components(
        schemas(
            // Auth schemas
            crate::auth::controller::RegisterRequest,
            crate::auth::controller::LoginRequest,
            crate::auth::controller::AuthResponse,
            crate::auth::controller::AuthUserResponse,
            crate::auth::controller::ErrorResponse,
            // Health schemas
            crate::routes::health::HealthResponse,
            // Post schemas
            crate::post::model::CreatePostRequest,
            crate::post::model::PostResponse,
            crate::post::model::LikeState,
            crate::post::model::LikeToggleResponse,
            crate::post::controller::ErrorResponse,
            // Comment schemas
            crate::comment::model::CreateCommentRequest,
            crate::comment::model::CommentResponse,
            // User schemas
            crate::user::model::UpdateProfileRequest,
            crate::user::model::UserSummary,
            crate::user::model::UserProfileResponse,
            crate::user::controller::FollowResponse,
            // Notification schemas
            crate::notification::controller::AckResponse,
            crate::notification::model::NotificationType,
            crate::notification::model::NotificationResponse,
            crate::notification::model::UnreadCountResponse,
            // Message schemas
            crate::message::model::SendMessageRequest,
            crate::message::model::MessageResponse,
            crate::message::model::ConversationResponse,
            // External type schemas
            crate::schema_ext::DateTimeWrapper,
            crate::schema_ext::UuidWrapper
        )
    ),
    tags(
        (name = "authentication", description = "Registration and login endpoints"),
        (name = "health", description = "Health check endpoints"),
        (name = "posts", description = "Post and feed endpoints"),
        (name = "comments", description = "Comment endpoints"),
        (name = "users", description = "Profile and follow-graph endpoints"),
        (name = "notifications", description = "Notification endpoints"),
        (name = "messages", description = "Direct message endpoints"),
        (name = "search", description = "Post and user search endpoints")
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;
