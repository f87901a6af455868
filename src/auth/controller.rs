use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use super::service::{self, AuthError, AuthResult, LoginData, RegisterData};

// Request DTOs
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
    /// Opaque media reference returned by the upload collaborator
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Response DTOs
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserResponse {
    #[schema(value_type = UuidWrapper)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Convert AuthResult to AuthResponse
fn to_response(result: AuthResult) -> AuthResponse {
    AuthResponse {
        token: result.token,
        user: AuthUserResponse {
            id: result.user_id,
            first_name: result.first_name,
            last_name: result.last_name,
            username: result.username,
            email: result.email,
            bio: result.bio,
            profile_image: result.profile_image,
            cover_image: result.cover_image,
            created_at: result.created_at,
        },
    }
}

// Convert AuthError to Response
fn handle_error(error: AuthError) -> Response {
    let status = error.status_code();
    let message = error.message();

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Internal server error during auth: {}", message);
    } else {
        info!("Auth error: {} ({})", message, status);
    }

    (status, Json(ErrorResponse { error: message })).into_response()
}

/// Register a new account
///
/// Creates a new user with a unique handle and email and returns a token.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Missing required field", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse)
    ),
    tag = "authentication"
)]
pub async fn register(State(pool): State<PgPool>, Json(req): Json<RegisterRequest>) -> Response {
    info!("Registration request received for username: {}", req.username);

    let data = RegisterData {
        first_name: req.first_name,
        last_name: req.last_name,
        username: req.username,
        email: req.email,
        password: req.password,
        bio: req.bio,
        profile_image: req.profile_image,
        cover_image: req.cover_image,
    };

    match service::register(&pool, data).await {
        Ok(result) => {
            let response = to_response(result);
            info!("User registered successfully: {}", response.user.id);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(error) => handle_error(error),
    }
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "authentication"
)]
pub async fn login(State(pool): State<PgPool>, Json(req): Json<LoginRequest>) -> Response {
    info!("Login request received for email: {}", req.email);

    let data = LoginData {
        email: req.email,
        password: req.password,
    };

    match service::login(&pool, data).await {
        Ok(result) => {
            let response = to_response(result);
            info!("User login successful: {}", response.user.id);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error) => handle_error(error),
    }
}
