use argon2::{
    password_hash::PasswordVerifier,
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use super::jwt::generate_token;

// Input data structures
pub struct RegisterData {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
}

pub struct LoginData {
    pub email: String,
    pub password: String,
}

// Result data structure
pub struct AuthResult {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub token: String,
}

// Service errors
pub enum AuthError {
    InvalidInput(String),
    AlreadyExists(String),
    InvalidCredentials,
    DatabaseError(String),
    TokenError,
    InternalError(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::DatabaseError(_) | Self::TokenError | Self::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::AlreadyExists(msg) => msg.clone(),
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::DatabaseError(_) | Self::TokenError | Self::InternalError(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

// User registration service
pub async fn register(pool: &PgPool, data: RegisterData) -> Result<AuthResult, AuthError> {
    // Validate input
    if data.first_name.is_empty()
        || data.last_name.is_empty()
        || data.username.is_empty()
        || data.email.is_empty()
        || data.password.is_empty()
    {
        return Err(AuthError::InvalidInput(
            "First name, last name, username, email, and password are required".to_string(),
        ));
    }

    info!("Checking if username or email is already taken");

    // Check for an existing account with the same handle or email
    let existing = sqlx::query_as::<_, (String, String)>(
        "SELECT username, email FROM users WHERE username = $1 OR email = $2",
    )
    .bind(&data.username)
    .bind(&data.email)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        error!("Database error while checking existing user: {}", e);
        AuthError::DatabaseError(e.to_string())
    })?;

    if let Some((username, _)) = existing {
        return Err(if username == data.username {
            AuthError::AlreadyExists("Username already taken".to_string())
        } else {
            AuthError::AlreadyExists("Email already registered".to_string())
        });
    }

    info!("Creating new user with username {}", data.username);

    // Hash password
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(data.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Password hashing failed: {}", e);
            AuthError::InternalError(format!("Password hashing failed: {}", e))
        })?
        .to_string();

    // Create new user. The unique constraints on username/email settle
    // concurrent duplicate registrations; the pre-check above only gives a
    // friendlier message for the common case.
    let user_id = Uuid::new_v4();
    let created_at: DateTime<Utc> = sqlx::query_scalar(
        r#"
        INSERT INTO users (id, first_name, last_name, username, email, password_hash, bio, profile_image, cover_image)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING created_at
        "#,
    )
    .bind(user_id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.username)
    .bind(&data.email)
    .bind(&password_hash)
    .bind(&data.bio)
    .bind(&data.profile_image)
    .bind(&data.cover_image)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if e.as_database_error()
            .map(|d| d.is_unique_violation())
            .unwrap_or(false)
        {
            info!("Registration lost the race for username/email uniqueness");
            AuthError::AlreadyExists("Username or email already taken".to_string())
        } else {
            error!("Failed to insert new user: {}", e);
            AuthError::DatabaseError(e.to_string())
        }
    })?;

    info!("User created successfully with ID: {}", user_id);

    // Generate token
    let token = generate_token(&user_id, &data.username, &data.email).map_err(|e| {
        error!("Token generation failed: {:?}", e);
        AuthError::TokenError
    })?;

    Ok(AuthResult {
        user_id,
        first_name: data.first_name,
        last_name: data.last_name,
        username: data.username,
        email: data.email,
        bio: data.bio,
        profile_image: data.profile_image,
        cover_image: data.cover_image,
        created_at,
        token,
    })
}

#[derive(sqlx::FromRow)]
struct UserAuthRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    password_hash: String,
    bio: Option<String>,
    profile_image: Option<String>,
    cover_image: Option<String>,
    created_at: DateTime<Utc>,
}

// User login service
pub async fn login(pool: &PgPool, data: LoginData) -> Result<AuthResult, AuthError> {
    info!("Attempting login for user with email: {}", data.email);

    let user = sqlx::query_as::<_, UserAuthRow>(
        r#"
        SELECT id, first_name, last_name, username, email, password_hash, bio,
               profile_image, cover_image, created_at
        FROM users WHERE email = $1
        "#,
    )
    .bind(&data.email)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        error!("Database error while fetching user: {}", e);
        AuthError::DatabaseError(e.to_string())
    })?;

    let user = match user {
        Some(user) => user,
        None => {
            info!("No user found with email: {}", data.email);
            return Err(AuthError::InvalidCredentials);
        }
    };

    // Verify password
    let parsed_hash = argon2::password_hash::PasswordHash::new(&user.password_hash).map_err(|e| {
        error!("Failed to parse password hash: {}", e);
        AuthError::InvalidCredentials
    })?;

    let argon2 = Argon2::default();
    argon2
        .verify_password(data.password.as_bytes(), &parsed_hash)
        .map_err(|e| {
            info!("Password verification failed: {}", e);
            AuthError::InvalidCredentials
        })?;

    // Generate token
    let token = generate_token(&user.id, &user.username, &user.email).map_err(|e| {
        error!("Token generation failed: {:?}", e);
        AuthError::TokenError
    })?;

    info!("Login successful for user ID: {}", user.id);

    Ok(AuthResult {
        user_id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        username: user.username,
        email: user.email,
        bio: user.bio,
        profile_image: user.profile_image,
        cover_image: user.cover_image,
        created_at: user.created_at,
        token,
    })
}
