use crate::db::like_pattern;
use crate::notification::model::{NotificationError, NotificationType};
use crate::notification::service::NotificationService;
use crate::user::model::{
    DecoratedUserRow, ProfileRow, UpdateProfileRequest, UserProfileResponse, UserSummary,
};
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

const SEARCH_RESULT_LIMIT: i64 = 20;
const SUGGESTION_COUNT: i64 = 5;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Notification error: {0}")]
    NotificationError(#[from] NotificationError),

    #[error("User not found")]
    NotFound,

    #[error("Already following this user")]
    AlreadyFollowing,

    #[error("Cannot follow yourself")]
    SelfFollow,
}

pub struct UserService {
    pool: PgPool,
    notifications: Arc<NotificationService>,
}

impl UserService {
    pub fn new(pool: PgPool, notifications: Arc<NotificationService>) -> Self {
        Self {
            pool,
            notifications,
        }
    }

    async fn user_exists(&self, user_id: Uuid) -> Result<bool, UserError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Does a follow edge exist from `follower` to `followed`?
    pub async fn is_following(&self, follower: Uuid, followed: Uuid) -> Result<bool, UserError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)",
        )
        .bind(follower)
        .bind(followed)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Profile view with follower/following counts and a viewer-relative
    /// follow flag, all derived at query time
    pub async fn get_profile(
        &self,
        username: &str,
        viewer: Uuid,
    ) -> Result<UserProfileResponse, UserError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.username, u.email,
                   u.profile_image, u.cover_image, u.bio, u.created_at,
                   (SELECT COUNT(*) FROM follows WHERE followed_id = u.id) AS followers_count,
                   (SELECT COUNT(*) FROM follows WHERE follower_id = u.id) AS following_count,
                   EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = u.id) AS is_following
            FROM users u
            WHERE u.username = $2
            "#,
        )
        .bind(viewer)
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(UserError::NotFound)?;

        Ok(row.into())
    }

    /// Apply a partial profile edit and return the updated profile
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: UpdateProfileRequest,
    ) -> Result<UserProfileResponse, UserError> {
        let username: String = sqlx::query_scalar(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                bio = COALESCE($4, bio),
                profile_image = COALESCE($5, profile_image),
                cover_image = COALESCE($6, cover_image)
            WHERE id = $1
            RETURNING username
            "#,
        )
        .bind(user_id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.bio)
        .bind(&update.profile_image)
        .bind(&update.cover_image)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(UserError::NotFound)?;

        info!("Updated profile for user {}", user_id);
        self.get_profile(&username, user_id).await
    }

    /// Insert a follow edge and notify the followed user.
    ///
    /// The edge's primary key settles concurrent duplicate follows: an
    /// insert that affects zero rows means the edge already existed.
    pub async fn follow(&self, follower: Uuid, followed: Uuid) -> Result<(), UserError> {
        if follower == followed {
            return Err(UserError::SelfFollow);
        }

        if !self.user_exists(followed).await? {
            return Err(UserError::NotFound);
        }

        let result = sqlx::query(
            "INSERT INTO follows (follower_id, followed_id) VALUES ($1, $2) ON CONFLICT (follower_id, followed_id) DO NOTHING",
        )
        .bind(follower)
        .bind(followed)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(UserError::AlreadyFollowing);
        }

        self.notifications
            .notify(followed, follower, NotificationType::Follow, None)
            .await?;

        info!("User {} now follows {}", follower, followed);
        Ok(())
    }

    /// Remove a follow edge; absence of the edge is not an error
    pub async fn unfollow(&self, follower: Uuid, followed: Uuid) -> Result<(), UserError> {
        if !self.user_exists(followed).await? {
            return Err(UserError::NotFound);
        }

        sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
            .bind(follower)
            .bind(followed)
            .execute(&self.pool)
            .await?;

        info!("User {} unfollowed {}", follower, followed);
        Ok(())
    }

    /// A handful of random users the viewer might want to follow
    pub async fn suggestions(&self, viewer: Uuid) -> Result<Vec<UserSummary>, UserError> {
        let rows = sqlx::query_as::<_, DecoratedUserRow>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.username, u.profile_image,
                   EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = u.id) AS is_following
            FROM users u
            WHERE u.id <> $1
            ORDER BY RANDOM()
            LIMIT $2
            "#,
        )
        .bind(viewer)
        .bind(SUGGESTION_COUNT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserSummary::from).collect())
    }

    /// Substring search over names and handles, decorated with the viewer's
    /// follow state. Empty query returns an empty result by definition.
    pub async fn search_users(&self, query: &str, viewer: Uuid) -> Result<Vec<UserSummary>, UserError> {
        let pattern = match like_pattern(query) {
            Some(pattern) => pattern,
            None => return Ok(Vec::new()),
        };

        let rows = sqlx::query_as::<_, DecoratedUserRow>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.username, u.profile_image,
                   EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = u.id) AS is_following
            FROM users u
            WHERE u.id <> $1 AND (
                u.first_name ILIKE $2 OR
                u.last_name ILIKE $2 OR
                u.username ILIKE $2 OR
                (u.first_name || ' ' || u.last_name) ILIKE $2
            )
            LIMIT $3
            "#,
        )
        .bind(viewer)
        .bind(&pattern)
        .bind(SEARCH_RESULT_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserSummary::from).collect())
    }
}
