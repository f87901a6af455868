use crate::comment::model::{CommentError, CommentResponse, CommentRow, CreateCommentRequest};
use crate::notification::model::NotificationType;
use crate::notification::service::NotificationService;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentService {
    pool: PgPool,
    notifications: Arc<NotificationService>,
}

impl CommentService {
    pub fn new(pool: PgPool, notifications: Arc<NotificationService>) -> Self {
        Self {
            pool,
            notifications,
        }
    }

    /// Append a comment to a post and notify the post owner.
    ///
    /// Commenting on your own post does not notify; the notification
    /// service drops self-directed events.
    pub async fn create_comment(
        &self,
        post_id: i64,
        user_id: Uuid,
        comment_data: CreateCommentRequest,
    ) -> Result<CommentResponse, CommentError> {
        if comment_data.content.trim().is_empty() {
            return Err(CommentError::EmptyContent);
        }

        let owner: Option<(Uuid,)> = sqlx::query_as("SELECT user_id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        let (owner_id,) = owner.ok_or(CommentError::PostNotFound)?;

        let comment = sqlx::query_as::<_, CommentRow>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (post_id, user_id, content)
                VALUES ($1, $2, $3)
                RETURNING id, post_id, content, created_at, user_id
            )
            SELECT i.id, i.post_id, i.content, i.created_at, i.user_id,
                   u.first_name, u.last_name, u.username, u.profile_image
            FROM inserted i
            JOIN users u ON i.user_id = u.id
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(&comment_data.content)
        .fetch_one(&self.pool)
        .await?;

        self.notifications
            .notify(owner_id, user_id, NotificationType::Comment, Some(post_id))
            .await?;

        info!("Created comment with ID: {} for post: {}", comment.id, post_id);
        Ok(comment.into())
    }

    /// Full comment thread for one post, newest first
    pub async fn get_post_comments(&self, post_id: i64) -> Result<Vec<CommentResponse>, CommentError> {
        let post_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;

        if !post_exists {
            return Err(CommentError::PostNotFound);
        }

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.post_id, c.content, c.created_at, c.user_id,
                   u.first_name, u.last_name, u.username, u.profile_image
            FROM comments c
            JOIN users u ON c.user_id = u.id
            WHERE c.post_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentResponse::from).collect())
    }
}
