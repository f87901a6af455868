use crate::notification::model::{
    NotificationError, NotificationResponse, NotificationRow, NotificationType,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an interaction notification for a recipient.
    ///
    /// Self-directed actions never notify: a user liking or commenting on
    /// their own post, or any other recipient == sender case, is dropped
    /// here rather than at every call site.
    pub async fn notify(
        &self,
        recipient_id: Uuid,
        sender_id: Uuid,
        kind: NotificationType,
        post_id: Option<i64>,
    ) -> Result<(), NotificationError> {
        if recipient_id == sender_id {
            return Ok(());
        }

        sqlx::query("INSERT INTO notifications (user_id, sender_id, kind, post_id) VALUES ($1, $2, $3, $4)")
            .bind(recipient_id)
            .bind(sender_id)
            .bind(kind)
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        info!(
            "Created {:?} notification for recipient {}",
            kind, recipient_id
        );
        Ok(())
    }

    /// All notifications for a recipient, newest first, with sender summaries
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<NotificationResponse>, NotificationError> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT n.id, n.kind, n.read_state, n.created_at, n.post_id, n.sender_id,
                   u.first_name, u.last_name, u.username, u.profile_image
            FROM notifications n
            JOIN users u ON n.sender_id = u.id
            WHERE n.user_id = $1
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(NotificationResponse::from).collect())
    }

    /// Unread notification count, computed at query time
    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, NotificationError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read_state = 'unread'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Mark one notification as read. The update is scoped to the recipient
    /// so a caller can never flip someone else's notification.
    pub async fn mark_read(
        &self,
        notification_id: i64,
        user_id: Uuid,
    ) -> Result<(), NotificationError> {
        let result = sqlx::query(
            "UPDATE notifications SET read_state = 'read' WHERE id = $1 AND user_id = $2",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(NotificationError::NotFound);
        }

        info!("Marked notification {} as read", notification_id);
        Ok(())
    }

    /// Mark everything read; idempotent by construction
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<(), NotificationError> {
        sqlx::query("UPDATE notifications SET read_state = 'read' WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        info!("Marked all notifications read for user {}", user_id);
        Ok(())
    }
}
