use crate::message::model::{
    ConversationResponse, ConversationRow, MessageError, MessageResponse, MessageRow,
    SendMessageRequest,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct MessageService {
    pool: PgPool,
}

impl MessageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn user_exists(&self, user_id: Uuid) -> Result<bool, MessageError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Inbox view: every user the caller has exchanged messages with,
    /// newest conversation first. The preview text, timestamp and
    /// unread count are derived per counterparty in a single query.
    pub async fn conversations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationResponse>, MessageError> {
        let rows = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.username, u.profile_image,
                   (SELECT m.content FROM messages m
                    WHERE (m.sender_id = u.id AND m.receiver_id = $1)
                       OR (m.sender_id = $1 AND m.receiver_id = u.id)
                    ORDER BY m.created_at DESC LIMIT 1) AS last_message,
                   (SELECT m.created_at FROM messages m
                    WHERE (m.sender_id = u.id AND m.receiver_id = $1)
                       OR (m.sender_id = $1 AND m.receiver_id = u.id)
                    ORDER BY m.created_at DESC LIMIT 1) AS last_message_time,
                   (SELECT COUNT(*) FROM messages m
                    WHERE m.sender_id = u.id AND m.receiver_id = $1
                      AND m.read_state = 'unread') AS unread_count
            FROM users u
            WHERE u.id <> $1
              AND EXISTS (
                  SELECT 1 FROM messages m
                  WHERE (m.sender_id = u.id AND m.receiver_id = $1)
                     OR (m.sender_id = $1 AND m.receiver_id = u.id)
              )
            ORDER BY last_message_time DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ConversationResponse::from).collect())
    }

    /// Full thread between the caller and one counterparty, oldest first.
    ///
    /// Opening a thread marks everything the counterparty sent as read.
    pub async fn get_messages(
        &self,
        user_id: Uuid,
        other_id: Uuid,
    ) -> Result<Vec<MessageResponse>, MessageError> {
        if !self.user_exists(other_id).await? {
            return Err(MessageError::UserNotFound);
        }

        sqlx::query(
            "UPDATE messages SET read_state = 'read'
             WHERE sender_id = $1 AND receiver_id = $2 AND read_state = 'unread'",
        )
        .bind(other_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, sender_id, receiver_id, content, read_state, created_at
            FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(other_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MessageResponse::from).collect())
    }

    pub async fn send_message(
        &self,
        sender_id: Uuid,
        message_data: SendMessageRequest,
    ) -> Result<MessageResponse, MessageError> {
        if message_data.content.trim().is_empty() {
            return Err(MessageError::EmptyContent);
        }

        if !self.user_exists(message_data.receiver_id).await? {
            return Err(MessageError::UserNotFound);
        }

        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (sender_id, receiver_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, sender_id, receiver_id, content, read_state, created_at
            "#,
        )
        .bind(sender_id)
        .bind(message_data.receiver_id)
        .bind(&message_data.content)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Message {} sent from {} to {}",
            row.id, sender_id, row.receiver_id
        );
        Ok(row.into())
    }

    /// Mark every message from one sender as read without fetching the
    /// thread. Idempotent.
    pub async fn mark_read(&self, user_id: Uuid, other_id: Uuid) -> Result<(), MessageError> {
        if !self.user_exists(other_id).await? {
            return Err(MessageError::UserNotFound);
        }

        sqlx::query(
            "UPDATE messages SET read_state = 'read'
             WHERE sender_id = $1 AND receiver_id = $2 AND read_state = 'unread'",
        )
        .bind(other_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
