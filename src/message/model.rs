use crate::notification::model::ReadState;
use crate::user::model::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, FromRow)]
pub struct MessageRow {
    pub id: i64,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub read_state: ReadState,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub content: String,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = UuidWrapper)]
    pub sender_id: Uuid,
    #[schema(value_type = UuidWrapper)]
    pub receiver_id: Uuid,
    pub read: bool,
}

impl From<MessageRow> for MessageResponse {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
            sender_id: row.sender_id,
            receiver_id: row.receiver_id,
            read: row.read_state.is_read(),
        }
    }
}

/// One counterparty the user has exchanged messages with, plus the
/// conversation aggregates derived at query time
#[derive(Debug, FromRow)]
pub struct ConversationRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub profile_image: Option<String>,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub unread_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub user: UserSummary,
    pub last_message: Option<String>,
    #[schema(value_type = Option<DateTimeWrapper>)]
    pub last_message_time: Option<DateTime<Utc>>,
    pub unread_count: i64,
}

impl From<ConversationRow> for ConversationResponse {
    fn from(row: ConversationRow) -> Self {
        Self {
            user: UserSummary::new(
                row.id,
                &row.first_name,
                &row.last_name,
                row.username,
                row.profile_image,
            ),
            last_message: row.last_message,
            last_message_time: row.last_message_time,
            unread_count: row.unread_count,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[schema(value_type = UuidWrapper)]
    pub receiver_id: Uuid,
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("User not found")]
    UserNotFound,

    #[error("Message content must not be empty")]
    EmptyContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_response_read_flag() {
        let row = MessageRow {
            id: 1,
            sender_id: Uuid::new_v4(),
            receiver_id: Uuid::new_v4(),
            content: "hi".to_string(),
            read_state: ReadState::Unread,
            created_at: Utc::now(),
        };

        let response = MessageResponse::from(row);
        assert!(!response.read);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["read"], serde_json::json!(false));
        assert_eq!(json["content"], serde_json::json!("hi"));
    }
}
