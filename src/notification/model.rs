use crate::user::model::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Two-state read flag with a monotonic unread -> read transition.
/// There is no path back to unread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "read_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReadState {
    Unread,
    Read,
}

impl ReadState {
    pub fn is_read(self) -> bool {
        matches!(self, ReadState::Read)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notification_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Like,
    Comment,
    Follow,
}

#[derive(Debug, FromRow)]
pub struct NotificationRow {
    pub id: i64,
    pub kind: NotificationType,
    pub read_state: ReadState,
    pub created_at: DateTime<Utc>,
    pub post_id: Option<i64>,
    pub sender_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub read: bool,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
    pub post_id: Option<i64>,
    pub sender: UserSummary,
}

impl From<NotificationRow> for NotificationResponse {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            kind: row.kind,
            read: row.read_state.is_read(),
            created_at: row.created_at,
            post_id: row.post_id,
            sender: UserSummary::new(
                row.sender_id,
                &row.first_name,
                &row.last_name,
                row.username,
                row.profile_image,
            ),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Notification not found")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_state_flag() {
        assert!(!ReadState::Unread.is_read());
        assert!(ReadState::Read.is_read());
    }

    #[test]
    fn test_notification_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&NotificationType::Like).unwrap(),
            "\"like\""
        );
        assert_eq!(
            serde_json::to_string(&NotificationType::Comment).unwrap(),
            "\"comment\""
        );
        assert_eq!(
            serde_json::to_string(&NotificationType::Follow).unwrap(),
            "\"follow\""
        );
    }

    #[test]
    fn test_response_exposes_read_as_bool() {
        let row = NotificationRow {
            id: 7,
            kind: NotificationType::Follow,
            read_state: ReadState::Unread,
            created_at: Utc::now(),
            post_id: None,
            sender_id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            username: "ada".to_string(),
            profile_image: None,
        };

        let response = NotificationResponse::from(row);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["read"], serde_json::json!(false));
        assert_eq!(json["type"], serde_json::json!("follow"));
    }
}
