use crate::comment::model::CommentResponse;
use crate::user::model::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Post joined with its owner, before hydration
#[derive(Debug, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub user_id: Uuid,
    pub content: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, FromRow)]
pub struct LikeRow {
    pub post_id: i64,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub content: Option<String>,
    /// Opaque media reference returned by the upload collaborator
    pub image: Option<String>,
}

/// Fully hydrated post view. `user_liked` is always relative to the
/// requesting user; `comments` is omitted for feeds that only hydrate counts.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub content: Option<String>,
    pub image: Option<String>,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
    pub user: UserSummary,
    #[schema(value_type = Vec<UuidWrapper>)]
    pub likes: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentResponse>>,
    pub like_count: i64,
    pub comment_count: i64,
    pub user_liked: bool,
}

/// Outcome of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LikeState {
    Liked,
    Unliked,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LikeToggleResponse {
    pub state: LikeState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_state_wire_names() {
        assert_eq!(serde_json::to_string(&LikeState::Liked).unwrap(), "\"liked\"");
        assert_eq!(
            serde_json::to_string(&LikeState::Unliked).unwrap(),
            "\"unliked\""
        );
    }

    #[test]
    fn test_comments_omitted_when_count_only() {
        let response = PostResponse {
            id: 1,
            content: Some("hello".to_string()),
            image: None,
            created_at: Utc::now(),
            user: UserSummary::new(Uuid::new_v4(), "Ada", "Lovelace", "ada".to_string(), None),
            likes: Vec::new(),
            comments: None,
            like_count: 0,
            comment_count: 3,
            user_liked: false,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("comments").is_none());
        assert_eq!(json["commentCount"], serde_json::json!(3));
    }
}
