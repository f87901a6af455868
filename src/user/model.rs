use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Profile edit payload. Image fields are opaque references produced by the
/// media-storage collaborator and stored verbatim.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
}

/// Compact user representation attached to posts, comments, notifications
/// and search results. `is_following` is only populated where the result is
/// decorated relative to a viewer.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[schema(value_type = UuidWrapper)]
    pub id: Uuid,
    pub full_name: String,
    pub username: String,
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
}

impl UserSummary {
    pub fn new(
        id: Uuid,
        first_name: &str,
        last_name: &str,
        username: String,
        profile_image: Option<String>,
    ) -> Self {
        Self {
            id,
            full_name: format!("{} {}", first_name, last_name),
            username,
            profile_image,
            is_following: None,
        }
    }

    pub fn with_following(mut self, is_following: bool) -> Self {
        self.is_following = Some(is_following);
        self
    }
}

/// Full profile view with follow-graph aggregates, all computed at query time
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    #[schema(value_type = UuidWrapper)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub bio: Option<String>,
    #[schema(value_type = DateTimeWrapper)]
    pub created_at: DateTime<Utc>,
    pub followers_count: i64,
    pub following_count: i64,
    pub is_following: bool,
}

#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub followers_count: i64,
    pub following_count: i64,
    pub is_following: bool,
}

impl From<ProfileRow> for UserProfileResponse {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            full_name: format!("{} {}", row.first_name, row.last_name),
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            email: row.email,
            profile_image: row.profile_image,
            cover_image: row.cover_image,
            bio: row.bio,
            created_at: row.created_at,
            followers_count: row.followers_count,
            following_count: row.following_count,
            is_following: row.is_following,
        }
    }
}

/// Row shape shared by user search and suggestions: user columns plus a
/// viewer-relative follow flag
#[derive(Debug, FromRow)]
pub struct DecoratedUserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub profile_image: Option<String>,
    pub is_following: bool,
}

impl From<DecoratedUserRow> for UserSummary {
    fn from(row: DecoratedUserRow) -> Self {
        UserSummary::new(
            row.id,
            &row.first_name,
            &row.last_name,
            row.username,
            row.profile_image,
        )
        .with_following(row.is_following)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_full_name() {
        let summary = UserSummary::new(Uuid::new_v4(), "Ada", "Lovelace", "ada".to_string(), None);
        assert_eq!(summary.full_name, "Ada Lovelace");
        assert!(summary.is_following.is_none());
    }

    #[test]
    fn test_follow_flag_omitted_unless_decorated() {
        let plain = UserSummary::new(Uuid::new_v4(), "Ada", "Lovelace", "ada".to_string(), None);
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("isFollowing").is_none());

        let decorated = plain.with_following(true);
        let json = serde_json::to_value(&decorated).unwrap();
        assert_eq!(json["isFollowing"], serde_json::json!(true));
    }
}
