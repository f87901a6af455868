use crate::comment::model::{CommentResponse, CommentRow};
use crate::db::like_pattern;
use crate::notification::model::{NotificationError, NotificationType};
use crate::notification::service::NotificationService;
use crate::post::model::{CreatePostRequest, LikeRow, LikeState, PostResponse, PostRow};
use crate::user::model::UserSummary;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Fixed window size for the bounded feeds (home, trending, latest, search)
const FEED_PAGE_SIZE: i64 = 20;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Notification error: {0}")]
    NotificationError(#[from] NotificationError),

    #[error("Post not found")]
    NotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Comment data gathered for a page of posts: either full comment threads
/// or just grouped counts, depending on what the feed shape returns
pub(crate) enum CommentHydration {
    Full(Vec<CommentRow>),
    CountOnly(HashMap<i64, i64>),
}

/// Combine a page of post rows with batched like and comment data into
/// hydrated views. `viewer` determines `user_liked`; the same page assembled
/// for two different viewers yields different flags.
pub(crate) fn assemble_post_views(
    rows: Vec<PostRow>,
    likes: Vec<LikeRow>,
    comments: CommentHydration,
    viewer: Uuid,
) -> Vec<PostResponse> {
    let mut likes_by_post: HashMap<i64, Vec<Uuid>> = HashMap::new();
    for like in likes {
        likes_by_post.entry(like.post_id).or_default().push(like.user_id);
    }

    let (mut full_comments, mut comment_counts) = match comments {
        CommentHydration::Full(comment_rows) => {
            let mut by_post: HashMap<i64, Vec<CommentResponse>> = HashMap::new();
            for row in comment_rows {
                by_post.entry(row.post_id).or_default().push(row.into());
            }
            let counts = by_post
                .iter()
                .map(|(post_id, list)| (*post_id, list.len() as i64))
                .collect();
            (Some(by_post), counts)
        }
        CommentHydration::CountOnly(counts) => (None, counts),
    };

    rows.into_iter()
        .map(|row| {
            let likes = likes_by_post.remove(&row.id).unwrap_or_default();
            let user_liked = likes.contains(&viewer);
            let comment_count = comment_counts.remove(&row.id).unwrap_or(0);
            let comments = full_comments
                .as_mut()
                .map(|by_post| by_post.remove(&row.id).unwrap_or_default());

            PostResponse {
                id: row.id,
                content: row.content,
                image: row.image,
                created_at: row.created_at,
                user: UserSummary::new(
                    row.user_id,
                    &row.first_name,
                    &row.last_name,
                    row.username,
                    row.profile_image,
                ),
                like_count: likes.len() as i64,
                likes,
                comments,
                comment_count,
                user_liked,
            }
        })
        .collect()
}

pub struct PostService {
    pool: PgPool,
    notifications: Arc<NotificationService>,
    /// Whether transitioning to liked notifies the post owner. Comment and
    /// follow always notify; this flag makes like coverage an explicit
    /// deployment decision.
    notify_on_like: bool,
}

impl PostService {
    pub fn new(pool: PgPool, notifications: Arc<NotificationService>, notify_on_like: bool) -> Self {
        Self {
            pool,
            notifications,
            notify_on_like,
        }
    }

    /// Batched hydration for a page of posts: one query for all like rows,
    /// one for comment data. Query count is independent of page length.
    async fn hydrate(
        &self,
        rows: Vec<PostRow>,
        viewer: Uuid,
        include_comments: bool,
    ) -> Result<Vec<PostResponse>, PostError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

        let likes = sqlx::query_as::<_, LikeRow>(
            "SELECT post_id, user_id FROM likes WHERE post_id = ANY($1) ORDER BY created_at",
        )
        .bind(&post_ids)
        .fetch_all(&self.pool)
        .await?;

        let comments = if include_comments {
            let comment_rows = sqlx::query_as::<_, CommentRow>(
                r#"
                SELECT c.id, c.post_id, c.content, c.created_at, c.user_id,
                       u.first_name, u.last_name, u.username, u.profile_image
                FROM comments c
                JOIN users u ON c.user_id = u.id
                WHERE c.post_id = ANY($1)
                ORDER BY c.created_at DESC
                "#,
            )
            .bind(&post_ids)
            .fetch_all(&self.pool)
            .await?;

            CommentHydration::Full(comment_rows)
        } else {
            let counts: Vec<(i64, i64)> = sqlx::query_as(
                "SELECT post_id, COUNT(*) FROM comments WHERE post_id = ANY($1) GROUP BY post_id",
            )
            .bind(&post_ids)
            .fetch_all(&self.pool)
            .await?;

            CommentHydration::CountOnly(counts.into_iter().collect())
        };

        Ok(assemble_post_views(rows, likes, comments, viewer))
    }

    /// Create a post and return its hydrated view
    pub async fn create_post(
        &self,
        user_id: Uuid,
        post: CreatePostRequest,
    ) -> Result<PostResponse, PostError> {
        let content = post.content.filter(|c| !c.trim().is_empty());
        if content.is_none() && post.image.is_none() {
            return Err(PostError::InvalidInput(
                "Post must have content or an image".to_string(),
            ));
        }

        let post_id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (user_id, content, image) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(&content)
        .bind(&post.image)
        .fetch_one(&self.pool)
        .await?;

        info!("Created post with ID: {}", post_id);
        self.get_post(post_id, user_id).await
    }

    /// Single hydrated post with its full comment thread
    pub async fn get_post(&self, post_id: i64, viewer: Uuid) -> Result<PostResponse, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.user_id, p.content, p.image, p.created_at,
                   u.first_name, u.last_name, u.username, u.profile_image
            FROM posts p
            JOIN users u ON p.user_id = u.id
            WHERE p.id = $1
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows, viewer, true)
            .await?
            .into_iter()
            .next()
            .ok_or(PostError::NotFound)
    }

    /// Home feed: the viewer's own posts plus posts from everyone they
    /// follow, newest first, fixed window
    pub async fn home_feed(&self, viewer: Uuid) -> Result<Vec<PostResponse>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.user_id, p.content, p.image, p.created_at,
                   u.first_name, u.last_name, u.username, u.profile_image
            FROM posts p
            JOIN users u ON p.user_id = u.id
            WHERE p.user_id = $1
               OR p.user_id IN (SELECT followed_id FROM follows WHERE follower_id = $1)
            ORDER BY p.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(viewer)
        .bind(FEED_PAGE_SIZE)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows, viewer, true).await
    }

    /// Trending feed: all posts ranked by total engagement
    /// (likes + comments), ties broken by recency
    pub async fn trending_feed(&self, viewer: Uuid) -> Result<Vec<PostResponse>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.user_id, p.content, p.image, p.created_at,
                   u.first_name, u.last_name, u.username, u.profile_image
            FROM posts p
            JOIN users u ON p.user_id = u.id
            ORDER BY (
                (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) +
                (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id)
            ) DESC, p.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(FEED_PAGE_SIZE)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows, viewer, true).await
    }

    /// Latest feed: all posts, newest first
    pub async fn latest_feed(&self, viewer: Uuid) -> Result<Vec<PostResponse>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.user_id, p.content, p.image, p.created_at,
                   u.first_name, u.last_name, u.username, u.profile_image
            FROM posts p
            JOIN users u ON p.user_id = u.id
            ORDER BY p.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(FEED_PAGE_SIZE)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows, viewer, true).await
    }

    /// All posts by a profile user, newest first, unbounded
    pub async fn profile_feed(
        &self,
        username: &str,
        viewer: Uuid,
    ) -> Result<Vec<PostResponse>, PostError> {
        let owner: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        let (owner_id,) = owner.ok_or(PostError::UserNotFound)?;

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.user_id, p.content, p.image, p.created_at,
                   u.first_name, u.last_name, u.username, u.profile_image
            FROM posts p
            JOIN users u ON p.user_id = u.id
            WHERE p.user_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows, viewer, false).await
    }

    /// Substring search over post content with latest-feed ordering.
    /// Empty query returns an empty result by definition.
    pub async fn search_posts(
        &self,
        query: &str,
        viewer: Uuid,
    ) -> Result<Vec<PostResponse>, PostError> {
        let pattern = match like_pattern(query) {
            Some(pattern) => pattern,
            None => return Ok(Vec::new()),
        };

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.user_id, p.content, p.image, p.created_at,
                   u.first_name, u.last_name, u.username, u.profile_image
            FROM posts p
            JOIN users u ON p.user_id = u.id
            WHERE p.content ILIKE $1
            ORDER BY p.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(&pattern)
        .bind(FEED_PAGE_SIZE)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows, viewer, false).await
    }

    /// Flip the like state for (post, user) and return the new state.
    ///
    /// The insert relies on the (post_id, user_id) primary key: a conflict
    /// means the like already existed, so the toggle removes it. Concurrent
    /// duplicate requests are settled by the constraint, not by a prior read.
    pub async fn toggle_like(&self, post_id: i64, user_id: Uuid) -> Result<LikeState, PostError> {
        let owner: Option<(Uuid,)> = sqlx::query_as("SELECT user_id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        let (owner_id,) = owner.ok_or(PostError::NotFound)?;

        let inserted = sqlx::query(
            "INSERT INTO likes (post_id, user_id) VALUES ($1, $2) ON CONFLICT (post_id, user_id) DO NOTHING",
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted == 1 {
            if self.notify_on_like {
                self.notifications
                    .notify(owner_id, user_id, NotificationType::Like, Some(post_id))
                    .await?;
            }
            info!("User {} liked post {}", user_id, post_id);
            Ok(LikeState::Liked)
        } else {
            sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
                .bind(post_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

            info!("User {} unliked post {}", user_id, post_id);
            Ok(LikeState::Unliked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn post_row(id: i64, owner: Uuid, content: &str, age_minutes: i64) -> PostRow {
        PostRow {
            id,
            user_id: owner,
            content: Some(content.to_string()),
            image: None,
            created_at: Utc::now() - Duration::minutes(age_minutes),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            username: "ada".to_string(),
            profile_image: None,
        }
    }

    fn comment_row(id: i64, post_id: i64, author: Uuid) -> CommentRow {
        CommentRow {
            id,
            post_id,
            content: "nice".to_string(),
            created_at: Utc::now(),
            user_id: author,
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            username: "grace".to_string(),
            profile_image: None,
        }
    }

    #[test]
    fn test_user_liked_is_viewer_relative() {
        let owner = Uuid::new_v4();
        let liker = Uuid::new_v4();
        let other = Uuid::new_v4();

        let rows = vec![post_row(1, owner, "hello world", 0)];
        let likes = vec![LikeRow {
            post_id: 1,
            user_id: liker,
        }];

        let as_liker = assemble_post_views(
            rows,
            likes,
            CommentHydration::CountOnly(HashMap::new()),
            liker,
        );
        assert!(as_liker[0].user_liked);
        assert_eq!(as_liker[0].like_count, 1);

        let rows = vec![post_row(1, owner, "hello world", 0)];
        let likes = vec![LikeRow {
            post_id: 1,
            user_id: liker,
        }];
        let as_other = assemble_post_views(
            rows,
            likes,
            CommentHydration::CountOnly(HashMap::new()),
            other,
        );
        assert!(!as_other[0].user_liked);
        assert_eq!(as_other[0].like_count, 1);
    }

    #[test]
    fn test_counts_and_like_list() {
        let owner = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let rows = vec![post_row(1, owner, "first", 1), post_row(2, owner, "second", 0)];
        let likes = vec![
            LikeRow { post_id: 1, user_id: a },
            LikeRow { post_id: 1, user_id: b },
        ];
        let comments = vec![comment_row(10, 1, a), comment_row(11, 1, b), comment_row(12, 2, a)];

        let views =
            assemble_post_views(rows, likes, CommentHydration::Full(comments), owner);

        assert_eq!(views[0].like_count, 2);
        assert_eq!(views[0].likes, vec![a, b]);
        assert_eq!(views[0].comment_count, 2);
        assert_eq!(views[0].comments.as_ref().unwrap().len(), 2);

        assert_eq!(views[1].like_count, 0);
        assert!(views[1].likes.is_empty());
        assert_eq!(views[1].comment_count, 1);
    }

    #[test]
    fn test_count_only_hydration_omits_comment_lists() {
        let owner = Uuid::new_v4();
        let rows = vec![post_row(1, owner, "hello", 0)];
        let counts = HashMap::from([(1, 5)]);

        let views = assemble_post_views(
            rows,
            Vec::new(),
            CommentHydration::CountOnly(counts),
            owner,
        );

        assert!(views[0].comments.is_none());
        assert_eq!(views[0].comment_count, 5);
    }

    #[test]
    fn test_row_order_is_preserved() {
        let owner = Uuid::new_v4();
        let rows = vec![
            post_row(3, owner, "newest", 0),
            post_row(1, owner, "middle", 5),
            post_row(2, owner, "oldest", 10),
        ];

        let views = assemble_post_views(
            rows,
            Vec::new(),
            CommentHydration::CountOnly(HashMap::new()),
            owner,
        );

        let ids: Vec<i64> = views.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_post_without_engagement_hydrates_to_zeros() {
        let owner = Uuid::new_v4();
        let rows = vec![post_row(1, owner, "hello world", 0)];

        let views = assemble_post_views(
            rows,
            Vec::new(),
            CommentHydration::Full(Vec::new()),
            owner,
        );

        assert_eq!(views[0].like_count, 0);
        assert_eq!(views[0].comment_count, 0);
        assert!(!views[0].user_liked);
        assert!(views[0].comments.as_ref().unwrap().is_empty());
    }
}
