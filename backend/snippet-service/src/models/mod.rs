/// Data models for the snippet service
///
/// `Post` mirrors a row of the `posts` table. The display types are what
/// the routes return once author identity has been resolved.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A shared code snippet as stored in the `posts` table.
///
/// Rows are written by the external posting flow; this service only reads
/// them and increments the like counter.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub code: String,
    pub instructions: String,
    pub author_name: String,
    pub author_id: Uuid,
    pub likes: i32,
    pub share_link: String,
    pub code_language: String,
}

/// A post enriched with the author's avatar, ready for a feed card.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DisplayPost {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub code: String,
    pub instructions: String,
    pub author_name: String,
    pub author_id: Uuid,
    pub author_image_url: String,
    pub likes: i32,
    pub share_link: String,
    pub code_language: String,
}

impl DisplayPost {
    pub fn from_post(post: Post, author_image_url: String) -> Self {
        DisplayPost {
            id: post.id,
            created_at: post.created_at,
            code: post.code,
            instructions: post.instructions,
            author_name: post.author_name,
            author_id: post.author_id,
            author_image_url,
            likes: post.likes,
            share_link: post.share_link,
            code_language: post.code_language,
        }
    }
}

/// Profile data shown on an author page.
///
/// Everything here is derived: the identity fields come from the provider's
/// user record, the counts from the author's posts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DisplayUser {
    pub name: Option<String>,
    pub user_name: Option<String>,
    pub avatar_url: Option<String>,
    pub posts_number: i64,
    pub most_used_language: String,
    pub has_github: bool,
}
