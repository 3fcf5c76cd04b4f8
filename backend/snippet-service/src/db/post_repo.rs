use crate::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

/// Fetch every post.
///
/// The feed works from the full collection; ordering happens in the
/// sampling routine.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, created_at, code, instructions, author_name, author_id,
               likes, share_link, code_language
        FROM posts
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Find a post by ID
pub async fn find_by_id(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, created_at, code, instructions, author_name, author_id,
               likes, share_link, code_language
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Find all posts by an author
pub async fn find_by_author(pool: &PgPool, author_id: Uuid) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, created_at, code, instructions, author_name, author_id,
               likes, share_link, code_language
        FROM posts
        WHERE author_id = $1
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Find all posts with a given language tag
pub async fn find_by_language(pool: &PgPool, language: &str) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, created_at, code, instructions, author_name, author_id,
               likes, share_link, code_language
        FROM posts
        WHERE code_language = $1
        "#,
    )
    .bind(language)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Full-text search over the code field
///
/// `query` is a web-search expression; matching uses the generated
/// `code_tsv` column (GIN-indexed).
pub async fn search_code(pool: &PgPool, query: &str) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, created_at, code, instructions, author_name, author_id,
               likes, share_link, code_language
        FROM posts
        WHERE code_tsv @@ websearch_to_tsquery('english', $1)
        "#,
    )
    .bind(query)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Full-text search over the instructions field
pub async fn search_instructions(pool: &PgPool, query: &str) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, created_at, code, instructions, author_name, author_id,
               likes, share_link, code_language
        FROM posts
        WHERE instructions_tsv @@ websearch_to_tsquery('english', $1)
        "#,
    )
    .bind(query)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Increment a post's like count.
///
/// Writes the count the caller observed plus one; racing increments are
/// last-write-wins.
pub async fn update_likes(
    pool: &PgPool,
    current_likes: i32,
    post_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE posts
        SET likes = $1 + 1
        WHERE id = $2
        "#,
    )
    .bind(current_likes)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(())
}
