/// Post handlers - post detail lookup and the like action
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::{IntoParams, ToSchema};

use crate::clients::IdentityClient;
use crate::config::Config;
use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::models::DisplayPost;
use crate::services::feed::resolve_display;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostQuery {
    /// Numeric id of the post to display
    #[serde(rename = "postId")]
    pub post_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LikeRequest {
    /// Post being liked
    pub post_id: i64,
    /// Like count the client observed; the stored count becomes this plus one
    pub likes: i32,
}

/// Get a single post by id
/// GET /api/v1/posts?postId=N
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    params(PostQuery),
    responses(
        (status = 200, description = "The requested post", body = DisplayPost),
        (status = 404, description = "No such post, or its author no longer resolves"),
    ),
)]
pub async fn get_post(
    pool: web::Data<PgPool>,
    identity: web::Data<IdentityClient>,
    config: web::Data<Config>,
    query: web::Query<PostQuery>,
) -> Result<HttpResponse> {
    let post = post_repo::find_by_id(pool.get_ref(), query.post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", query.post_id)))?;

    let mut display = resolve_display(
        vec![post],
        identity.get_ref(),
        &config.identity.default_avatar_url,
    )
    .await;

    // Posts whose author lookup fails are excluded from display.
    match display.pop() {
        Some(display_post) => Ok(HttpResponse::Ok().json(display_post)),
        None => Err(AppError::NotFound(format!("post {}", query.post_id))),
    }
}

/// Like a post
/// POST /api/v1/posts/like
#[utoipa::path(
    post,
    path = "/api/v1/posts/like",
    tag = "posts",
    request_body = LikeRequest,
    responses(
        (status = 204, description = "Like recorded"),
        (status = 500, description = "Store failure"),
    ),
)]
pub async fn like_post(
    pool: web::Data<PgPool>,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    post_repo::update_likes(pool.get_ref(), req.likes, req.post_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
