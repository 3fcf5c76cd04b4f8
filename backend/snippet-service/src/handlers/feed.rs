/// Feed handler - the sampled home feed
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::clients::IdentityClient;
use crate::config::Config;
use crate::error::Result;
use crate::models::DisplayPost;
use crate::services::feed;

/// Get the feed
/// GET /api/v1/feed
#[utoipa::path(
    get,
    path = "/api/v1/feed",
    tag = "feed",
    responses(
        (status = 200, description = "Sampled, popularity-ranked recent posts", body = [DisplayPost]),
        (status = 500, description = "Store or identity provider failure"),
    ),
)]
pub async fn get_feed(
    pool: web::Data<PgPool>,
    identity: web::Data<IdentityClient>,
    config: web::Data<Config>,
) -> Result<HttpResponse> {
    let posts = feed::get_feed(
        pool.get_ref(),
        identity.get_ref(),
        &config.identity.default_avatar_url,
        config.feed.sample_min,
        config.feed.sample_max,
    )
    .await?;

    Ok(HttpResponse::Ok().json(posts))
}
