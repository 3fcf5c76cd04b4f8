/// User handlers - author profile lookup
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::clients::IdentityClient;
use crate::error::Result;
use crate::models::DisplayUser;
use crate::services::profile;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Identity-provider id of the author
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// Get an author profile
/// GET /api/v1/users?userId=U
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(UserQuery),
    responses(
        (status = 200, description = "Derived profile for the author", body = DisplayUser),
        (status = 500, description = "Identity lookup failure"),
    ),
)]
pub async fn get_user(
    pool: web::Data<PgPool>,
    identity: web::Data<IdentityClient>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    let user = profile::get_user_details(pool.get_ref(), identity.get_ref(), query.user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}
