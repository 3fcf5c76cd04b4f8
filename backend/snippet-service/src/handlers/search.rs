/// Search handlers - filtered post search and the language catalog
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::clients::IdentityClient;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::DisplayPost;
use crate::services::search::{self, SearchFilters};

/// Language tags the search form offers
pub const LANGUAGES: &[&str] = &[
    "js",
    "ts",
    "go",
    "c++",
    "java",
    "python",
    "rust",
    "html",
    "dart",
    "bash",
    "powershell",
];

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Restrict results to a single author
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
    /// Restrict results to a language tag
    pub language: Option<String>,
    /// Free-text keywords matched against code and instructions
    pub keywords: Option<String>,
}

/// Search posts
/// GET /api/v1/search?userId=&language=&keywords=
#[utoipa::path(
    get,
    path = "/api/v1/search",
    tag = "search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Composed search results, newest first", body = [DisplayPost]),
        (status = 400, description = "No filter was given"),
    ),
)]
pub async fn search_posts(
    pool: web::Data<PgPool>,
    identity: web::Data<IdentityClient>,
    config: web::Data<Config>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let filters = SearchFilters {
        author_id: query.user_id,
        language: normalize(query.language),
        keywords: normalize(query.keywords),
    };

    if filters.is_empty() {
        return Err(AppError::BadRequest(
            "at least one of userId, language or keywords is required".to_string(),
        ));
    }

    let posts = search::search(
        pool.get_ref(),
        identity.get_ref(),
        &config.identity.default_avatar_url,
        &filters,
    )
    .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// List the supported language tags
/// GET /api/v1/search/languages
#[utoipa::path(
    get,
    path = "/api/v1/search/languages",
    tag = "search",
    responses((status = 200, description = "Supported language tags", body = [String])),
)]
pub async fn list_languages() -> HttpResponse {
    HttpResponse::Ok().json(LANGUAGES)
}

/// Blank and whitespace-only parameters count as absent.
fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_blank_values() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("".to_string())), None);
        assert_eq!(normalize(Some("   ".to_string())), None);
        assert_eq!(normalize(Some(" rust ".to_string())), Some("rust".to_string()));
    }
}
