use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::clients::IdentityClient;
use crate::db::post_repo;
use crate::error::Result;
use crate::models::DisplayUser;

/// Shown when a user has no posts to derive a language from
pub const NO_CODING_DATA: &str = "No Coding Data";

/// Assemble the profile DTO for an author page.
///
/// The identity record is authoritative and a failed lookup is an error;
/// a failed post query only degrades the derived fields.
pub async fn get_user_details(
    pool: &PgPool,
    identity: &IdentityClient,
    user_id: Uuid,
) -> Result<DisplayUser> {
    let user = identity.get_user_by_id(user_id).await?;

    let (posts_number, most_used_language) = match post_repo::find_by_author(pool, user_id).await {
        Ok(posts) => {
            let languages: Vec<String> =
                posts.iter().map(|post| post.code_language.clone()).collect();
            let most_used =
                most_frequent(&languages).unwrap_or_else(|| NO_CODING_DATA.to_string());
            (posts.len() as i64, most_used)
        }
        Err(err) => {
            tracing::warn!(
                user_id = %user_id,
                "post lookup failed while building profile: {err}"
            );
            (0, NO_CODING_DATA.to_string())
        }
    };

    Ok(DisplayUser {
        name: user.user_metadata.name.clone(),
        user_name: Some(user.user_metadata.user_name.clone().unwrap_or_default()),
        avatar_url: user.user_metadata.avatar_url.clone(),
        posts_number,
        most_used_language,
        has_github: user.has_github(),
    })
}

/// Most common element of a slice.
///
/// Ties resolve to the first element that reaches the maximal count,
/// scanning in input order.
pub fn most_frequent(items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut best = items[0].as_str();
    let mut best_count = 0;

    for item in items {
        let count = counts
            .entry(item.as_str())
            .and_modify(|c| *c += 1)
            .or_insert(1);
        if *count > best_count {
            best_count = *count;
            best = item;
        }
    }

    Some(best.to_string())
}
