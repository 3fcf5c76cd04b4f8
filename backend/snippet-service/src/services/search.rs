use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use crate::clients::IdentityClient;
use crate::db::post_repo;
use crate::error::Result;
use crate::models::{DisplayPost, Post};
use crate::services::feed::resolve_display;

/// Optional filters accepted by the search route.
#[derive(Debug, Default, Clone)]
pub struct SearchFilters {
    pub author_id: Option<Uuid>,
    pub language: Option<String>,
    pub keywords: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.author_id.is_none() && self.language.is_none() && self.keywords.is_none()
    }
}

/// Resolve each active filter independently against the store, then
/// combine the result sets and attach author avatars.
pub async fn search(
    pool: &PgPool,
    identity: &IdentityClient,
    default_avatar: &str,
    filters: &SearchFilters,
) -> Result<Vec<DisplayPost>> {
    let author_posts = match filters.author_id {
        Some(author_id) => Some(post_repo::find_by_author(pool, author_id).await?),
        None => None,
    };

    let language_posts = match &filters.language {
        Some(language) => Some(post_repo::find_by_language(pool, language).await?),
        None => None,
    };

    let keyword_posts = match &filters.keywords {
        Some(keywords) => {
            let query = websearch_query(keywords);
            let code_hits = post_repo::search_code(pool, &query).await?;
            let instruction_hits = post_repo::search_instructions(pool, &query).await?;
            Some(merge_keyword_hits(code_hits, instruction_hits))
        }
        None => None,
    };

    let posts = compose(author_posts, language_posts, keyword_posts);
    Ok(resolve_display(posts, identity, default_avatar).await)
}

/// Rewrite raw keywords into an any-of web-search expression, so every
/// word may match on its own ("quick sort" becomes "quick or sort").
pub fn websearch_query(keywords: &str) -> String {
    keywords.split_whitespace().collect::<Vec<_>>().join(" or ")
}

/// Merge code-field and instructions-field hits, keeping one copy of
/// posts that matched both. The instructions hit wins the duplicate.
pub fn merge_keyword_hits(code_hits: Vec<Post>, instruction_hits: Vec<Post>) -> Vec<Post> {
    let mut merged: Vec<Post> = code_hits
        .into_iter()
        .filter(|post| !instruction_hits.iter().any(|other| other.id == post.id))
        .collect();
    merged.extend(instruction_hits);
    merged
}

/// Combine the per-filter result sets.
///
/// A single active filter passes through unchanged. With several active
/// filters the sets intersect by post id, narrowing from the first
/// active set. The result is deduplicated by id (first occurrence wins)
/// and ordered by recency, newest first.
pub fn compose(
    author: Option<Vec<Post>>,
    language: Option<Vec<Post>>,
    keywords: Option<Vec<Post>>,
) -> Vec<Post> {
    let sets: Vec<Vec<Post>> = [author, language, keywords].into_iter().flatten().collect();

    let mut combined: Vec<Post> = match sets.len() {
        0 => Vec::new(),
        1 => sets.into_iter().next().unwrap_or_default(),
        _ => {
            let mut iter = sets.into_iter();
            let mut current = iter.next().unwrap_or_default();
            for other in iter {
                current.retain(|post| other.iter().any(|candidate| candidate.id == post.id));
            }
            current
        }
    };

    let mut seen = HashSet::new();
    combined.retain(|post| seen.insert(post.id));
    combined.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn create_post(id: i64, created_at: DateTime<Utc>, likes: i32) -> Post {
        Post {
            id,
            created_at,
            code: format!("print({})", id),
            instructions: format!("Post {}", id),
            author_name: "Grace".to_string(),
            author_id: Uuid::new_v4(),
            likes,
            share_link: format!("https://learn.shareacode.cc/posts?postId={}", id),
            code_language: "python".to_string(),
        }
    }

    fn post(id: i64, hours_ago: i64) -> Post {
        create_post(id, Utc::now() - Duration::hours(hours_ago), 0)
    }

    #[test]
    fn websearch_query_joins_words_with_or() {
        assert_eq!(websearch_query("quick sort"), "quick or sort");
        assert_eq!(websearch_query("  binary   search  "), "binary or search");
        assert_eq!(websearch_query("single"), "single");
        assert_eq!(websearch_query(""), "");
    }

    #[test]
    fn merge_favors_instruction_hits_over_code_hits() {
        let code_hits = vec![create_post(1, Utc::now(), 5), create_post(2, Utc::now(), 0)];
        // Same id as a code hit, but a different row snapshot.
        let instruction_hits = vec![create_post(2, Utc::now(), 99), create_post(3, Utc::now(), 0)];

        let merged = merge_keyword_hits(code_hits, instruction_hits);

        let ids: Vec<i64> = merged.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // The surviving copy of post 2 is the instructions hit.
        let duplicate = merged.iter().find(|p| p.id == 2).unwrap();
        assert_eq!(duplicate.likes, 99);
    }

    #[test]
    fn single_filter_passes_through() {
        let posts = vec![post(1, 2), post(2, 1), post(3, 3)];
        let composed = compose(None, Some(posts), None);

        let ids: Vec<i64> = composed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1, 3]); // newest first
    }

    #[test]
    fn multiple_filters_intersect_by_id() {
        let author = vec![post(1, 1), post(2, 2), post(3, 3)];
        let language = vec![post(2, 2), post(3, 3), post(4, 4)];

        let composed = compose(Some(author), Some(language), None);

        let ids: Vec<i64> = composed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn disjoint_filters_yield_the_empty_set() {
        let author = vec![post(1, 1), post(2, 2)];
        let language = vec![post(3, 3), post(4, 4)];

        let composed = compose(Some(author), Some(language), None);
        assert!(composed.is_empty());
    }

    #[test]
    fn three_way_intersection_narrows_progressively() {
        let author = vec![post(1, 1), post(2, 2), post(3, 3)];
        let language = vec![post(2, 2), post(3, 3)];
        let keywords = vec![post(3, 3), post(4, 4)];

        let composed = compose(Some(author), Some(language), Some(keywords));

        let ids: Vec<i64> = composed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn duplicates_are_removed_by_id() {
        let posts = vec![post(1, 1), post(1, 1), post(2, 2)];
        let composed = compose(Some(posts), None, None);

        let ids: Vec<i64> = composed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn composition_is_idempotent_under_resorting() {
        let posts = vec![post(3, 5), post(1, 1), post(2, 3)];
        let once = compose(Some(posts), None, None);
        let twice = compose(Some(once.clone()), None, None);

        let once_ids: Vec<i64> = once.iter().map(|p| p.id).collect();
        let twice_ids: Vec<i64> = twice.iter().map(|p| p.id).collect();
        assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn no_active_filter_yields_nothing() {
        assert!(compose(None, None, None).is_empty());
    }
}
