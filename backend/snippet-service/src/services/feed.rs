use rand::Rng;
use sqlx::PgPool;

use crate::clients::IdentityClient;
use crate::db::post_repo;
use crate::error::Result;
use crate::models::{DisplayPost, Post};

/// Assemble the feed: a popularity-biased sample of recent posts.
pub async fn get_feed(
    pool: &PgPool,
    identity: &IdentityClient,
    default_avatar: &str,
    sample_min: usize,
    sample_max: usize,
) -> Result<Vec<DisplayPost>> {
    let posts = post_repo::find_all(pool).await?;
    let sampled = sample_recent(posts, sample_min, sample_max, &mut rand::thread_rng());
    Ok(resolve_display(sampled, identity, default_avatar).await)
}

/// Order posts by recency, keep a randomly sized window, then rank that
/// window by like count.
///
/// The window length is drawn uniformly from `sample_min..=sample_max`
/// on every call; no seed is persisted. A collection smaller than the
/// drawn length is returned whole.
pub fn sample_recent<R: Rng>(
    mut posts: Vec<Post>,
    sample_min: usize,
    sample_max: usize,
    rng: &mut R,
) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let count = rng.gen_range(sample_min..=sample_max);
    posts.truncate(count);

    posts.sort_by(|a, b| b.likes.cmp(&a.likes));
    posts
}

/// Attach author avatars, dropping posts whose author no longer resolves
/// at the identity provider.
pub async fn resolve_display(
    posts: Vec<Post>,
    identity: &IdentityClient,
    default_avatar: &str,
) -> Vec<DisplayPost> {
    let mut display = Vec::with_capacity(posts.len());

    for post in posts {
        match identity.get_user_by_id(post.author_id).await {
            Ok(user) => {
                let avatar = user
                    .user_metadata
                    .avatar_url
                    .unwrap_or_else(|| default_avatar.to_string());
                display.push(DisplayPost::from_post(post, avatar));
            }
            Err(err) => {
                tracing::warn!(
                    post_id = post.id,
                    author_id = %post.author_id,
                    "dropping post, author lookup failed: {err}"
                );
            }
        }
    }

    display
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn create_post(id: i64, created_at: DateTime<Utc>, likes: i32) -> Post {
        Post {
            id,
            created_at,
            code: format!("let x = {};", id),
            instructions: format!("Post {}", id),
            author_name: "Ada".to_string(),
            author_id: Uuid::new_v4(),
            likes,
            share_link: format!("https://learn.shareacode.cc/posts?postId={}", id),
            code_language: "rust".to_string(),
        }
    }

    fn posts_fixture(total: usize) -> Vec<Post> {
        let now = Utc::now();
        (0..total)
            .map(|i| create_post(i as i64, now - Duration::hours(i as i64), (i % 7) as i32))
            .collect()
    }

    #[test]
    fn sample_is_empty_for_empty_input() {
        let mut rng = StdRng::seed_from_u64(1);
        let sampled = sample_recent(Vec::new(), 10, 15, &mut rng);
        assert!(sampled.is_empty());
    }

    #[test]
    fn sample_size_stays_within_bounds() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sampled = sample_recent(posts_fixture(40), 10, 15, &mut rng);
            assert!(sampled.len() >= 10, "seed {seed}: {} too small", sampled.len());
            assert!(sampled.len() <= 15, "seed {seed}: {} too large", sampled.len());
        }
    }

    #[test]
    fn sample_never_exceeds_available_posts() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sampled = sample_recent(posts_fixture(4), 10, 15, &mut rng);
            assert_eq!(sampled.len(), 4);
        }
    }

    #[test]
    fn sample_keeps_only_the_most_recent_posts() {
        let mut rng = StdRng::seed_from_u64(7);
        let sampled = sample_recent(posts_fixture(40), 10, 15, &mut rng);

        // Ids 0..n are ordered newest-first in the fixture, so a window of
        // length n must contain exactly the ids below n.
        let n = sampled.len() as i64;
        assert!(sampled.iter().all(|post| post.id < n));
    }

    #[test]
    fn sampled_window_is_ordered_by_likes() {
        let mut rng = StdRng::seed_from_u64(42);
        let sampled = sample_recent(posts_fixture(40), 10, 15, &mut rng);

        for pair in sampled.windows(2) {
            assert!(pair[0].likes >= pair[1].likes);
        }
    }

    #[test]
    fn fixed_bounds_pin_the_window_length() {
        let mut rng = StdRng::seed_from_u64(3);
        let sampled = sample_recent(posts_fixture(40), 12, 12, &mut rng);
        assert_eq!(sampled.len(), 12);
    }
}
