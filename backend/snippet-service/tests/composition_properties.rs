// Property-style checks of the two routines with real logic: search
// result composition and feed sampling.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use snippet_service::models::Post;
use snippet_service::services::feed::sample_recent;
use snippet_service::services::search::{compose, merge_keyword_hits, websearch_query};

fn post_at(id: i64, created_at: DateTime<Utc>, likes: i32, language: &str) -> Post {
    Post {
        id,
        created_at,
        code: format!("fn main() {{ /* {} */ }}", id),
        instructions: format!("Snippet {}", id),
        author_name: "Linus".to_string(),
        author_id: Uuid::new_v4(),
        likes,
        share_link: format!("https://learn.shareacode.cc/posts?postId={}", id),
        code_language: language.to_string(),
    }
}

fn posts(ids: &[i64]) -> Vec<Post> {
    let now = Utc::now();
    ids.iter()
        .map(|&id| post_at(id, now - Duration::minutes(id), 0, "rust"))
        .collect()
}

#[test]
fn composition_deduplicates_and_orders_newest_first() {
    let composed = compose(Some(posts(&[5, 1, 3, 1, 5])), None, None);

    let ids: Vec<i64> = composed.iter().map(|p| p.id).collect();
    // Lower id means more recent in the fixture.
    assert_eq!(ids, vec![1, 3, 5]);
}

#[test]
fn composition_is_idempotent_under_resorting() {
    let once = compose(Some(posts(&[9, 2, 7, 4])), None, None);
    let twice = compose(Some(once.clone()), None, None);

    assert_eq!(
        once.iter().map(|p| p.id).collect::<Vec<_>>(),
        twice.iter().map(|p| p.id).collect::<Vec<_>>(),
    );
}

#[test]
fn disjoint_author_and_language_filters_intersect_to_nothing() {
    let by_author = posts(&[1, 2, 3]);
    let by_language = posts(&[4, 5, 6]);

    assert!(compose(Some(by_author), Some(by_language), None).is_empty());
}

#[test]
fn overlapping_filters_keep_only_the_overlap() {
    let by_author = posts(&[1, 2, 3, 4]);
    let by_language = posts(&[3, 4, 5]);
    let by_keywords = posts(&[4, 3]);

    let composed = compose(Some(by_author), Some(by_language), Some(by_keywords));
    let ids: Vec<i64> = composed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 4]);
}

#[test]
fn keyword_merge_keeps_each_id_once() {
    let code_hits = posts(&[1, 2, 3]);
    let instruction_hits = posts(&[2, 3, 4]);

    let merged = merge_keyword_hits(code_hits, instruction_hits);
    let ids: Vec<i64> = merged.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn websearch_rewrite_makes_every_word_optional() {
    assert_eq!(websearch_query("linked list"), "linked or list");
}

#[test]
fn feed_sample_respects_bounds_for_many_draws() {
    let now = Utc::now();
    let collection: Vec<Post> = (0..100)
        .map(|i| post_at(i, now - Duration::hours(i), (i * 31 % 13) as i32, "go"))
        .collect();

    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let sampled = sample_recent(collection.clone(), 10, 15, &mut rng);

        assert!((10..=15).contains(&sampled.len()));
        // Window comes from the most recent posts only.
        let n = sampled.len() as i64;
        assert!(sampled.iter().all(|p| p.id < n));
        // And is ranked by popularity.
        for pair in sampled.windows(2) {
            assert!(pair[0].likes >= pair[1].likes);
        }
    }
}

#[test]
fn feed_sample_is_capped_by_the_collection() {
    let mut rng = StdRng::seed_from_u64(11);
    let sampled = sample_recent(posts(&[1, 2, 3]), 10, 15, &mut rng);
    assert_eq!(sampled.len(), 3);
}
