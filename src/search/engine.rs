//! Linear-scan post search.
//!
//! Runs over the full post collection fetched for the current request. No
//! index, no ranking: the result keeps the input order.

use std::collections::BTreeSet;

use crate::models::content::Post;
use crate::models::search::{SearchFilters, SearchParams, SearchResult};

/// Filter `posts` by free-text query, category slug and location.
///
/// Every active filter must match (AND). Blank parameters are ignored.
/// - query: case-insensitive substring of title, excerpt, location, body or
///   category title
/// - category: exact slug of the expanded category
/// - location: case-insensitive substring of the post location
pub fn search_posts(posts: Vec<Post>, params: &SearchParams) -> SearchResult {
    let query = params.q.trim();
    let category = params.category.trim();
    let location = params.location.trim();

    let needle = query.to_lowercase();
    let location_needle = location.to_lowercase();

    let matches: Vec<Post> = posts
        .into_iter()
        .filter(|post| needle.is_empty() || matches_query(post, &needle))
        .filter(|post| category.is_empty() || matches_category(post, category))
        .filter(|post| location.is_empty() || matches_location(post, &location_needle))
        .collect();

    SearchResult {
        total: matches.len(),
        posts: matches,
        query: params.q.clone(),
        filters: SearchFilters {
            category: non_blank(category),
            location: non_blank(location),
        },
    }
}

/// Sorted, de-duplicated post locations for the location facet.
pub fn distinct_locations(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .filter_map(Post::location)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

fn matches_query(post: &Post, needle: &str) -> bool {
    let metadata = &post.metadata;
    contains_ci(Some(&post.title), needle)
        || contains_ci(metadata.excerpt.as_deref(), needle)
        || contains_ci(metadata.location.as_deref(), needle)
        || contains_ci(metadata.content.as_deref(), needle)
        || contains_ci(post.content.as_deref(), needle)
        || contains_ci(post.category().map(|c| c.title.as_str()), needle)
}

fn matches_category(post: &Post, slug: &str) -> bool {
    post.category().is_some_and(|c| c.slug == slug)
}

fn matches_location(post: &Post, needle: &str) -> bool {
    contains_ci(post.location(), needle)
}

fn non_blank(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
