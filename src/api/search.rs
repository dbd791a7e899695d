use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::app::AppState;
use crate::error::AppError;
use crate::models::content::Category;
use crate::models::search::{SearchParams, SearchResult};
use crate::search::engine::{distinct_locations, search_posts};

/// `GET /api/search?q=&category=&location=`
///
/// Fetches the full post collection and filters it in-process.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResult>, AppError> {
    let posts = state
        .repo
        .posts()
        .await
        .map_err(AppError::upstream("Failed to search posts"))?;

    let result = search_posts(posts, &params);
    tracing::debug!(query = %params.q, total = result.total, "search");
    Ok(Json(result))
}

/// Filter options offered next to the search box.
#[derive(Debug, Serialize)]
pub struct SearchFacets {
    pub categories: Vec<Category>,
    pub locations: Vec<String>,
}

/// `GET /api/search/facets`
pub async fn facets_handler(State(state): State<AppState>) -> Result<Json<SearchFacets>, AppError> {
    let (categories, posts) = futures::try_join!(state.repo.categories(), state.repo.posts())
        .map_err(AppError::upstream("Failed to load search filters"))?;

    Ok(Json(SearchFacets {
        categories,
        locations: distinct_locations(&posts),
    }))
}
