use std::sync::Arc;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::{ServerSettings, StoreBackend, StoreSettings};
use crate::error::AppError;
use crate::store::cosmic::CosmicStore;
use crate::store::memory::MemoryStore;
use crate::store::repository::ContentRepository;
use crate::store::ObjectStore;

/// Shared state handed to every handler.
///
/// Holds no entity data: each request fetches what it needs from the store.
#[derive(Clone)]
pub struct AppState {
    pub repo: ContentRepository,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            repo: ContentRepository::new(store),
        }
    }
}

/// Build the object store selected by the configuration.
pub fn build_store(settings: &StoreSettings) -> Result<Arc<dyn ObjectStore>, AppError> {
    match settings.backend {
        StoreBackend::Cosmic => {
            let store = CosmicStore::new(
                &settings.api_url,
                &settings.bucket_slug,
                settings.read_key.clone(),
                settings.write_key.clone(),
            )
            .map_err(|e| AppError::Internal(format!("Failed to create content store client: {e}")))?;
            tracing::info!(bucket = %settings.bucket_slug, "Using Cosmic content store");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let store = MemoryStore::new();
            if settings.seed_demo {
                crate::demo_seeder::seed_demo_data(&store);
            }
            tracing::info!("Using in-memory content store");
            Ok(Arc::new(store))
        }
    }
}

/// All API routes, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/search", get(api::search::search_handler))
        .route("/api/search/facets", get(api::search::facets_handler))
        .route("/api/posts", get(api::content::list_posts_handler))
        .route("/api/posts/{slug}", get(api::content::get_post_handler))
        .route("/api/categories", get(api::content::list_categories_handler))
        .route("/api/categories/{slug}", get(api::content::get_category_handler))
        .route("/api/authors", get(api::content::list_authors_handler))
        .route("/api/authors/{slug}", get(api::content::get_author_handler))
        .route("/api/pages/{slug}", get(api::content::get_page_handler))
        .route(
            "/api/recipe-ideas",
            get(api::recipe_ideas::list_handler).post(api::recipe_ideas::create_handler),
        )
        .route("/api/recipe-ideas/vote", post(api::recipe_ideas::vote_handler))
        .route("/api/contact", post(api::forms::contact_handler))
        .route("/api/newsletter", post(api::forms::newsletter_handler))
        .with_state(state)
}

/// The router with request tracing and CORS applied.
pub fn app(state: AppState, server: &ServerSettings) -> Router {
    router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&server.cors_origins)),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Ignoring invalid CORS origin '{origin}': {e}");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}
