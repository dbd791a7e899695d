#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use serde_json::{json, Value};

use tavola::app::{self, AppState};
use tavola::store::memory::MemoryStore;
use tavola::store::Collection;

/// An in-memory content store plus the API router wired to it.
pub struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub router: Router,
}

impl TestEnv {
    pub fn start() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = app::router(AppState::new(store.clone()));
        Self { store, router }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    pub fn category(&self, slug: &str, title: &str) -> String {
        self.store.seed(
            Collection::Categories,
            json!({ "title": title, "slug": slug, "metadata": { "name": title } }),
        )
    }

    pub fn author(&self, slug: &str, name: &str) -> String {
        self.store.seed(
            Collection::Authors,
            json!({ "title": name, "slug": slug, "metadata": { "name": name } }),
        )
    }

    /// Seed a post. `category`/`author` are ids of seeded objects.
    pub fn post(
        &self,
        slug: &str,
        title: &str,
        location: &str,
        category: Option<&str>,
        author: Option<&str>,
    ) -> String {
        self.store.seed(
            Collection::Posts,
            json!({
                "title": title,
                "slug": slug,
                "metadata": {
                    "location": location,
                    "category": category,
                    "author": author
                }
            }),
        )
    }

    pub fn prompt(&self, title: &str, votes: Option<u64>) -> String {
        let mut metadata = json!({ "prompt": format!("{title} please") });
        if let Some(votes) = votes {
            metadata["votes"] = json!(votes);
        }
        self.store.seed(
            Collection::Prompts,
            json!({ "title": title, "metadata": metadata }),
        )
    }

    pub fn stored(&self, collection: Collection) -> Vec<Value> {
        self.store.objects(collection)
    }
}
