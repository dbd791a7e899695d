use std::sync::Arc;

use serde_json::{json, Value};

use crate::models::content::{
    Author, Category, EntityMetadata, Object, Page, Post, Prompt,
};
use crate::store::{Collection, NewObject, ObjectQuery, ObjectStore, StoreError};

const LIST_PROPS: &[&str] = &["id", "title", "slug", "metadata"];
const POST_LIST_PROPS: &[&str] = &["id", "title", "slug", "metadata", "created_at", "modified_at"];
const POST_DETAIL_PROPS: &[&str] = &[
    "id",
    "title",
    "slug",
    "metadata",
    "content",
    "created_at",
    "modified_at",
];

/// Typed access to the content store.
///
/// Reads always project a fixed prop list and ask for one level of relation
/// expansion. A store `NotFound` on a read is an empty result; any other
/// error is returned to the caller.
#[derive(Clone)]
pub struct ContentRepository {
    store: Arc<dyn ObjectStore>,
}

impl ContentRepository {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    async fn list<M: EntityMetadata>(&self, query: ObjectQuery) -> Result<Vec<Object<M>>, StoreError> {
        match self.store.find(&query).await {
            Ok(objects) => objects.into_iter().map(Object::decode).collect(),
            Err(StoreError::NotFound) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn single<M: EntityMetadata>(&self, query: ObjectQuery) -> Result<Option<Object<M>>, StoreError> {
        match self.store.find_one(&query).await {
            Ok(object) => Object::decode(object).map(Some),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn read(collection: Collection, props: &[&'static str]) -> ObjectQuery {
        ObjectQuery::new(collection).props(props).depth(1)
    }

    pub async fn posts(&self) -> Result<Vec<Post>, StoreError> {
        self.list(Self::read(Collection::Posts, POST_LIST_PROPS)).await
    }

    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        self.single(Self::read(Collection::Posts, POST_DETAIL_PROPS).filter("slug", slug))
            .await
    }

    pub async fn posts_by_category(&self, category_id: &str) -> Result<Vec<Post>, StoreError> {
        self.list(Self::read(Collection::Posts, LIST_PROPS).filter("metadata.category", category_id))
            .await
    }

    pub async fn posts_by_author(&self, author_id: &str) -> Result<Vec<Post>, StoreError> {
        self.list(Self::read(Collection::Posts, LIST_PROPS).filter("metadata.author", author_id))
            .await
    }

    pub async fn authors(&self) -> Result<Vec<Author>, StoreError> {
        self.list(Self::read(Collection::Authors, LIST_PROPS)).await
    }

    pub async fn author_by_slug(&self, slug: &str) -> Result<Option<Author>, StoreError> {
        self.single(Self::read(Collection::Authors, LIST_PROPS).filter("slug", slug))
            .await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        self.list(Self::read(Collection::Categories, LIST_PROPS)).await
    }

    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        self.single(Self::read(Collection::Categories, LIST_PROPS).filter("slug", slug))
            .await
    }

    pub async fn page_by_slug(&self, slug: &str) -> Result<Option<Page>, StoreError> {
        self.single(Self::read(Collection::Pages, LIST_PROPS).filter("slug", slug))
            .await
    }

    pub async fn prompts(&self) -> Result<Vec<Prompt>, StoreError> {
        self.list(Self::read(Collection::Prompts, LIST_PROPS)).await
    }

    pub async fn prompt_by_id(&self, id: &str) -> Result<Option<Prompt>, StoreError> {
        self.single(Self::read(Collection::Prompts, LIST_PROPS).filter("id", id))
            .await
    }

    /// Whether a subscriber with this (already normalized) email exists.
    pub async fn subscriber_exists(&self, email: &str) -> Result<bool, StoreError> {
        let query = ObjectQuery::new(Collection::NewsletterSubscribers)
            .filter("metadata.email", email)
            .props(&["id"]);

        match self.store.find(&query).await {
            Ok(objects) => Ok(!objects.is_empty()),
            Err(StoreError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn insert_contact_submission(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<Value, StoreError> {
        self.store
            .insert_one(NewObject::new(
                Collection::ContactSubmissions,
                format!("Contact from {name}"),
                json!({ "name": name, "email": email, "message": message }),
            ))
            .await
    }

    pub async fn insert_newsletter_subscriber(&self, name: &str, email: &str) -> Result<Value, StoreError> {
        self.store
            .insert_one(NewObject::new(
                Collection::NewsletterSubscribers,
                format!("Subscriber: {name}"),
                json!({ "name": name, "email": email }),
            ))
            .await
    }

    /// New ideas start with zero votes.
    pub async fn insert_prompt(&self, title: &str, prompt: &str) -> Result<Value, StoreError> {
        self.store
            .insert_one(NewObject::new(
                Collection::Prompts,
                title,
                json!({ "prompt": prompt, "votes": 0 }),
            ))
            .await
    }

    /// Overwrite the vote count. Plain write, no compare-and-set.
    pub async fn set_prompt_votes(&self, id: &str, votes: u64) -> Result<(), StoreError> {
        self.store
            .update_one(id, json!({ "metadata": { "votes": votes } }))
            .await
    }
}
