//! Client side of the headless content store.
//!
//! [`ObjectStore`] is the generic four-call surface of the store API. The
//! HTTP implementation talks to Cosmic, the in-memory one backs tests and the
//! demo mode. [`repository::ContentRepository`] layers typed entity access on
//! top of either.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod cosmic;
pub mod memory;
pub mod repository;

/// The object types ("collections") this service reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Posts,
    Authors,
    Categories,
    Pages,
    Prompts,
    ContactSubmissions,
    NewsletterSubscribers,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Posts => "posts",
            Collection::Authors => "authors",
            Collection::Categories => "categories",
            Collection::Pages => "pages",
            Collection::Prompts => "prompts",
            Collection::ContactSubmissions => "contact-submissions",
            Collection::NewsletterSubscribers => "newsletter-subscribers",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A read request against one collection.
///
/// Filters are equality matches; keys may be dotted paths into the object
/// (`metadata.category`). An empty `props` list means "all properties".
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectQuery {
    pub collection: Collection,
    pub filter: Map<String, Value>,
    pub props: Vec<&'static str>,
    pub depth: u8,
}

impl ObjectQuery {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            filter: Map::new(),
            props: Vec::new(),
            depth: 0,
        }
    }

    pub fn filter(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.filter.insert(key.to_string(), value.into());
        self
    }

    pub fn props(mut self, props: &[&'static str]) -> Self {
        self.props = props.to_vec();
        self
    }

    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// The filter as sent to the store, with the collection as `type`.
    pub fn filter_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("type".into(), Value::String(self.collection.as_str().into()));
        for (key, value) in &self.filter {
            doc.insert(key.clone(), value.clone());
        }
        Value::Object(doc)
    }
}

/// Payload for `insert_one`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewObject {
    pub title: String,
    #[serde(rename = "type")]
    pub collection: &'static str,
    pub metadata: Value,
}

impl NewObject {
    pub fn new(collection: Collection, title: impl Into<String>, metadata: Value) -> Self {
        Self {
            title: title.into(),
            collection: collection.as_str(),
            metadata,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store matched nothing (its 404 condition).
    #[error("no matching objects")]
    NotFound,

    #[error("content store returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("content store unreachable: {0}")]
    Transport(String),

    #[error("unexpected content store payload: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

/// Generic object-store calls.
///
/// Implementations never retry and never map `NotFound` to an empty result;
/// that interpretation belongs to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// All objects matching the query. `NotFound` when nothing matches.
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<Value>, StoreError>;

    /// The first object matching the query. `NotFound` when nothing matches.
    async fn find_one(&self, query: &ObjectQuery) -> Result<Value, StoreError>;

    /// Create an object and return it as stored.
    async fn insert_one(&self, object: NewObject) -> Result<Value, StoreError>;

    /// Merge `patch` into the object with the given id.
    async fn update_one(&self, id: &str, patch: Value) -> Result<(), StoreError>;
}
