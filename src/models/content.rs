use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::store::{Collection, StoreError};

/// Metadata schema of one content-store collection.
pub trait EntityMetadata: DeserializeOwned + Default {
    const COLLECTION: Collection;
}

/// The store's object envelope with typed metadata.
///
/// Every entity shares the same outer shape; only `metadata` differs per
/// collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "M: Deserialize<'de> + Default"))]
pub struct Object<M> {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Object body. Only requested for single post lookups.
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: M,
}

impl<M: EntityMetadata> Object<M> {
    /// Decode a raw store object, rejecting objects of another collection.
    pub fn decode(value: Value) -> Result<Self, StoreError> {
        let object: Self = serde_json::from_value(value)
            .map_err(|e| StoreError::Decode(format!("{}: {e}", M::COLLECTION)))?;

        match object.kind.as_deref() {
            Some(kind) if kind != M::COLLECTION.as_str() => Err(StoreError::Decode(format!(
                "expected a '{}' object, got '{kind}'",
                M::COLLECTION
            ))),
            _ => Ok(object),
        }
    }
}

/// A relation field: expanded inline at depth 1, a bare id otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged, bound(deserialize = "M: Deserialize<'de> + Default"))]
pub enum Related<M> {
    Expanded(Box<Object<M>>),
    Id(String),
}

impl<M> Related<M> {
    pub fn id(&self) -> &str {
        match self {
            Related::Expanded(object) => &object.id,
            Related::Id(id) => id,
        }
    }

    pub fn expanded(&self) -> Option<&Object<M>> {
        match self {
            Related::Expanded(object) => Some(object),
            Related::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default)]
    pub imgix_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostMetadata {
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub author: Option<Related<AuthorMetadata>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub category: Option<Related<CategoryMetadata>>,
}

impl EntityMetadata for PostMetadata {
    const COLLECTION: Collection = Collection::Posts;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub photo: Option<ImageRef>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl EntityMetadata for AuthorMetadata {
    const COLLECTION: Collection = Collection::Authors;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntityMetadata for CategoryMetadata {
    const COLLECTION: Collection = Collection::Categories;
}

/// Standalone pages such as "about".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<ImageRef>,
}

impl EntityMetadata for PageMetadata {
    const COLLECTION: Collection = Collection::Pages;
}

/// A community recipe idea.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptMetadata {
    /// Free-text description of the idea.
    #[serde(default)]
    pub prompt: String,
    #[serde(default, deserialize_with = "vote_count", skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,
}

impl EntityMetadata for PromptMetadata {
    const COLLECTION: Collection = Collection::Prompts;
}

pub type Post = Object<PostMetadata>;
pub type Author = Object<AuthorMetadata>;
pub type Category = Object<CategoryMetadata>;
pub type Page = Object<PageMetadata>;
pub type Prompt = Object<PromptMetadata>;

impl Post {
    /// The expanded category, if the store resolved it.
    pub fn category(&self) -> Option<&Category> {
        self.metadata.category.as_ref().and_then(Related::expanded)
    }

    pub fn author(&self) -> Option<&Author> {
        self.metadata.author.as_ref().and_then(Related::expanded)
    }

    pub fn location(&self) -> Option<&str> {
        self.metadata.location.as_deref()
    }
}

impl Author {
    pub fn display_name(&self) -> &str {
        if self.metadata.name.is_empty() {
            &self.title
        } else {
            &self.metadata.name
        }
    }
}

impl Category {
    pub fn display_name(&self) -> &str {
        if self.metadata.name.is_empty() {
            &self.title
        } else {
            &self.metadata.name
        }
    }
}

impl Prompt {
    pub fn votes(&self) -> u64 {
        self.metadata.votes.unwrap_or(0)
    }
}

/// Blank strings in optional metafields mean "not set".
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Optional fields the CMS may send as `null`, `""` or in an unexpected
/// shape. Anything that does not decode is treated as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::String(ref s) if s.is_empty() => Ok(None),
        other => Ok(serde_json::from_value(other).ok()),
    }
}

/// A vote count: absent, `null` or `""` is unset; any whole non-negative
/// number is accepted, including `12.0`. Other shapes are a decode error so
/// an unreadable count is never replaced by zero.
fn vote_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            })
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid vote count {n}"))),
        other => Err(D::Error::custom(format!("invalid vote count {other}"))),
    }
}
