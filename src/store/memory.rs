use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};

use super::{Collection, NewObject, ObjectQuery, ObjectStore, StoreError};

/// Process-local [`ObjectStore`] with the same observable semantics as the
/// Cosmic API: dotted-path equality filters, projection, one level of
/// relation expansion, metadata merge on update and `NotFound` on empty
/// matches.
///
/// Objects are kept in insertion order, which is the order `find` returns.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ready-made object envelope, filling in `id`, `type`, `slug` and
    /// timestamps when absent. Returns the object id.
    pub fn seed(&self, collection: Collection, object: Value) -> String {
        let mut object = match object {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let now = Value::String(Utc::now().to_rfc3339());

        let id = object
            .get("id")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
        let title = object
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        object.insert("id".into(), Value::String(id.clone()));
        object.insert("type".into(), Value::String(collection.as_str().into()));
        object
            .entry("slug")
            .or_insert_with(|| Value::String(slugify(&title)));
        object.entry("metadata").or_insert_with(|| json!({}));
        object.entry("created_at").or_insert_with(|| now.clone());
        object.entry("modified_at").or_insert(now);

        self.lock().push(Value::Object(object));
        id
    }

    /// Raw stored envelopes of one collection, unexpanded.
    pub fn objects(&self, collection: Collection) -> Vec<Value> {
        self.lock()
            .iter()
            .filter(|o| o["type"] == collection.as_str())
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Value>> {
        self.objects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn matching(&self, query: &ObjectQuery) -> Vec<Value> {
        let objects = self.lock();
        objects
            .iter()
            .filter(|object| matches_query(object, query))
            .map(|object| {
                let expanded = if query.depth > 0 {
                    expand_relations(object, &objects)
                } else {
                    object.clone()
                };
                project(expanded, &query.props)
            })
            .collect()
    }
}

fn matches_query(object: &Value, query: &ObjectQuery) -> bool {
    object["type"] == query.collection.as_str()
        && query
            .filter
            .iter()
            .all(|(key, expected)| lookup(object, key) == Some(expected))
}

fn lookup<'a>(object: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .try_fold(object, |current, segment| current.get(segment))
}

/// Replace metadata values holding another object's id with that object.
fn expand_relations(object: &Value, all: &[Value]) -> Value {
    let mut expanded = object.clone();
    if let Some(metadata) = expanded.get_mut("metadata").and_then(Value::as_object_mut) {
        for value in metadata.values_mut() {
            let Some(id) = value.as_str() else { continue };
            if let Some(target) = all.iter().find(|o| o["id"] == id) {
                *value = target.clone();
            }
        }
    }
    expanded
}

fn project(object: Value, props: &[&str]) -> Value {
    if props.is_empty() {
        return object;
    }
    match object {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| props.contains(&key.as_str()))
                .collect(),
        ),
        other => other,
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<Value>, StoreError> {
        let found = self.matching(query);
        if found.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(found)
    }

    async fn find_one(&self, query: &ObjectQuery) -> Result<Value, StoreError> {
        self.matching(query)
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_one(&self, object: NewObject) -> Result<Value, StoreError> {
        let collection = collection_from_str(object.collection).ok_or_else(|| {
            StoreError::Status {
                status: 400,
                message: format!("unknown object type '{}'", object.collection),
            }
        })?;
        let id = self.seed(
            collection,
            json!({ "title": object.title, "metadata": object.metadata }),
        );
        self.lock()
            .iter()
            .find(|o| o["id"] == id.as_str())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_one(&self, id: &str, patch: Value) -> Result<(), StoreError> {
        let mut objects = self.lock();
        let object = objects
            .iter_mut()
            .find(|o| o["id"] == id)
            .and_then(Value::as_object_mut)
            .ok_or(StoreError::NotFound)?;

        let Value::Object(patch) = patch else {
            return Err(StoreError::Status {
                status: 400,
                message: "patch must be an object".into(),
            });
        };

        for (key, value) in patch {
            if let (true, Value::Object(fields)) = (key == "metadata", &value) {
                if let Some(Value::Object(current)) = object.get_mut("metadata") {
                    current.extend(fields.clone());
                    continue;
                }
            }
            object.insert(key, value);
        }
        object.insert(
            "modified_at".into(),
            Value::String(Utc::now().to_rfc3339()),
        );
        Ok(())
    }
}

fn collection_from_str(name: &str) -> Option<Collection> {
    [
        Collection::Posts,
        Collection::Authors,
        Collection::Categories,
        Collection::Pages,
        Collection::Prompts,
        Collection::ContactSubmissions,
        Collection::NewsletterSubscribers,
    ]
    .into_iter()
    .find(|c| c.as_str() == name)
}
