use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{NewObject, ObjectQuery, ObjectStore, StoreError};

/// Default Cosmic REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.cosmicjs.com/v3";

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    objects: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SingleResponse {
    object: Value,
}

/// Cosmic bucket client implementing [`ObjectStore`] over HTTP.
///
/// Reads authenticate with the bucket read key as a query parameter, writes
/// with the write key as a bearer token. A client built without a write key
/// can still read.
pub struct CosmicStore {
    http: reqwest::Client,
    objects_url: Url,
    read_key: String,
    write_key: Option<String>,
}

impl CosmicStore {
    pub fn new(
        api_url: &str,
        bucket_slug: &str,
        read_key: impl Into<String>,
        write_key: Option<String>,
    ) -> Result<Self, StoreError> {
        let mut objects_url = Url::parse(api_url)
            .map_err(|e| StoreError::Transport(format!("invalid API URL '{api_url}': {e}")))?;
        objects_url
            .path_segments_mut()
            .map_err(|_| StoreError::Transport(format!("API URL '{api_url}' cannot be a base")))?
            .pop_if_empty()
            .extend(["buckets", bucket_slug, "objects"]);

        Ok(Self {
            http: reqwest::Client::new(),
            objects_url,
            read_key: read_key.into(),
            write_key: write_key.filter(|k| !k.is_empty()),
        })
    }

    fn object_url(&self, id: &str) -> Result<Url, StoreError> {
        let mut url = self.objects_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Transport("objects URL cannot be a base".into()))?
            .push(id);
        Ok(url)
    }

    fn write_key(&self) -> Result<&str, StoreError> {
        self.write_key.as_deref().ok_or_else(|| StoreError::Status {
            status: StatusCode::UNAUTHORIZED.as_u16(),
            message: "write key not configured".into(),
        })
    }

    async fn fetch(&self, query: &ObjectQuery, limit: Option<u32>) -> Result<Vec<Value>, StoreError> {
        let filter = serde_json::to_string(&query.filter_document())
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let mut params: Vec<(&str, String)> =
            vec![("query", filter), ("read_key", self.read_key.clone())];
        if !query.props.is_empty() {
            params.push(("props", query.props.join(",")));
        }
        if query.depth > 0 {
            params.push(("depth", query.depth.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        tracing::debug!(collection = %query.collection, "content store find");

        let response = self
            .http
            .get(self.objects_url.clone())
            .query(&params)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let body: FindResponse = read_json(response).await?;
        if body.objects.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(body.objects)
    }
}

/// Pass a 2xx response through; map anything else to a [`StoreError`].
async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(StoreError::NotFound);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(StoreError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

/// Map a store response to its JSON body or a [`StoreError`].
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait]
impl ObjectStore for CosmicStore {
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<Value>, StoreError> {
        self.fetch(query, None).await
    }

    async fn find_one(&self, query: &ObjectQuery) -> Result<Value, StoreError> {
        self.fetch(query, Some(1))
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_one(&self, object: NewObject) -> Result<Value, StoreError> {
        let key = self.write_key()?;
        tracing::debug!(collection = object.collection, "content store insert");

        let response = self
            .http
            .post(self.objects_url.clone())
            .bearer_auth(key)
            .json(&object)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let body: SingleResponse = read_json(response).await?;
        Ok(body.object)
    }

    async fn update_one(&self, id: &str, patch: Value) -> Result<(), StoreError> {
        let key = self.write_key()?;
        let url = self.object_url(id)?;
        tracing::debug!(id, "content store update");

        let response = self
            .http
            .patch(url)
            .bearer_auth(key)
            .json(&patch)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        // The updated object, if echoed back, is not needed.
        check_status(response).await?;
        Ok(())
    }
}
