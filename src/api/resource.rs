use reqwest::Method;
use std::marker::PhantomData;

use crate::api::client::ApiClient;
use crate::api::envelope::{decode_item, decode_page, Page};
use crate::api::error::ApiError;
use crate::domain::{QueryFilter, Resource};

/// Filter plus paging for a list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<F> {
    pub filter: F,
    pub page: u32,
    pub limit: u32,
}

impl<F: Default> Default for ListQuery<F> {
    fn default() -> Self {
        Self {
            filter: F::default(),
            page: 1,
            limit: 20,
        }
    }
}

impl<F: QueryFilter> ListQuery<F> {
    pub fn with_limit(filter: F, limit: u32) -> Self {
        Self {
            filter,
            page: 1,
            limit,
        }
    }

    /// Filters first, then `page` and `limit`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.filter.query_pairs();
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

/// CRUD endpoints of one backend collection.
pub struct ResourceApi<R> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceApi<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn list(&self, query: &ListQuery<R::Filter>) -> Result<Page<R>, ApiError> {
        let segments = [R::COLLECTION];
        let body = self.client.get(&segments, &query.query_pairs()).await?;
        decode_page(body, query.limit).map_err(|message| self.decode_error(&segments, message))
    }

    pub async fn get(&self, id: &str) -> Result<R, ApiError> {
        let segments = [R::COLLECTION, id];
        let body = self.client.get(&segments, &[]).await?;
        decode_item(body).map_err(|message| self.decode_error(&segments, message))
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R, ApiError> {
        let segments = [R::COLLECTION];
        let body = self.client.send(Method::POST, &segments, Some(draft)).await?;
        decode_item(body).map_err(|message| self.decode_error(&segments, message))
    }

    pub async fn update(&self, id: &str, draft: &R::Draft) -> Result<R, ApiError> {
        let segments = [R::COLLECTION, id];
        let body = self.client.send(Method::PUT, &segments, Some(draft)).await?;
        decode_item(body).map_err(|message| self.decode_error(&segments, message))
    }

    /// Response body is ignored; 204 and any JSON are both accepted.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .send::<()>(Method::DELETE, &[R::COLLECTION, id], None)
            .await
            .map(|_| ())
    }

    /// Posts `{"<collection>": [drafts]}` to `/<collection>/bulk`.
    pub async fn bulk_create(&self, drafts: &[R::Draft]) -> Result<Vec<R>, ApiError> {
        let segments = [R::COLLECTION, "bulk"];
        let items = serde_json::to_value(drafts)
            .map_err(|e| self.decode_error(&segments, e.to_string()))?;
        let mut payload = serde_json::Map::new();
        payload.insert(R::COLLECTION.to_string(), items);

        let body = self.client.send(Method::POST, &segments, Some(&payload)).await?;
        decode_page::<R>(body, drafts.len() as u32)
            .map(|page| page.items)
            .map_err(|message| self.decode_error(&segments, message))
    }

    pub(crate) fn decode_error(&self, segments: &[&str], message: String) -> ApiError {
        let url = self
            .client
            .url(segments, &[])
            .map(|u| u.to_string())
            .unwrap_or_else(|_| segments.join("/"));
        tracing::warn!(%url, %message, "could not decode {} response", R::LABEL);
        ApiError::Decode { url, message }
    }
}
