use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::api::envelope::error_message;
use crate::api::error::ApiError;
use crate::config::ApiConfig;
use crate::session::SecureString;

/// Thin JSON client for the operator backend.
///
/// Clones share the HTTP connection pool and the session token, so a login
/// performed through one handle is seen by every resource API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Arc<RwLock<Option<SecureString>>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|_| ApiError::InvalidUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(|e| ApiError::Connection {
                url: config.base_url.clone(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn with_token(self, token: Option<SecureString>) -> Self {
        self.set_token(token);
        self
    }

    /// Replace the bearer token for every clone of this client.
    pub fn set_token(&self, token: Option<SecureString>) {
        *self.token.write() = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins the base URL with percent-encoded path segments and appends
    /// the query pairs in order.
    pub fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    pub async fn get(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = self.url(segments, query)?;
        let builder = self.http.get(url.clone());
        self.execute(Method::GET, &url, builder).await
    }

    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let url = self.url(segments, &[])?;
        let mut builder = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(method, &url, builder).await
    }

    async fn execute(
        &self,
        method: Method,
        url: &Url,
        mut builder: RequestBuilder,
    ) -> Result<Value, ApiError> {
        let bearer = self
            .token
            .read()
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose()));
        if let Some(bearer) = bearer {
            builder = builder.header(AUTHORIZATION, bearer);
        }

        tracing::debug!(%method, %url, "backend request");

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "backend request failed");
            ApiError::Connection {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Connection {
            url: url.to_string(),
            source: e,
        })?;
        let body = normalize_body(&text);

        if status.is_success() {
            tracing::debug!(%method, %url, status = status.as_u16(), "backend response");
            return Ok(body);
        }

        let message = error_message(&body)
            .or_else(|| match &body {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                _ => None,
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        tracing::warn!(%method, %url, status = status.as_u16(), %message, "backend rejected request");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized { message });
        }
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// JSON bodies are parsed; anything else is kept as text. Empty is `Null`.
fn normalize_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
