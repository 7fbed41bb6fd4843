//! The fetch seam shared by the live HTTP client and the offline cache.
//!
//! Everything that loads a resource goes through [`Network`], so a cache-first
//! interceptor can sit in front of the live client without callers noticing.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header, Client, Url};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::FetchError;

/// A GET request for an absolute URL. The URL doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    pub url: String,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub url: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(serialize_with = "encode_body", deserialize_with = "decode_body")]
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status,
            content_type: None,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            FetchError::InvalidResponse(format!("Failed to parse JSON from {}: {}", self.url, e))
        })
    }

    /// Turn a non-2xx response into a [`FetchError::Status`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.ok() {
            Ok(self)
        } else {
            Err(FetchError::from_status(&self.url, self.status, &self.text()))
        }
    }
}

fn encode_body<S: Serializer>(body: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(body))
}

fn decode_body<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD.decode(encoded).map_err(serde::de::Error::custom)
}

#[async_trait]
pub trait Network: Send + Sync {
    /// Fetch a resource. Any HTTP status is a successful fetch; only transport
    /// failures are errors.
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError>;
}

#[async_trait]
impl<T: Network + ?Sized> Network for Arc<T> {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        (**self).fetch(request).await
    }
}

#[async_trait]
impl<T: Network + ?Sized> Network for &T {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        (**self).fetch(request).await
    }
}

/// Resolve an asset path such as `/index.html` against a site origin.
pub fn resolve_url(origin: &str, path: &str) -> Result<String> {
    let base = Url::parse(origin).with_context(|| format!("Invalid origin: {}", origin))?;
    let url = base
        .join(path)
        .with_context(|| format!("Failed to resolve {} against {}", path, origin))?;
    Ok(url.to_string())
}

/// Live network access over HTTP.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpNetwork {
    client: Client,
}

impl HttpNetwork {
    /// Build a client without a request timeout; slow fetches simply delay
    /// the caller.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        debug!(url = %request.url, "Fetching from network");

        let response = self.client.get(&request.url).send().await?;

        let status = response.status().as_u16();
        let url = response.url().to_string();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        debug!(url = %url, status, bytes = body.len(), "Network response");

        Ok(Response {
            url,
            status,
            content_type,
            body,
        })
    }
}
