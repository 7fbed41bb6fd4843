use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::api::{Request, Response};

/// A named key-value store of responses, keyed by request URL.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn match_request(&self, request: &Request) -> Result<Option<Response>>;

    /// Store every entry or none of them.
    async fn put_all(&self, entries: Vec<(Request, Response)>) -> Result<()>;
}

#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Open the cache with this name, creating it if needed.
    async fn open(&self, name: &str) -> Result<Arc<dyn Cache>>;
}

#[async_trait]
impl<T: CacheStorage + ?Sized> CacheStorage for Arc<T> {
    async fn open(&self, name: &str) -> Result<Arc<dyn Cache>> {
        (**self).open(name).await
    }
}

#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Response>>,
}

#[async_trait]
impl Cache for MemoryCache {
    async fn match_request(&self, request: &Request) -> Result<Option<Response>> {
        Ok(self.entries.read().await.get(&request.url).cloned())
    }

    async fn put_all(&self, entries: Vec<(Request, Response)>) -> Result<()> {
        let mut map = self.entries.write().await;
        for (request, response) in entries {
            map.insert(request.url, response);
        }
        Ok(())
    }
}

/// Process-local cache storage. Contents vanish with the process.
#[derive(Default)]
pub struct MemoryCacheStorage {
    caches: RwLock<HashMap<String, Arc<MemoryCache>>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    async fn open(&self, name: &str) -> Result<Arc<dyn Cache>> {
        let mut caches = self.caches.write().await;
        let cache: Arc<dyn Cache> = caches
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryCache::default()))
            .clone();
        Ok(cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_returns_same_cache_for_name() {
        let storage = MemoryCacheStorage::new();
        let request = Request::get("https://example.com/");

        let first = storage.open("v1").await.unwrap();
        first
            .put_all(vec![(request.clone(), Response::new(&request.url, 200, "home"))])
            .await
            .unwrap();

        let again = storage.open("v1").await.unwrap();
        assert_eq!(again.match_request(&request).await.unwrap().unwrap().text(), "home");

        let other = storage.open("v2").await.unwrap();
        assert!(other.match_request(&request).await.unwrap().is_none());
    }
}
