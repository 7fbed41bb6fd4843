//! Cache-first fetch interceptor.
//!
//! On install a fixed list of core assets is fetched and stored as one
//! group. Afterwards every request is answered from the cache when present
//! and from the live network otherwise. Misses are not written back.

use anyhow::Result;
use async_trait::async_trait;
use futures::future::try_join_all;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{resolve_url, FetchError, Network, Request, Response};

use super::storage::CacheStorage;

pub const CACHE_NAME: &str = "manga-viewer-cache-v1";

/// Assets stored at install time, relative to the site origin.
///
/// The page ships its script as `sctipt.js`, so `/script.js` fails to
/// install against the real site. Left as is until the asset names are
/// confirmed.
pub const PRECACHE_ASSETS: [&str; 7] = [
    "/",
    "/index.html",
    "/styles.css",
    "/script.js",
    "/manga1.jpg",
    "/manga2.jpg",
    "/manga3.jpg",
];

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: FetchError },

    #[error("Request for {url} returned status {status}")]
    BadStatus { url: String, status: u16 },

    #[error("Cache storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub struct OfflineCache<S, N> {
    storage: S,
    network: N,
    cache_name: String,
    assets: Vec<Request>,
}

impl<S: CacheStorage, N: Network> OfflineCache<S, N> {
    /// Interceptor for the standard cache name and asset list.
    pub fn new(storage: S, network: N, origin: &str) -> Result<Self> {
        Self::with_assets(storage, network, CACHE_NAME, origin, &PRECACHE_ASSETS)
    }

    pub fn with_assets(
        storage: S,
        network: N,
        cache_name: &str,
        origin: &str,
        paths: &[&str],
    ) -> Result<Self> {
        let assets = paths
            .iter()
            .map(|path| resolve_url(origin, path).map(Request::get))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            storage,
            network,
            cache_name: cache_name.to_string(),
            assets,
        })
    }

    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    pub fn assets(&self) -> &[Request] {
        &self.assets
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Populate the cache with every asset, or with nothing if any fails.
    /// Returns the number of stored entries.
    pub async fn install(&self) -> Result<usize, InstallError> {
        info!(cache = %self.cache_name, assets = self.assets.len(), "Installing offline cache");
        let cache = self.storage.open(&self.cache_name).await?;

        let entries = try_join_all(self.assets.iter().map(|request| self.fetch_asset(request))).await?;

        let count = entries.len();
        cache.put_all(entries).await?;
        info!(cache = %self.cache_name, entries = count, "Offline cache installed");
        Ok(count)
    }

    async fn fetch_asset(&self, request: &Request) -> Result<(Request, Response), InstallError> {
        let response = self
            .network
            .fetch(request)
            .await
            .map_err(|source| InstallError::Fetch {
                url: request.url.clone(),
                source,
            })?;

        if !response.ok() {
            return Err(InstallError::BadStatus {
                url: request.url.clone(),
                status: response.status,
            });
        }
        Ok((request.clone(), response))
    }

    /// True when every asset is already in the cache.
    pub async fn is_installed(&self) -> bool {
        for request in &self.assets {
            if self.lookup(request).await.is_none() {
                return false;
            }
        }
        true
    }

    /// Cache lookup. Storage failures count as a miss.
    async fn lookup(&self, request: &Request) -> Option<Response> {
        let cache = match self.storage.open(&self.cache_name).await {
            Ok(cache) => cache,
            Err(e) => {
                warn!(cache = %self.cache_name, error = %e, "Failed to open cache");
                return None;
            }
        };

        match cache.match_request(request).await {
            Ok(found) => found,
            Err(e) => {
                warn!(url = %request.url, error = %e, "Cache lookup failed");
                None
            }
        }
    }
}

#[async_trait]
impl<S: CacheStorage, N: Network> Network for OfflineCache<S, N> {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        if let Some(response) = self.lookup(request).await {
            debug!(url = %request.url, "Serving from cache");
            return Ok(response);
        }
        debug!(url = %request.url, "Cache miss, fetching from network");
        self.network.fetch(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::testing::StubNetwork;
    use crate::cache::storage::{Cache, MemoryCacheStorage};

    const ORIGIN: &str = "http://localhost:8080";

    fn url(path: &str) -> String {
        format!("{}{}", ORIGIN, path)
    }

    fn site() -> StubNetwork {
        PRECACHE_ASSETS.iter().fold(StubNetwork::new(), |net, path| {
            net.with(&url(path), Response::new(url(path), 200, format!("asset {}", path)))
        })
    }

    #[test]
    fn test_assets_resolve_against_origin() {
        let interceptor =
            OfflineCache::new(MemoryCacheStorage::new(), StubNetwork::new(), ORIGIN).unwrap();
        assert_eq!(interceptor.cache_name(), "manga-viewer-cache-v1");
        assert_eq!(interceptor.assets().len(), 7);
        assert_eq!(interceptor.assets()[0].url, "http://localhost:8080/");
        assert_eq!(interceptor.assets()[3].url, "http://localhost:8080/script.js");
    }

    #[tokio::test]
    async fn test_cached_assets_served_offline() {
        let network = Arc::new(site());
        let interceptor =
            OfflineCache::new(MemoryCacheStorage::new(), Arc::clone(&network), ORIGIN).unwrap();

        assert_eq!(interceptor.install().await.unwrap(), 7);
        assert!(interceptor.is_installed().await);
        let calls_after_install = network.calls();

        network.go_offline();
        for path in PRECACHE_ASSETS {
            let response = interceptor.fetch(&Request::get(url(path))).await.unwrap();
            assert_eq!(response.text(), format!("asset {}", path));
        }
        assert_eq!(network.calls(), calls_after_install);
    }

    #[tokio::test]
    async fn test_miss_passes_through_without_write_back() {
        let extra = url("/manga4.jpg");
        let network = Arc::new(site().with(&extra, Response::new(&extra, 200, "live")));
        let interceptor =
            OfflineCache::new(MemoryCacheStorage::new(), Arc::clone(&network), ORIGIN).unwrap();
        interceptor.install().await.unwrap();
        let before = network.calls();

        let request = Request::get(&extra);
        assert_eq!(interceptor.fetch(&request).await.unwrap().text(), "live");
        assert_eq!(interceptor.fetch(&request).await.unwrap().text(), "live");
        assert_eq!(network.calls(), before + 2);
    }

    #[tokio::test]
    async fn test_miss_failure_propagates() {
        let network = Arc::new(site());
        let interceptor =
            OfflineCache::new(MemoryCacheStorage::new(), Arc::clone(&network), ORIGIN).unwrap();
        interceptor.install().await.unwrap();
        network.go_offline();

        let result = interceptor.fetch(&Request::get(url("/elsewhere.png"))).await;
        assert!(matches!(result, Err(FetchError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_install_is_all_or_nothing() {
        let storage = Arc::new(MemoryCacheStorage::new());
        let network = site().failing(&url("/manga2.jpg"));
        let interceptor = OfflineCache::new(Arc::clone(&storage), network, ORIGIN).unwrap();

        let err = interceptor.install().await.unwrap_err();
        assert!(matches!(err, InstallError::Fetch { ref url, .. } if url.ends_with("/manga2.jpg")));

        let cache = storage.open(CACHE_NAME).await.unwrap();
        for request in interceptor.assets() {
            assert!(cache.match_request(request).await.unwrap().is_none());
        }
        assert!(!interceptor.is_installed().await);
    }

    #[tokio::test]
    async fn test_install_rejects_error_status() {
        // Only "/" is served; everything else answers 404
        let network = StubNetwork::new().with(&url("/"), Response::new(url("/"), 200, "home"));
        let interceptor = OfflineCache::new(MemoryCacheStorage::new(), network, ORIGIN).unwrap();

        let err = interceptor.install().await.unwrap_err();
        assert!(matches!(err, InstallError::BadStatus { status: 404, .. }));
    }

    struct BrokenStorage;

    #[async_trait]
    impl CacheStorage for BrokenStorage {
        async fn open(&self, _name: &str) -> Result<Arc<dyn Cache>> {
            Err(anyhow::anyhow!("quota exceeded"))
        }
    }

    #[tokio::test]
    async fn test_storage_failure_falls_through_to_network() {
        let network = Arc::new(site());
        let interceptor = OfflineCache::new(BrokenStorage, Arc::clone(&network), ORIGIN).unwrap();

        let response = interceptor.fetch(&Request::get(url("/styles.css"))).await.unwrap();
        assert_eq!(response.text(), "asset /styles.css");
        assert_eq!(network.calls(), 1);

        assert!(matches!(
            interceptor.install().await,
            Err(InstallError::Storage(_))
        ));
    }
}
