//! Offline caching for the viewer's core assets.
//!
//! `OfflineCache` pre-populates a named cache on install and answers
//! fetches cache-first. It implements `Network`, so it can stand in front
//! of the live client anywhere a fetch happens.
//!
//! Storage backends:
//! - `MemoryCacheStorage`: process-local, for tests and throwaway runs
//! - `DiskCacheStorage`: JSON files under the user cache directory

pub mod disk;
pub mod interceptor;
pub mod storage;

pub use disk::{CachedData, DiskCache, DiskCacheStorage};
pub use interceptor::{InstallError, OfflineCache, CACHE_NAME, PRECACHE_ASSETS};
pub use storage::{Cache, CacheStorage, MemoryCache, MemoryCacheStorage};
