use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::api::{Request, Response};

use super::storage::{Cache, CacheStorage};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

/// A stored entry keeps its request so a lookup can confirm the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    request: Request,
    response: Response,
}

/// One directory per cache name, one JSON file per entry named by the
/// SHA-256 of the request URL.
pub struct DiskCache {
    dir: PathBuf,
}

/// A staged entry on its way into the cache.
struct Commit {
    tmp: PathBuf,
    path: PathBuf,
    backup: Option<PathBuf>,
    done: bool,
}

impl DiskCache {
    fn entry_path(&self, request: &Request) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(request.url.as_bytes());
        self.dir.join(format!("{:x}.json", hasher.finalize()))
    }

    async fn load(&self, request: &Request) -> Result<Option<CachedData<Response>>> {
        let path = self.entry_path(request);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read cache entry: {}", request.url))
            }
        };

        let cached: CachedData<StoredEntry> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache entry: {}", request.url))?;
        if cached.data.request != *request {
            return Ok(None);
        }
        Ok(Some(CachedData {
            data: cached.data.response,
            cached_at: cached.cached_at,
        }))
    }

    /// Human-readable age of an entry, if present.
    pub async fn entry_age(&self, request: &Request) -> Result<Option<String>> {
        Ok(self.load(request).await?.map(|c| c.age_display()))
    }

    async fn stage(&self, entries: Vec<(Request, Response)>, staged: &mut Vec<Commit>) -> Result<()> {
        for (request, response) in entries {
            let path = self.entry_path(&request);
            let tmp = path.with_extension("json.tmp");
            let contents = serde_json::to_string_pretty(&CachedData::new(StoredEntry {
                request: request.clone(),
                response,
            }))
            .with_context(|| format!("Failed to serialize cache entry: {}", request.url))?;

            // Registered before writing so a partial temp file is cleaned up too.
            // A repeated URL rewrites the same temp file, so the last one wins.
            if !staged.iter().any(|c| c.path == path) {
                staged.push(Commit {
                    tmp: tmp.clone(),
                    path,
                    backup: None,
                    done: false,
                });
            }
            tokio::fs::write(&tmp, contents)
                .await
                .with_context(|| format!("Failed to write cache entry: {}", request.url))?;
        }
        Ok(())
    }

    async fn commit(staged: &mut [Commit]) -> Result<()> {
        for entry in staged.iter_mut() {
            let existing = tokio::fs::metadata(&entry.path).await;
            if existing.map(|m| m.is_file()).unwrap_or(false) {
                let backup = entry.path.with_extension("json.bak");
                tokio::fs::rename(&entry.path, &backup)
                    .await
                    .with_context(|| format!("Failed to back up cache entry: {}", entry.path.display()))?;
                entry.backup = Some(backup);
            }
            tokio::fs::rename(&entry.tmp, &entry.path)
                .await
                .with_context(|| format!("Failed to commit cache entry: {}", entry.path.display()))?;
            entry.done = true;
        }
        Ok(())
    }
}

/// Undo a failed `put_all`: drop new entries, restore replaced ones and
/// remove every temp file.
async fn roll_back(staged: &[Commit]) {
    for entry in staged {
        if entry.done {
            remove_quietly(&entry.path).await;
        } else {
            remove_quietly(&entry.tmp).await;
        }
        if let Some(ref backup) = entry.backup {
            if let Err(e) = tokio::fs::rename(backup, &entry.path).await {
                warn!(path = %entry.path.display(), error = %e, "Failed to restore cache entry");
            }
        }
    }
}

async fn remove_quietly(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove cache file"),
    }
}

#[async_trait]
impl Cache for DiskCache {
    async fn match_request(&self, request: &Request) -> Result<Option<Response>> {
        Ok(self.load(request).await?.map(|c| c.data))
    }

    async fn put_all(&self, entries: Vec<(Request, Response)>) -> Result<()> {
        let mut staged = Vec::with_capacity(entries.len());

        let result = match self.stage(entries, &mut staged).await {
            Ok(()) => Self::commit(&mut staged).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            roll_back(&staged).await;
            return Err(e);
        }

        for entry in &staged {
            if let Some(ref backup) = entry.backup {
                remove_quietly(backup).await;
            }
        }
        debug!(dir = %self.dir.display(), entries = staged.len(), "Stored cache entries");
        Ok(())
    }
}

/// Cache storage that survives restarts.
pub struct DiskCacheStorage {
    root: PathBuf,
}

impl DiskCacheStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create cache directory: {}", root.display()))?;
        Ok(Self { root })
    }

    pub async fn open_disk(&self, name: &str) -> Result<DiskCache> {
        let dir = self.root.join(name);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create cache: {}", name))?;
        Ok(DiskCache { dir })
    }
}

#[async_trait]
impl CacheStorage for DiskCacheStorage {
    async fn open(&self, name: &str) -> Result<Arc<dyn Cache>> {
        Ok(Arc::new(self.open_disk(name).await?))
    }
}
