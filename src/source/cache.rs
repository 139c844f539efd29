use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// Source of "now" for freshness checks. Swapped out in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Get the platform-appropriate cache directory for upstream responses
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("ballon-predict/http-cache"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/ballon-predict/http-cache",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Remove the on-disk response cache. A missing directory is fine.
pub fn clear_cache() -> Result<()> {
    let cache_path = get_cache_path();
    match std::fs::remove_dir_all(&cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    body: String,
    stored_at: DateTime<Utc>,
}

/// Time-bounded memoization of upstream response bodies, keyed by endpoint.
///
/// Entries live in memory and, when a disk path is configured, are mirrored to
/// a cacache store so that separate runs share them. There is no size bound and
/// no eviction other than staleness. Two callers racing on the same stale key
/// may both run their fetcher; the last write wins.
#[derive(Clone)]
pub struct ResponseCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    disk_path: Option<PathBuf>,
    ttl: Duration,
    clock: Clock,
}

impl ResponseCache {
    pub fn in_memory(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            disk_path: None,
            ttl,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_disk(ttl: Duration, disk_path: PathBuf) -> Self {
        Self {
            disk_path: Some(disk_path),
            ..Self::in_memory(ttl)
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Return the stored body for `key` if it is younger than the TTL;
    /// otherwise run `fetcher`, store its body stamped with the current time,
    /// and return it. Fetch errors are passed through and nothing is stored.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetcher: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        let now = (self.clock)();
        if let Some(body) = self.lookup(key, now) {
            debug!(key, "response cache hit");
            return Ok(body);
        }

        debug!(key, "response cache miss");
        let body = fetcher().await?;
        self.store(key, body.clone());
        Ok(body)
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        // A timestamp from the future means a skewed clock; treat it as stale
        match (now - entry.stored_at).to_std() {
            Ok(age) => age < self.ttl,
            Err(_) => false,
        }
    }

    fn lookup(&self, key: &str, now: DateTime<Utc>) -> Option<String> {
        {
            let entries = self.entries.lock().expect("response cache lock poisoned");
            if let Some(entry) = entries.get(key) {
                if self.is_fresh(entry, now) {
                    return Some(entry.body.clone());
                }
                debug!(key, stored_at = %entry.stored_at, "response cache entry expired");
                return None;
            }
        }

        let entry = self.load_from_disk(key)?;
        if !self.is_fresh(&entry, now) {
            return None;
        }
        let body = entry.body.clone();
        self.entries
            .lock()
            .expect("response cache lock poisoned")
            .insert(key.to_string(), entry);
        Some(body)
    }

    fn store(&self, key: &str, body: String) {
        let entry = CacheEntry {
            body,
            stored_at: (self.clock)(),
        };

        // Disk writes are best-effort
        if let Some(path) = &self.disk_path {
            match serde_json::to_vec(&entry) {
                Ok(bytes) => {
                    if let Err(e) = cacache::write_sync(path, key, &bytes) {
                        debug!(key, error = %e, "failed to persist cache entry");
                    }
                }
                Err(e) => debug!(key, error = %e, "failed to serialize cache entry"),
            }
        }

        self.entries
            .lock()
            .expect("response cache lock poisoned")
            .insert(key.to_string(), entry);
    }

    fn load_from_disk(&self, key: &str) -> Option<CacheEntry> {
        let path = self.disk_path.as_ref()?;
        let bytes = cacache::read_sync(path, key).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}
