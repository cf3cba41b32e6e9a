//! File-backed cache manager
//!
//! Provides a `CacheManager` that stores serializable data to JSON files with
//! expiry timestamps.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use super::SponsorCache;
use crate::data::SponsorEdge;

/// Wrapper struct for cached data stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// The cached data
    data: T,
    /// When the data was cached
    cached_at: DateTime<Utc>,
    /// When the cache entry expires
    expires_at: DateTime<Utc>,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally cached
    pub cached_at: DateTime<Utc>,
    /// Whether the cache entry has expired
    pub is_expired: bool,
}

/// Manages reading and writing cached data to disk
///
/// Entries live as `<key>.json` in an XDG-compliant cache directory
/// (`~/.cache/ghsponsors/` on Linux). `read` still returns expired entries,
/// flagged with `is_expired`; the `SponsorCache` impl treats them as misses.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using the XDG cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "ghsponsors")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path to a cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes data to the cache with the given time-to-live
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the cache entry
    /// * `data` - The data to cache (must implement Serialize)
    /// * `ttl` - How long the cache entry should be considered fresh
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if the TTL is out of range, or directory creation or file writing fails
    pub fn write<T: Serialize>(&self, key: &str, data: &T, ttl: Duration) -> io::Result<()> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        self.ensure_dir()?;

        let now = Utc::now();
        let entry = CacheEntry {
            data,
            cached_at: now,
            expires_at: now + ttl,
        };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::write(self.cache_path(key), json)
    }

    /// Reads data from the cache
    ///
    /// Returns `None` if the cache entry doesn't exist or cannot be parsed.
    /// Expired entries are returned with `is_expired = true`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedData<T>> {
        let path = self.cache_path(key);
        let content = fs::read_to_string(path).ok()?;
        let entry: CacheEntry<T> = serde_json::from_str(&content).ok()?;

        let now = Utc::now();
        let is_expired = now >= entry.expires_at;

        Some(CachedData {
            data: entry.data,
            cached_at: entry.cached_at,
            is_expired,
        })
    }
}

impl SponsorCache for CacheManager {
    fn get(&self, key: &str) -> Option<Vec<SponsorEdge>> {
        let cached = self.read::<Vec<SponsorEdge>>(key)?;
        if cached.is_expired {
            debug!(key = %key, cached_at = %cached.cached_at, "Cache entry expired");
            return None;
        }
        Some(cached.data)
    }

    fn set(&self, key: &str, edges: &[SponsorEdge], ttl: Duration) {
        if let Err(e) = self.write(key, &edges, ttl) {
            warn!(key = %key, error = %e, "Failed to write sponsors cache");
        }
    }
}
