//! Cache module for storing sponsor API responses
//!
//! The registry talks to its cache through the `SponsorCache` trait. Two
//! stores are provided: `CacheManager` persists entries as JSON files with an
//! expiry timestamp, and `MemoryCache` keeps them in process. Both store the
//! raw edge list, before mapping and deduplication.

mod manager;
mod memory;

pub use manager::{CacheManager, CachedData};
pub use memory::MemoryCache;

use std::time::Duration;

use crate::data::SponsorEdge;

/// A key/value store with per-entry expiry
///
/// `get` only returns entries that have not expired. `set` never fails from
/// the caller's point of view; stores log write errors instead.
pub trait SponsorCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<SponsorEdge>>;
    fn set(&self, key: &str, edges: &[SponsorEdge], ttl: Duration);
}

/// Cache key for a login's sponsor list (hex MD5 of `"github sponsors <login>"`)
pub fn cache_key(login: &str) -> String {
    format!("{:x}", md5::compute(format!("github sponsors {}", login)))
}
