//! In-process cache

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::SponsorCache;
use crate::data::SponsorEdge;

#[derive(Debug, Clone)]
struct MemoryEntry {
    edges: Vec<SponsorEdge>,
    expires_at: Option<Instant>,
}

/// Shared in-memory cache
///
/// Clones share the same storage, so one cache can back several registries
/// within a process.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, MemoryEntry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl SponsorCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<SponsorEdge>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let expires_at = entries.get(key)?.expires_at;

        if expires_at.is_some_and(|at| Instant::now() >= at) {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.edges.clone())
    }

    fn set(&self, key: &str, edges: &[SponsorEdge], ttl: Duration) {
        // An Instant overflow means "never expires" for all practical purposes
        let expires_at = Instant::now().checked_add(ttl);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                key.to_string(),
                MemoryEntry {
                    edges: edges.to_vec(),
                    expires_at,
                },
            );
    }
}
