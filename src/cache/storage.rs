//! TTL-bounded response storage
//!
//! Timestamps use `tokio::time::Instant` so expiry follows the runtime clock,
//! which tests can pause and advance.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use super::DEFAULT_TTL;

/// A cached response body and the moment it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Value,
    pub timestamp: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.timestamp.elapsed() < ttl
    }
}

/// In-memory response cache keyed by [`cache_key`](super::cache_key).
///
/// There is no size bound; entries accumulate until they expire on read or
/// the cache is cleared.
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get cached data if it is still within the TTL window
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some(entry) if entry.is_fresh(self.ttl) => Some(entry.data.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store data, replacing any previous entry for the key
    pub fn set(&self, key: &str, data: Value) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    data,
                    timestamp: Instant::now(),
                },
            );
        }
    }

    /// Remove every entry, returning how many were dropped
    pub fn clear(&self) -> usize {
        match self.entries.lock() {
            Ok(mut entries) => {
                let count = entries.len();
                entries.clear();
                count
            }
            Err(_) => 0,
        }
    }

    /// Number of stored entries, fresh or not
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_after_set_returns_value() {
        let cache = ResponseCache::default();
        cache.set("k", json!({"id": 1}));

        assert_eq!(cache.get("k"), Some(json!({"id": 1})));
    }

    #[tokio::test]
    async fn test_get_unknown_key_misses() {
        let cache = ResponseCache::default();
        assert_eq!(cache.get("nope"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        cache.set("k", json!([1, 2, 3]));

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(cache.get("k").is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_overwrites_and_refreshes_timestamp() {
        let cache = ResponseCache::new(Duration::from_secs(10));
        cache.set("k", json!("old"));

        tokio::time::advance(Duration::from_secs(8)).await;
        cache.set("k", json!("new"));

        tokio::time::advance(Duration::from_secs(8)).await;
        assert_eq!(cache.get("k"), Some(json!("new")));
    }

    #[tokio::test]
    async fn test_clear_makes_every_get_miss() {
        let cache = ResponseCache::default();
        cache.set("a", json!(1));
        cache.set("b", json!(2));

        assert_eq!(cache.clear(), 2);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.clear(), 0);
    }
}
