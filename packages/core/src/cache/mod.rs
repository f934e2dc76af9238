//! Block Forest Cache
//!
//! Memoizes built block forests by parent id so repeated article reads skip the
//! recursive fetch.
//!
//! # Contract
//!
//! Read-through with population: on a miss the forest is computed once and
//! stored; a failed computation stores nothing. Concurrent callers asking for
//! the same missing key may each compute it (no single-flight de-duplication).
//!
//! # Implementations
//!
//! - `MemoryBlockCache` - unbounded map, the default
//! - `LruBlockCache` - bounded, evicts the least recently used forest

use crate::models::Block;
use async_trait::async_trait;
use lru::LruCache;
use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use tokio::sync::{Mutex, RwLock};

/// Store for built block forests
#[async_trait]
pub trait BlockCache: Send + Sync {
    /// Cached forest for `key`, if present
    async fn get(&self, key: &str) -> Option<Vec<Block>>;

    /// Store the forest for `key`, replacing any previous entry
    async fn insert(&self, key: &str, blocks: Vec<Block>);

    /// Drop the entry for `key`
    async fn invalidate(&self, key: &str);

    /// Number of cached forests
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Return the cached forest for `key`, or compute and store it
///
/// Errors from `compute` propagate and leave the cache untouched.
pub async fn fetch_or_compute<F, Fut, E>(
    cache: &dyn BlockCache,
    key: &str,
    compute: F,
) -> Result<Vec<Block>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<Block>, E>>,
{
    if let Some(blocks) = cache.get(key).await {
        tracing::debug!("Block cache hit for {}", key);
        return Ok(blocks);
    }

    tracing::debug!("Block cache miss for {}", key);
    let blocks = compute().await?;
    cache.insert(key, blocks.clone()).await;
    Ok(blocks)
}

/// Unbounded in-process cache
#[derive(Debug, Default)]
pub struct MemoryBlockCache {
    entries: RwLock<HashMap<String, Vec<Block>>>,
}

impl MemoryBlockCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlockCache for MemoryBlockCache {
    async fn get(&self, key: &str) -> Option<Vec<Block>> {
        self.entries.read().await.get(key).cloned()
    }

    async fn insert(&self, key: &str, blocks: Vec<Block>) {
        self.entries.write().await.insert(key.to_string(), blocks);
    }

    async fn invalidate(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Capacity-bounded cache with least-recently-used eviction
pub struct LruBlockCache {
    entries: Mutex<LruCache<String, Vec<Block>>>,
}

impl LruBlockCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Maximum number of cached forests
    pub async fn capacity(&self) -> usize {
        self.entries.lock().await.cap().get()
    }
}

#[async_trait]
impl BlockCache for LruBlockCache {
    async fn get(&self, key: &str) -> Option<Vec<Block>> {
        self.entries.lock().await.get(key).cloned()
    }

    async fn insert(&self, key: &str, blocks: Vec<Block>) {
        self.entries.lock().await.put(key.to_string(), blocks);
    }

    async fn invalidate(&self, key: &str) {
        self.entries.lock().await.pop(key);
    }

    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}
