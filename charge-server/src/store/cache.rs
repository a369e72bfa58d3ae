//! Caching layer for station range queries.
//!
//! Identical bounding boxes recur whenever clients repeat a search from
//! the same spot, so the store result is cached for a short TTL. Boxes
//! are keyed at micro-degree resolution, which bounds key cardinality
//! without merging boxes that differ meaningfully.
//!
//! Every key also carries the cache generation. Invalidation bumps the
//! generation, so a query that read the old catalog and finishes after
//! the invalidation stores its result under a key no lookup will use.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::StationRecord;
use crate::geo::BoundingBox;

use super::StationStore;
use super::error::StoreError;

/// Box edges in micro-degrees (min_lat, max_lat, min_lng, max_lng).
type BoxKey = [i64; 4];

/// Cache key: generation plus box.
type CacheKey = (u64, BoxKey);

/// Cached query result.
type BoxEntry = Arc<Vec<StationRecord>>;

/// Configuration for the store cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Station store wrapper that caches range query results.
///
/// Errors are never cached; a failing query is retried against the
/// inner store on the next request.
pub struct CachedStationStore<S> {
    inner: S,
    cache: MokaCache<CacheKey, BoxEntry>,
    generation: AtomicU64,
}

impl<S: StationStore> CachedStationStore<S> {
    /// Wrap a store with a cache.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            cache,
            generation: AtomicU64::new(0),
        }
    }

    /// Access the underlying store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries (e.g. after a catalog reload).
    ///
    /// Queries already in flight cannot repopulate the cache with
    /// results read before this call.
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate_all();
    }
}

impl<S: StationStore> StationStore for CachedStationStore<S> {
    async fn find_stations_in_range(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<StationRecord>, StoreError> {
        let key = (self.generation.load(Ordering::SeqCst), box_key(bbox));

        if let Some(cached) = self.cache.get(&key).await {
            trace!(?key, "station cache hit");
            return Ok(cached.as_ref().clone());
        }

        let stations = self.inner.find_stations_in_range(bbox).await?;
        self.cache.insert(key, Arc::new(stations.clone())).await;

        Ok(stations)
    }
}

fn box_key(bbox: &BoundingBox) -> BoxKey {
    let micro = |deg: f64| (deg * 1e6).round() as i64;
    [
        micro(bbox.min_lat),
        micro(bbox.max_lat),
        micro(bbox.min_lng),
        micro(bbox.max_lng),
    ]
}
