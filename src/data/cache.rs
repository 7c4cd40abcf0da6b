use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::enrich::{enrich, ElevationBuckets};
use super::model::{AirportType, Dataset};
use super::query::{filter, AirportQuery, RegionSelector};
use super::summary::{pivot, DatasetSummary, PivotTable};

// ---------------------------------------------------------------------------
// QueryCache – memoized filter results
// ---------------------------------------------------------------------------

/// Hashable form of an [`AirportQuery`]; elevation bounds are stored as raw
/// bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    region: RegionSelector,
    elevation_min: u64,
    elevation_max: u64,
    types: BTreeSet<AirportType>,
}

impl From<&AirportQuery> for QueryKey {
    fn from(query: &AirportQuery) -> Self {
        Self {
            region: query.region.clone(),
            elevation_min: query.elevation.min().to_bits(),
            elevation_max: query.elevation.max().to_bits(),
            types: query.types.clone(),
        }
    }
}

/// Default number of results a [`QueryCache`] keeps.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Filter results keyed by query parameters, holding at most `capacity`
/// entries. The least recently used entry is evicted first.
///
/// Entries never go stale: a cache belongs to one [`QueryEngine`], whose
/// dataset cannot change.
#[derive(Debug)]
pub struct QueryCache {
    entries: HashMap<QueryKey, (Dataset, usize)>,
    /// Keys from least to most recently used.
    recency: VecDeque<QueryKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

/// Snapshot of a cache's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub len: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

impl QueryCache {
    /// A cache holding at most `capacity` results (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            recency: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Cached result for `query`, computing it with `compute` on a miss.
    pub fn get_or_insert_with<F>(&mut self, query: &AirportQuery, compute: F) -> (Dataset, usize)
    where
        F: FnOnce() -> (Dataset, usize),
    {
        let key = QueryKey::from(query);
        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            log::trace!("Query cache hit ({} hits, {} misses)", self.hits, self.misses);
            let result = hit.clone();
            self.touch(&key);
            return result;
        }

        self.misses += 1;
        log::trace!("Query cache miss ({} hits, {} misses)", self.hits, self.misses);
        let result = compute();

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.recency.pop_front() {
                self.entries.remove(&oldest);
                log::trace!("Query cache evicted {oldest:?}");
            }
        }
        self.entries.insert(key.clone(), result.clone());
        self.recency.push_back(key);
        result
    }

    /// Mark `key` as most recently used.
    fn touch(&mut self, key: &QueryKey) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            if let Some(k) = self.recency.remove(pos) {
                self.recency.push_back(k);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            len: self.entries.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }
}

// ---------------------------------------------------------------------------
// QueryEngine – an enriched dataset plus its cache
// ---------------------------------------------------------------------------

/// Owns an enriched dataset and answers queries against it.
///
/// Build one per loaded file and pass it to whoever issues queries. Loading a
/// different file means building a new engine. Queries take `&self`, so one
/// engine can be shared between threads; the cache sits behind a mutex.
#[derive(Debug)]
pub struct QueryEngine {
    dataset: Dataset,
    buckets: ElevationBuckets,
    summary: DatasetSummary,
    cache: Option<Mutex<QueryCache>>,
}

impl QueryEngine {
    /// Enrich `dataset` with `buckets`. A `cache_capacity` of 0 turns
    /// memoization off.
    pub fn new(dataset: Dataset, buckets: ElevationBuckets, cache_capacity: usize) -> Self {
        let dataset = enrich(&dataset, &buckets);
        let summary = DatasetSummary::compute(&dataset);
        Self {
            dataset,
            buckets,
            summary,
            cache: (cache_capacity > 0).then(|| Mutex::new(QueryCache::with_capacity(cache_capacity))),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn buckets(&self) -> &ElevationBuckets {
        &self.buckets
    }

    /// Whole-dataset figures, computed once at construction.
    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }

    /// Cache counters, or `None` when caching is off.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| lock(cache).stats())
    }

    pub fn filter(&self, query: &AirportQuery) -> (Dataset, usize) {
        match &self.cache {
            Some(cache) => lock(cache).get_or_insert_with(query, || filter(&self.dataset, query)),
            None => filter(&self.dataset, query),
        }
    }

    /// Type × elevation band counts over `subset` (usually a filter result).
    pub fn pivot(&self, subset: &Dataset) -> PivotTable {
        pivot(subset, &self.buckets)
    }
}

/// A panic while holding the lock cannot leave the cache inconsistent (an
/// entry is inserted whole or not at all), so a poisoned lock is reused.
fn lock(cache: &Mutex<QueryCache>) -> MutexGuard<'_, QueryCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}
