use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::extract::{ExtractorId, MetadataExtractor, Result};
use crate::model::MetadataRecord;

use super::LruCache;

/// Records kept per extractor before the least recently used is dropped.
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoized extraction results, one LRU per extractor identity.
///
/// Entries are keyed by the lexically absolute path and are never
/// invalidated when the file changes on disk.
#[derive(Debug)]
pub struct MetadataCache {
    capacity: usize,
    caches: HashMap<ExtractorId, LruCache<Arc<MetadataRecord>>>,
    stats: CacheStats,
}

impl MetadataCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            caches: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Returns the cached record for `path`, running `extractor` on its
    /// absolute form on a miss. Failed extractions are not stored.
    pub fn get_or_compute(
        &mut self,
        extractor: &dyn MetadataExtractor,
        path: &Path,
    ) -> Result<Arc<MetadataRecord>> {
        let id = extractor.id();
        let absolute = absolute_path(path);
        let key = absolute.display().to_string();
        let cache = self
            .caches
            .entry(id)
            .or_insert_with(|| LruCache::new(self.capacity));
        if let Some(record) = cache.get(&key) {
            self.stats.hits += 1;
            log::debug!("metadata cache hit for {key} ({id:?})");
            return Ok(Arc::clone(record));
        }

        self.stats.misses += 1;
        log::debug!("metadata cache miss for {key} ({id:?})");
        let record = Arc::new(extractor.extract(&absolute)?);
        if let Some((evicted, _)) = cache.insert(key, Arc::clone(&record)) {
            log::debug!("evicted {evicted} from the {id:?} metadata cache");
        }
        Ok(record)
    }

    pub fn contains(&self, id: ExtractorId, path: &Path) -> bool {
        self.caches
            .get(&id)
            .is_some_and(|cache| cache.contains(&cache_key(path)))
    }

    /// Entries held for one extractor.
    pub fn len(&self, id: ExtractorId) -> usize {
        self.caches.get(&id).map_or(0, LruCache::len)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Absolute form of `path` without touching the filesystem.
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

pub fn cache_key(path: &Path) -> String {
    absolute_path(path).display().to_string()
}
