mod lru;
mod metadata;


pub use lru::LruCache;
pub use metadata::{CacheStats, DEFAULT_CAPACITY, MetadataCache, absolute_path, cache_key};
