use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::cache::{MetadataCache, absolute_path};
use crate::formats::FormatLibrary;
use crate::model::MetadataRecord;

use super::{ExtractorId, MetadataExtractor, Result, standard_extractors};

/// Routes a path to its extractor through the metadata cache.
pub struct MetadataService {
    extractors: Vec<Box<dyn MetadataExtractor>>,
    cache: MetadataCache,
}

impl MetadataService {
    pub fn new(library: Arc<dyn FormatLibrary>, capacity: usize) -> Self {
        Self::with_extractors(standard_extractors(library), capacity)
    }

    pub fn with_extractors(extractors: Vec<Box<dyn MetadataExtractor>>, capacity: usize) -> Self {
        Self {
            extractors,
            cache: MetadataCache::new(capacity),
        }
    }

    /// Record for `path`. Files no extractor claims get a record holding
    /// only their absolute name and pixel calibration.
    pub fn record_for(&mut self, path: &Path) -> Result<Arc<MetadataRecord>> {
        let extractor = ExtractorId::for_path(path).and_then(|id| {
            self.extractors
                .iter()
                .find(|extractor| extractor.id() == id)
        });
        match extractor {
            Some(extractor) => self.cache.get_or_compute(extractor.as_ref(), path),
            None => Ok(Arc::new(MetadataRecord::unrecognized(&absolute_path(path)))),
        }
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }
}

impl fmt::Debug for MetadataService {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MetadataService")
            .field(
                "extractors",
                &self
                    .extractors
                    .iter()
                    .map(|extractor| extractor.id())
                    .collect::<Vec<_>>(),
            )
            .field("cache", &self.cache)
            .finish()
    }
}
