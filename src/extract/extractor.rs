use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::formats::{FileKind, FormatLibrary};
use crate::model::MetadataRecord;

use super::{
    CompanionExtractor, ContainerExtractor, FixedHeaderExtractor, Result, StreamExtractor,
    TagTreeExtractor,
};

/// Key fragments of vendor subtrees too large or too private to show.
pub const NOISY_KEYS: [&str; 7] = [
    "frame sequence",
    "Private",
    "Reference Images",
    "Frame.Intensity",
    "Area.Transform",
    "Parameters.Objects",
    "Device.Parameters",
];

pub fn is_noisy(key: &str) -> bool {
    NOISY_KEYS.iter().any(|fragment| key.contains(fragment))
}

/// Identity of an extractor; each identity gets its own cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExtractorId {
    TagTree,
    FixedHeader,
    Container,
    StreamHeader,
    CompanionInfo,
}

impl ExtractorId {
    pub const ALL: [ExtractorId; 5] = [
        ExtractorId::TagTree,
        ExtractorId::FixedHeader,
        ExtractorId::Container,
        ExtractorId::StreamHeader,
        ExtractorId::CompanionInfo,
    ];

    /// Extractor responsible for `path`, by extension. Raster images and
    /// unknown files have none.
    pub fn for_path(path: &Path) -> Option<Self> {
        match FileKind::of(path) {
            FileKind::TagTree => Some(Self::TagTree),
            FileKind::FixedHeader => Some(Self::FixedHeader),
            FileKind::Container => Some(Self::Container),
            FileKind::StreamHeader => Some(Self::StreamHeader),
            FileKind::CompanionInfo => Some(Self::CompanionInfo),
            FileKind::Raster | FileKind::Unknown => None,
        }
    }
}

/// Maps one format family's native header into a [`MetadataRecord`].
///
/// Field-level problems default inside the record; only a file that cannot
/// be read at all is an error.
pub trait MetadataExtractor: Send + Sync {
    fn id(&self) -> ExtractorId;
    fn extract(&self, path: &Path) -> Result<MetadataRecord>;
}

/// One extractor per format family, all reading through `library`.
pub fn standard_extractors(library: Arc<dyn FormatLibrary>) -> Vec<Box<dyn MetadataExtractor>> {
    vec![
        Box::new(TagTreeExtractor::new(Arc::clone(&library))),
        Box::new(FixedHeaderExtractor::new(Arc::clone(&library))),
        Box::new(ContainerExtractor::new(Arc::clone(&library))),
        Box::new(StreamExtractor::new(Arc::clone(&library))),
        Box::new(CompanionExtractor::new(library)),
    ]
}
