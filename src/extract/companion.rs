use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::formats::FormatLibrary;
use crate::model::MetadataRecord;

use super::{ExtractorId, MetadataExtractor, Result};

/// TIA `.emi` companion files read on their own.
pub struct CompanionExtractor {
    library: Arc<dyn FormatLibrary>,
}

impl CompanionExtractor {
    pub fn new(library: Arc<dyn FormatLibrary>) -> Self {
        Self { library }
    }
}

impl MetadataExtractor for CompanionExtractor {
    fn id(&self) -> ExtractorId {
        ExtractorId::CompanionInfo
    }

    fn extract(&self, path: &Path) -> Result<MetadataRecord> {
        let info = self.library.read_companion_info(path)?;
        Ok(companion_record(info))
    }
}

pub fn companion_record(info: Map<String, Value>) -> MetadataRecord {
    MetadataRecord::with_calibration(info, None, None)
}
