use std::path::Path;
use std::sync::Arc;

use serde_json::Map;

use crate::formats::{FormatLibrary, StreamHeader};
use crate::model::{AxisCalibration, MetadataRecord, value_as_f64};

use super::{ExtractorId, MetadataExtractor, Result};

/// TIA `.ser` streams, with their `.emi` companion when present.
pub struct StreamExtractor {
    library: Arc<dyn FormatLibrary>,
}

impl StreamExtractor {
    pub fn new(library: Arc<dyn FormatLibrary>) -> Self {
        Self { library }
    }
}

impl MetadataExtractor for StreamExtractor {
    fn id(&self) -> ExtractorId {
        ExtractorId::StreamHeader
    }

    fn extract(&self, path: &Path) -> Result<MetadataRecord> {
        let header = self.library.read_stream_header(path)?;
        Ok(stream_record(header))
    }
}

/// Later sources win: dataset header, then companion info, then the file
/// header. SER calibrations are always in meters.
pub fn stream_record(header: StreamHeader) -> MetadataRecord {
    let mut entries = Map::new();
    entries.extend(
        header
            .dataset_header
            .into_iter()
            .map(|(key, field)| (key, field.into_value())),
    );
    if let Some(companion) = header.companion {
        entries.extend(companion);
    }
    entries.extend(
        header
            .file_header
            .into_iter()
            .map(|(key, field)| (key, field.into_value())),
    );

    let calibration = entries.get("Calibration").and_then(|calibration| {
        let axis = |index: usize| {
            let axis = calibration.get(index)?;
            Some(AxisCalibration::from_native(
                value_as_f64(axis.get("CalibrationDelta")?)?,
                value_as_f64(axis.get("CalibrationOffset")?)?,
                "m",
            ))
        };
        Some((axis(0)?, axis(1)?))
    });
    match calibration {
        Some((x, y)) => MetadataRecord::with_calibration(entries, Some(x), Some(y)),
        None => {
            log::warn!("SER header carries no two-axis calibration, using pixels");
            MetadataRecord::with_calibration(entries, None, None)
        }
    }
}
