use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::formats::{FormatLibrary, TagTree};
use crate::model::{AxisCalibration, MetadataRecord, value_as_f64};

use super::{ExtractorId, MetadataExtractor, Result, is_noisy};

/// DigitalMicrograph `.dm3` / `.dm4` tag trees.
pub struct TagTreeExtractor {
    library: Arc<dyn FormatLibrary>,
}

impl TagTreeExtractor {
    pub fn new(library: Arc<dyn FormatLibrary>) -> Self {
        Self { library }
    }
}

impl MetadataExtractor for TagTreeExtractor {
    fn id(&self) -> ExtractorId {
        ExtractorId::TagTree
    }

    fn extract(&self, path: &Path) -> Result<MetadataRecord> {
        let tree = self.library.read_tag_tree(path)?;
        Ok(tag_tree_record(&tree))
    }
}

/// Keeps the tags of the displayed (last) image with their image prefix
/// stripped, minus the noisy subtrees.
pub fn tag_tree_record(tree: &TagTree) -> MetadataRecord {
    let image_tags = format!("ImageList.{}.ImageTags.", tree.image_count);
    let image_data = format!("ImageList.{}.ImageData.", tree.image_count);

    let mut entries = Map::new();
    for (key, value) in &tree.tags {
        let stripped = [&image_tags, &image_data].into_iter().find_map(|prefix| {
            key.find(prefix.as_str())
                .map(|position| &key[position + prefix.len()..])
        });
        if let Some(stripped) = stripped.filter(|stripped| !is_noisy(stripped)) {
            entries.insert(stripped.to_string(), value.clone());
        }
    }

    match calibration(&entries) {
        Some((x, y)) => MetadataRecord::with_calibration(entries, Some(x), Some(y)),
        None => {
            log::warn!("DM tags carry no complete calibration, using pixels");
            MetadataRecord::with_calibration(entries, None, None)
        }
    }
}

fn calibration(entries: &Map<String, Value>) -> Option<(AxisCalibration, AxisCalibration)> {
    let axis = |dimension: u8| {
        let prefix = format!("Calibrations.Dimension.{dimension}");
        let scale = value_as_f64(entries.get(&format!("{prefix}.Scale"))?)?;
        let origin = value_as_f64(entries.get(&format!("{prefix}.Origin"))?)?;
        let unit = entries.get(&format!("{prefix}.Units"))?.as_str()?;
        Some(AxisCalibration::from_native(scale, origin, unit))
    };
    Some((axis(1)?, axis(2)?))
}
