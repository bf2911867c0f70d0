use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value, json};

use crate::formats::{FixedHeader, FormatLibrary};
use crate::model::{AxisCalibration, MetadataRecord};

use super::{ExtractorId, MetadataExtractor, Result, Sidecars};

/// MRC volumes and their IMOD `.ali` / `.rec` variants.
pub struct FixedHeaderExtractor {
    library: Arc<dyn FormatLibrary>,
}

impl FixedHeaderExtractor {
    pub fn new(library: Arc<dyn FormatLibrary>) -> Self {
        Self { library }
    }
}

impl MetadataExtractor for FixedHeaderExtractor {
    fn id(&self) -> ExtractorId {
        ExtractorId::FixedHeader
    }

    fn extract(&self, path: &Path) -> Result<MetadataRecord> {
        let header = self.library.read_fixed_header(path)?;
        let sidecars = Sidecars::load(path);
        Ok(fixed_header_record(path, &header, &sidecars))
    }
}

/// Voxel sizes are Angstrom `[z, y, x]`; X and Y fall back to pixels
/// independently when their size is not positive.
pub fn fixed_header_record(
    path: &Path,
    header: &FixedHeader,
    sidecars: &Sidecars,
) -> MetadataRecord {
    let mut entries = Map::new();
    entries.insert("axisOrientations".into(), json!(header.axis_orientations));
    entries.insert("cellAngles".into(), json!(header.cell_angles));
    if let Some(vendor) = &header.vendor_info {
        entries.extend(vendor.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    entries.insert("FileName".into(), Value::String(path.display().to_string()));
    if let Some(angles) = &sidecars.tilt_angles {
        entries.insert("tilt angles".into(), json!(angles));
    }
    for (name, value) in &sidecars.parameters {
        entries.insert(name.clone(), json!(value));
    }

    let [_, y_size, x_size] = header.voxel_size;
    let x = axis(x_size);
    let y = axis(y_size);
    if !x.is_physical() || !y.is_physical() {
        log::warn!(
            "{} has a non-positive voxel size, falling back to pixels",
            path.display()
        );
    }
    MetadataRecord::with_calibration(entries, Some(x), Some(y))
}

fn axis(angstrom: f64) -> AxisCalibration {
    AxisCalibration::from_native(angstrom, 0.0, "A")
}
