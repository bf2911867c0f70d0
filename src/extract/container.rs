use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value, json};

use crate::formats::{EmdContainer, EmdDimension, FormatLibrary, VeloxDataGroup};
use crate::model::{AxisCalibration, MetadataRecord, value_as_f64};

use super::{ExtractError, ExtractorId, MetadataExtractor, Result};

/// EMD containers, Berkeley and Velox flavoured.
pub struct ContainerExtractor {
    library: Arc<dyn FormatLibrary>,
}

impl ContainerExtractor {
    pub fn new(library: Arc<dyn FormatLibrary>) -> Self {
        Self { library }
    }
}

impl MetadataExtractor for ContainerExtractor {
    fn id(&self) -> ExtractorId {
        ExtractorId::Container
    }

    fn extract(&self, path: &Path) -> Result<MetadataRecord> {
        let container = self.library.read_container(path)?;
        container_record(path, &container)
    }
}

/// Maps the container opened from `path`. Berkeley files calibrate from
/// their dimension vectors, Velox files from the JSON of the first data
/// group.
pub fn container_record(path: &Path, container: &EmdContainer) -> Result<MetadataRecord> {
    if container.is_berkeley() {
        return Ok(berkeley_record(container));
    }
    let group = container
        .velox_groups
        .first()
        .ok_or_else(|| ExtractError::EmptyContainer {
            path: path.to_path_buf(),
        })?;
    Ok(velox_record(path, group))
}

fn berkeley_record(container: &EmdContainer) -> MetadataRecord {
    let mut entries = Map::new();
    for group in [&container.user, &container.microscope, &container.sample]
        .into_iter()
        .flatten()
    {
        entries.extend(group.iter().map(|(key, value)| (key.clone(), value.clone())));
    }

    let dims = container
        .datasets
        .first()
        .map(|dataset| dataset.dims.as_slice())
        .unwrap_or_default();
    let last = |offset: usize| {
        dims.len()
            .checked_sub(offset)
            .and_then(|index| dims.get(index))
            .and_then(dimension_calibration)
    };
    MetadataRecord::with_calibration(entries, last(1), last(2))
}

fn dimension_calibration(dimension: &EmdDimension) -> Option<AxisCalibration> {
    match dimension.values.as_slice() {
        [first, second, ..] => Some(AxisCalibration::from_native(
            second - first,
            *first,
            &dimension.units.replace('_', ""),
        )),
        _ => {
            log::warn!(
                "EMD dimension `{}` is too short to calibrate",
                dimension.name
            );
            None
        }
    }
}

fn velox_record(path: &Path, group: &VeloxDataGroup) -> MetadataRecord {
    let mut entries = Map::new();
    entries.insert("pixel sizes".into(), json!([]));
    entries.insert("pixel units".into(), json!([]));

    let metadata = match decode_velox_metadata(&group.metadata) {
        Ok(metadata) => metadata,
        Err(error) => {
            log::warn!(
                "{}: Velox metadata is not valid JSON: {error}",
                path.display()
            );
            Map::new()
        }
    };
    let calibration = velox_calibration(&metadata);
    if calibration.is_none() {
        log::warn!(
            "{}: Velox metadata has no complete calibration, using pixels",
            path.display()
        );
    }
    entries.extend(metadata);
    entries.insert("shape".into(), json!(group.shape));

    match calibration {
        Some((x, y)) => MetadataRecord::with_calibration(entries, Some(x), Some(y)),
        None => MetadataRecord::with_calibration(entries, None, None),
    }
}

/// Decodes the metadata byte column of a Velox data group: zero padding is
/// dropped, the rest read as lossy UTF-8 JSON.
pub fn decode_velox_metadata(bytes: &[u8]) -> serde_json::Result<Map<String, Value>> {
    let valid = bytes
        .iter()
        .copied()
        .filter(|byte| *byte > 0)
        .collect::<Vec<_>>();
    serde_json::from_str(&String::from_utf8_lossy(&valid))
}

fn velox_calibration(metadata: &Map<String, Value>) -> Option<(AxisCalibration, AxisCalibration)> {
    let result = metadata.get("BinaryResult")?;
    let pixel_size = result.get("PixelSize")?;
    let offset = result.get("Offset")?;
    let axis = |size: &str, origin: &str, unit: &str| {
        Some(AxisCalibration::from_native(
            value_as_f64(pixel_size.get(size)?)?,
            value_as_f64(offset.get(origin)?)?,
            result.get(unit)?.as_str()?,
        ))
    };
    Some((
        axis("width", "x", "PixelUnitX")?,
        axis("height", "y", "PixelUnitY")?,
    ))
}
