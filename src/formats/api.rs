use std::path::Path;

use ndarray::ArrayD;

use super::raster::read_common_raster;
use super::tiff::read_tiff;
use super::util::extension;
use super::{FileKind, FormatError, Result};

/// Decodes an ordinary raster image into samples scaled to `[0, 1]`.
pub fn read_raster(path: impl AsRef<Path>) -> Result<ArrayD<f32>> {
    let path = path.as_ref();
    let extension = extension(path)
        .ok_or_else(|| FormatError::UnsupportedFormat(path.display().to_string()))?;
    match extension.as_str() {
        "png" | "jpg" | "jpeg" => read_common_raster(path),
        "tif" | "tiff" => read_tiff(path),
        other => Err(FormatError::UnsupportedFormat(other.to_string())),
    }
}

/// Every extension some format family claims.
pub fn supported_extensions() -> Vec<&'static str> {
    FileKind::ALL
        .into_iter()
        .flat_map(|kind| kind.extensions().iter().copied())
        .collect()
}
