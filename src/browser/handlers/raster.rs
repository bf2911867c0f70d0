use std::path::Path;

use crate::browser::{Handler, ImageView, LoadOutcome, Result, View};
use crate::formats::{FileKind, read_raster};
use crate::model::{DisplayArray, PlaneCalibration};

pub const IMAGE_VIEWER: &str = "Image viewer";

/// PNG, JPEG and TIFF images, shown uncalibrated.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterHandler;

impl Handler for RasterHandler {
    fn name(&self) -> &'static str {
        IMAGE_VIEWER
    }

    fn supports(&self, path: &Path) -> bool {
        FileKind::of(path) == FileKind::Raster
    }

    fn load(&mut self, path: &Path) -> Result<LoadOutcome> {
        let data = read_raster(path)?;
        Ok(LoadOutcome::Rendered(View::Image(ImageView {
            array: DisplayArray::full(data),
            calibration: PlaneCalibration::default(),
        })))
    }
}
