use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::browser::{Handler, ImageView, LoadOutcome, Result, View};
use crate::formats::{FileKind, FormatLibrary, has_extension};
use crate::reduce::{FormatHint, reduce};

pub const TEM_DATA_VIEWER: &str = "TEM data viewer";

const EXTENSIONS: &[&str] = &["dm3", "dm4", "mrc", "ali", "rec", "emd", "ser"];

/// Electron-microscopy arrays, reduced to at most three dimensions and
/// calibrated from the per-axis pixel sizes.
pub struct TemDataHandler {
    library: Arc<dyn FormatLibrary>,
}

impl TemDataHandler {
    pub fn new(library: Arc<dyn FormatLibrary>) -> Self {
        Self { library }
    }

    fn hint(&self, path: &Path) -> Result<FormatHint> {
        if FileKind::of(path) != FileKind::Container {
            return Ok(FormatHint::Standard);
        }
        let container = self.library.read_container(path)?;
        Ok(if container.is_tilt_series() {
            FormatHint::TiltSeries
        } else {
            FormatHint::Standard
        })
    }
}

impl fmt::Debug for TemDataHandler {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("TemDataHandler").finish_non_exhaustive()
    }
}

impl Handler for TemDataHandler {
    fn name(&self) -> &'static str {
        TEM_DATA_VIEWER
    }

    fn supports(&self, path: &Path) -> bool {
        has_extension(path, EXTENSIONS)
    }

    fn load(&mut self, path: &Path) -> Result<LoadOutcome> {
        let hint = self.hint(path)?;
        let raw = self.library.read_array(path)?;
        let calibration = raw.plane_calibration();
        match reduce(raw.data, hint) {
            Ok(array) => Ok(LoadOutcome::Rendered(View::Image(ImageView {
                array,
                calibration,
            }))),
            Err(error) => Ok(LoadOutcome::Unchanged {
                notice: format!("{}: {error}", path.display()),
            }),
        }
    }
}
