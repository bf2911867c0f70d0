use std::path::Path;

use serde_json::{Map, Value};

use crate::model::RawArray;

use super::{FileKind, FormatError, Result};

/// Attribute on an EMD data group marking STEMTomo tilt series.
pub const STEMTOMO_VERSION_ATTR: &str = "stemtomo version";

/// Flat listing of a DigitalMicrograph tag tree.
///
/// Tags are dotted paths such as `ImageList.2.ImageData.Calibrations.Dimension.1.Scale`,
/// in file order. `image_count` is the number of image objects; the last one
/// is the displayed image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagTree {
    pub tags: Vec<(String, Value)>,
    pub image_count: usize,
}

/// Parsed fixed-width MRC header.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedHeader {
    /// Volume shape as `(nz, ny, nx)`.
    pub shape: [usize; 3],
    pub mode: i32,
    /// Voxel size in Angstrom, ordered `[z, y, x]`. Zero when the header
    /// carries no sampling.
    pub voxel_size: [f64; 3],
    /// `mapc`, `mapr`, `maps`.
    pub axis_orientations: [i32; 3],
    /// `alpha`, `beta`, `gamma` in degrees.
    pub cell_angles: [f64; 3],
    pub extended_header_len: usize,
    /// Vendor block from the extended header, when one was recognized.
    pub vendor_info: Option<Map<String, Value>>,
}

/// One dimension vector of a Berkeley EMD dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmdDimension {
    pub name: String,
    pub units: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmdDataset {
    pub name: String,
    pub dims: Vec<EmdDimension>,
}

/// A Velox data group: metadata byte column plus the data shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VeloxDataGroup {
    pub metadata: Vec<u8>,
    pub shape: Vec<usize>,
}

/// Parsed EMD container.
///
/// Berkeley files list named `datasets`; Velox files list none and keep
/// their metadata as JSON inside `velox_groups`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmdContainer {
    pub user: Option<Map<String, Value>>,
    pub microscope: Option<Map<String, Value>>,
    pub sample: Option<Map<String, Value>>,
    /// Attributes of the top-level `data` group.
    pub data_attrs: Map<String, Value>,
    pub datasets: Vec<EmdDataset>,
    pub velox_groups: Vec<VeloxDataGroup>,
}

impl EmdContainer {
    pub fn is_berkeley(&self) -> bool {
        !self.datasets.is_empty()
    }

    pub fn is_tilt_series(&self) -> bool {
        self.data_attrs.contains_key(STEMTOMO_VERSION_ATTR)
    }
}

/// Header value as a stream decoder returns it.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderField {
    Value(Value),
    Bytes(Vec<u8>),
}

impl HeaderField {
    /// Byte strings become (lossy) UTF-8 text.
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Bytes(bytes) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }
}

impl From<Value> for HeaderField {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Parsed SER stream: file header, header of the first dataset and the
/// optional EMI companion contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamHeader {
    pub file_header: Vec<(String, HeaderField)>,
    pub dataset_header: Vec<(String, HeaderField)>,
    pub companion: Option<Map<String, Value>>,
}

/// Byte-level decoders for the electron-microscopy container formats.
///
/// Every method defaults to [`FormatError::DecoderUnavailable`] so an
/// implementation only overrides the families it can read.
pub trait FormatLibrary: Send + Sync {
    fn read_tag_tree(&self, path: &Path) -> Result<TagTree> {
        Err(FormatError::unavailable("DM", path))
    }

    fn read_fixed_header(&self, path: &Path) -> Result<FixedHeader> {
        Err(FormatError::unavailable("MRC", path))
    }

    fn read_container(&self, path: &Path) -> Result<EmdContainer> {
        Err(FormatError::unavailable("EMD", path))
    }

    fn read_stream_header(&self, path: &Path) -> Result<StreamHeader> {
        Err(FormatError::unavailable("SER", path))
    }

    fn read_companion_info(&self, path: &Path) -> Result<Map<String, Value>> {
        Err(FormatError::unavailable("EMI", path))
    }

    /// Full sample array of any electron-microscopy file.
    fn read_array(&self, path: &Path) -> Result<RawArray> {
        Err(FormatError::unavailable(FileKind::of(path).name(), path))
    }
}
