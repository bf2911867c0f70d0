use std::path::Path;

use crate::model::RawArray;

use super::mrc::{read_header, read_volume};
use super::{FileKind, FixedHeader, FormatError, FormatLibrary, Result};

/// Decoders this crate ships: the MRC family.
///
/// DM, EMD and SER containers need an external library injected through
/// [`FormatLibrary`]; here they report that no decoder is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeLibrary;

impl FormatLibrary for NativeLibrary {
    fn read_fixed_header(&self, path: &Path) -> Result<FixedHeader> {
        read_header(path)
    }

    fn read_array(&self, path: &Path) -> Result<RawArray> {
        match FileKind::of(path) {
            FileKind::FixedHeader => read_volume(path),
            kind => Err(FormatError::unavailable(kind.name(), path)),
        }
    }
}
