use std::path::PathBuf;

use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormatError>;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported dataset layout for this format: {0}")]
    UnsupportedLayout(String),

    #[error("no {format} decoder is available to read {}", .path.display())]
    DecoderUnavailable { format: &'static str, path: PathBuf },

    #[error("truncated {format} file: expected at least {expected} bytes, found {found}")]
    Truncated {
        format: &'static str,
        expected: u64,
        found: u64,
    },

    #[error("malformed {format} header: {reason}")]
    MalformedHeader { format: &'static str, reason: String },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decode failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("TIFF decode failure: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("core dataset failure: {0}")]
    Core(#[from] CoreError),
}

impl FormatError {
    pub(crate) fn unavailable(format: &'static str, path: &std::path::Path) -> Self {
        Self::DecoderUnavailable {
            format,
            path: path.to_path_buf(),
        }
    }
}
