use std::path::{Path, PathBuf};

use serde::Serialize;

const TAG_TREE: &[&str] = &["dm3", "dm4"];
const FIXED_HEADER: &[&str] = &["mrc", "ali", "rec"];
const CONTAINER: &[&str] = &["emd"];
const STREAM_HEADER: &[&str] = &["ser"];
const COMPANION_INFO: &[&str] = &["emi"];
const RASTER: &[&str] = &["png", "tif", "tiff", "jpg"];

/// Format family a file belongs to, judged by extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileKind {
    /// Gatan DigitalMicrograph tag trees.
    TagTree,
    /// MRC and the IMOD `ali` / `rec` variants.
    FixedHeader,
    /// EMD containers, Berkeley or Velox flavoured.
    Container,
    /// TIA SER streams.
    StreamHeader,
    /// TIA EMI companion files.
    CompanionInfo,
    Raster,
    Unknown,
}

impl FileKind {
    pub const ALL: [FileKind; 6] = [
        FileKind::TagTree,
        FileKind::FixedHeader,
        FileKind::Container,
        FileKind::StreamHeader,
        FileKind::CompanionInfo,
        FileKind::Raster,
    ];

    pub fn of(path: &Path) -> Self {
        let Some(ext) = extension(path) else {
            return Self::Unknown;
        };
        Self::ALL
            .into_iter()
            .find(|kind| kind.extensions().contains(&ext.as_str()))
            .unwrap_or(Self::Unknown)
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::TagTree => TAG_TREE,
            Self::FixedHeader => FIXED_HEADER,
            Self::Container => CONTAINER,
            Self::StreamHeader => STREAM_HEADER,
            Self::CompanionInfo => COMPANION_INFO,
            Self::Raster => RASTER,
            Self::Unknown => &[],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TagTree => "DM",
            Self::FixedHeader => "MRC",
            Self::Container => "EMD",
            Self::StreamHeader => "SER",
            Self::CompanionInfo => "EMI",
            Self::Raster => "raster",
            Self::Unknown => "unknown",
        }
    }
}

/// Lowercase extension without the leading dot.
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
}

pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    extension(path).is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Sibling file sharing the stem, e.g. `tilt.mrc` -> `tilt.rawtlt`.
pub fn sidecar_path(path: &Path, sidecar_extension: &str) -> PathBuf {
    path.with_extension(sidecar_extension)
}
