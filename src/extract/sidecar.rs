use std::fs;
use std::io;
use std::path::Path;

use crate::formats::sidecar_path;

/// Header lines before the first parameter of an acquisition listing.
const LISTING_HEADER_LINES: usize = 3;
/// Width of the timestamp column preceding each parameter.
const LISTING_PREFIX_CHARS: usize = 18;

/// Optional text files stored next to an MRC volume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sidecars {
    /// `<stem>.rawtlt`, one angle per line.
    pub tilt_angles: Option<Vec<f64>>,
    /// `<stem>.txt` acquisition parameters.
    pub parameters: Vec<(String, f64)>,
}

impl Sidecars {
    /// Reads whichever sidecars exist. Unreadable ones are logged and skipped.
    pub fn load(path: &Path) -> Self {
        let tilt_angles =
            read_optional(&sidecar_path(path, "rawtlt")).map(|text| parse_tilt_angles(&text));
        let parameters = read_optional(&sidecar_path(path, "txt"))
            .map(|text| parse_parameter_listing(&text))
            .unwrap_or_default();
        Self {
            tilt_angles,
            parameters,
        }
    }
}

fn read_optional(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => None,
        Err(error) => {
            log::warn!("skipping sidecar {}: {error}", path.display());
            None
        }
    }
}

/// One float per line; lines that do not parse are skipped.
pub fn parse_tilt_angles(text: &str) -> Vec<f64> {
    text.lines()
        .filter_map(|line| line.trim().parse::<f64>().ok())
        .collect()
}

/// Parses a `name: value` listing framed by three header lines and one
/// footer line. Each line starts with an 18 character column that is
/// dropped; lines without a numeric value are skipped.
pub fn parse_parameter_listing(text: &str) -> Vec<(String, f64)> {
    let lines = text.lines().collect::<Vec<_>>();
    let end = lines.len().saturating_sub(1);
    if end <= LISTING_HEADER_LINES {
        return Vec::new();
    }
    lines[LISTING_HEADER_LINES..end]
        .iter()
        .filter_map(|line| {
            let body = line
                .char_indices()
                .nth(LISTING_PREFIX_CHARS)
                .map(|(index, _)| &line[index..])?;
            let mut fields = body.trim().split(':');
            let name = fields.next()?.trim();
            let value = fields.next()?.trim().parse::<f64>().ok()?;
            Some((name.to_string(), value))
        })
        .collect()
}
