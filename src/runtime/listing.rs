use std::path::PathBuf;

use serde::Serialize;

/// One file of a directory listing with the handler it would open in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseEntry {
    pub path: PathBuf,
    pub handler: String,
}
