use std::path::Path;

use super::{Result, View};

/// Result of a load that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Rendered(View),
    /// The file was understood but not shown; the previous view stays.
    Unchanged { notice: String },
}

/// A pluggable viewer for one family of files.
pub trait Handler: Send {
    /// Unique display name.
    fn name(&self) -> &'static str;

    /// Extension check only; never opens the file.
    fn supports(&self, path: &Path) -> bool;

    fn load(&mut self, path: &Path) -> Result<LoadOutcome>;
}
