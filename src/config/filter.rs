use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use super::{ConfigError, Result};

pub const DEFAULT_FILE_FILTER: &str = "*.*,";

/// Wildcard patterns matched against file names.
#[derive(Debug, Clone)]
pub struct FileFilter {
    patterns: Vec<Pattern>,
}

impl FileFilter {
    /// Splits on commas and trims each pattern. Empty pieces are dropped;
    /// an empty filter matches everything.
    pub fn parse(filter: &str) -> Result<Self> {
        let filter = if filter.trim().is_empty() { "*" } else { filter };
        let patterns = filter
            .split(',')
            .map(str::trim)
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| ConfigError::Pattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> Vec<&str> {
        self.patterns.iter().map(Pattern::as_str).collect()
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.patterns.iter().any(|pattern| pattern.matches(name)))
    }

    /// Regular files in `dir` whose names match, sorted.
    pub fn list(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && self.matches(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}
