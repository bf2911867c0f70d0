use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::browser::METADATA_VIEWER;
use crate::cache::DEFAULT_CAPACITY;

use super::{ConfigError, DEFAULT_FILE_FILTER, FileFilter, Result};

/// Settings of one browsing session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrowserConfig {
    /// Pick the handler from each selected file.
    pub auto_select: bool,
    /// Handler used when no other supports a file.
    pub fallback_handler: String,
    /// Handler activated before the first selection.
    pub initial_handler: Option<String>,
    /// Metadata records kept per extractor.
    pub cache_capacity: usize,
    /// Comma-separated wildcard patterns for directory listings.
    pub file_filter: String,
    pub browse_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            auto_select: false,
            fallback_handler: METADATA_VIEWER.to_string(),
            initial_handler: None,
            cache_capacity: DEFAULT_CAPACITY,
            file_filter: DEFAULT_FILE_FILTER.to_string(),
            browse_dir: None,
        }
    }
}

impl BrowserConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::Invalid(
                "cache_capacity must be at least 1".to_string(),
            ));
        }
        if self.fallback_handler.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "fallback_handler must not be empty".to_string(),
            ));
        }
        if self
            .initial_handler
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "initial_handler must not be empty when set".to_string(),
            ));
        }
        self.filter().map(|_| ())
    }

    pub fn filter(&self) -> Result<FileFilter> {
        FileFilter::parse(&self.file_filter)
    }
}
