use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::browser::{Browser, HandlerRegistry, StatusReporter, standard_handlers};
use crate::config::BrowserConfig;
use crate::extract::MetadataService;
use crate::formats::{FormatLibrary, NativeLibrary};

use super::{AppError, BrowseEntry, Result};

/// Wires the format library and configuration into browsers and services.
#[derive(Clone)]
pub struct AppContext {
    library: Arc<dyn FormatLibrary>,
    config: BrowserConfig,
}

impl AppContext {
    /// Context reading through the bundled [`NativeLibrary`].
    pub fn new(config: BrowserConfig) -> Self {
        Self::with_library(Arc::new(NativeLibrary), config)
    }

    pub fn with_library(library: Arc<dyn FormatLibrary>, config: BrowserConfig) -> Self {
        Self { library, config }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut BrowserConfig {
        &mut self.config
    }

    pub fn library(&self) -> Arc<dyn FormatLibrary> {
        Arc::clone(&self.library)
    }

    pub fn metadata_service(&self) -> MetadataService {
        MetadataService::new(self.library(), self.config.cache_capacity)
    }

    /// The shipped handlers registered in order behind the configured
    /// fallback.
    pub fn registry(&self) -> Result<HandlerRegistry> {
        let mut registry = HandlerRegistry::new(self.config.fallback_handler.clone());
        for handler in standard_handlers(self.library(), self.config.cache_capacity) {
            registry.register(handler)?;
        }
        registry.validate()?;
        Ok(registry)
    }

    /// A browser honouring `auto_select` and `initial_handler`.
    pub fn browser<R: StatusReporter>(&self, reporter: R) -> Result<Browser<R>> {
        self.config.validate()?;
        let mut browser =
            Browser::new(self.registry()?, reporter).with_auto_select(self.config.auto_select);
        if let Some(name) = &self.config.initial_handler {
            browser.select_handler(name)?;
        }
        Ok(browser)
    }

    /// Files of `dir` (or the configured `browse_dir`) passing the file
    /// filter, each with its auto-selected handler.
    pub fn browse(&self, dir: Option<&Path>) -> Result<Vec<BrowseEntry>> {
        let dir = dir
            .or(self.config.browse_dir.as_deref())
            .ok_or(AppError::MissingBrowseDir)?;
        let filter = self.config.filter()?;
        let registry = self.registry()?;
        Ok(filter
            .list(dir)?
            .into_iter()
            .map(|path| BrowseEntry {
                handler: registry.auto_select(&path).to_string(),
                path,
            })
            .collect())
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(BrowserConfig::default())
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AppContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
