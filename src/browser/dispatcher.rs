use std::fmt;
use std::path::{Path, PathBuf};

use super::{BrowseError, HandlerRegistry, LogReporter, Result, StatusReporter, View};

/// Routes file selections to handlers.
///
/// With auto-selection off every selection reloads the active handler.
/// With it on, the handler is resolved from the file first and switched
/// when it differs from the active one.
pub struct Browser<R: StatusReporter = LogReporter> {
    registry: HandlerRegistry,
    reporter: R,
    auto_select: bool,
    current_file: Option<PathBuf>,
}

impl<R: StatusReporter> Browser<R> {
    pub fn new(registry: HandlerRegistry, reporter: R) -> Self {
        Self {
            registry,
            reporter,
            auto_select: false,
            current_file: None,
        }
    }

    pub fn with_auto_select(mut self, enabled: bool) -> Self {
        self.auto_select = enabled;
        self
    }

    pub fn set_auto_select(&mut self, enabled: bool) {
        self.auto_select = enabled;
    }

    pub fn auto_select(&self) -> bool {
        self.auto_select
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn active_view(&self) -> Option<&View> {
        self.registry.active().map(|slot| slot.view())
    }

    /// Makes `name` the active handler and reloads the current file on it
    /// when that file exists.
    pub fn select_handler(&mut self, name: &str) -> Result<()> {
        let index = self
            .registry
            .position(name)
            .ok_or_else(|| BrowseError::UnknownHandler(name.to_string()))?;
        log::debug!(
            "switching handler {:?} -> {name}",
            self.registry.active_name()
        );
        let slot = self.registry.activate(index);
        match &self.current_file {
            Some(path) if path.is_file() => slot.load(path, &mut self.reporter),
            _ => Ok(()),
        }
    }

    pub fn select_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.current_file = Some(path.clone());

        if !self.auto_select {
            if self.registry.active().is_none() {
                let fallback = self.registry.fallback().to_string();
                let index = self
                    .registry
                    .position(&fallback)
                    .ok_or(BrowseError::UnknownHandler(fallback))?;
                self.registry.activate(index);
            }
            return self.reload();
        }

        let resolved = self.registry.auto_select(&path).to_string();
        if self.registry.active_name() != Some(resolved.as_str()) {
            return self.select_handler(&resolved);
        }
        if path.is_file() {
            self.reload()
        } else {
            Ok(())
        }
    }

    /// Loads the current file again on the active handler.
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = self.current_file.clone() else {
            return Ok(());
        };
        match self.registry.active_mut() {
            Some(slot) => slot.load(&path, &mut self.reporter),
            None => Ok(()),
        }
    }
}

impl<R: StatusReporter> fmt::Debug for Browser<R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Browser")
            .field("handlers", &self.registry.names())
            .field("active", &self.registry.active_name())
            .field("auto_select", &self.auto_select)
            .field("current_file", &self.current_file)
            .finish_non_exhaustive()
    }
}
