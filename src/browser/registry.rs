use std::path::Path;

use super::{BrowseError, Handler, Result, StatusReporter, View, contain};

/// A registered handler together with the view it owns.
pub struct HandlerSlot {
    pub(crate) handler: Box<dyn Handler>,
    pub(crate) view: View,
    visible: bool,
}

impl HandlerSlot {
    fn new(handler: Box<dyn Handler>) -> Self {
        Self {
            handler,
            view: View::Blank,
            visible: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.handler.name()
    }

    pub fn supports(&self, path: &Path) -> bool {
        self.handler.supports(path)
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn show(&mut self) {
        self.visible = true;
    }

    pub(crate) fn hide(&mut self) {
        self.visible = false;
    }

    pub(crate) fn load(&mut self, path: &Path, reporter: &mut dyn StatusReporter) -> Result<()> {
        log::debug!("{} loading {}", self.name(), path.display());
        contain(self, path, reporter)
    }
}

/// Handlers in registration order plus the active one.
pub struct HandlerRegistry {
    slots: Vec<HandlerSlot>,
    active: Option<usize>,
    fallback: String,
}

impl HandlerRegistry {
    /// `fallback` names the handler chosen when no other supports a file.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            slots: Vec::new(),
            active: None,
            fallback: fallback.into(),
        }
    }

    pub fn register(&mut self, handler: Box<dyn Handler>) -> Result<()> {
        let name = handler.name();
        if self.position(name).is_some() {
            return Err(BrowseError::DuplicateHandler(name.to_string()));
        }
        self.slots.push(HandlerSlot::new(handler));
        Ok(())
    }

    /// Fails when the fallback names no registered handler.
    pub fn validate(&self) -> Result<()> {
        match self.position(&self.fallback) {
            Some(_) => Ok(()),
            None => Err(BrowseError::UnknownHandler(self.fallback.clone())),
        }
    }

    /// Last registered handler supporting `path`, else the fallback name.
    pub fn auto_select(&self, path: &Path) -> &str {
        self.slots
            .iter()
            .rev()
            .find(|slot| slot.supports(path))
            .map(HandlerSlot::name)
            .unwrap_or(self.fallback.as_str())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.slots.iter().map(HandlerSlot::name).collect()
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn slot(&self, name: &str) -> Option<&HandlerSlot> {
        self.position(name).and_then(|index| self.slots.get(index))
    }

    pub fn active(&self) -> Option<&HandlerSlot> {
        self.active.and_then(|index| self.slots.get(index))
    }

    pub fn active_name(&self) -> Option<&'static str> {
        self.active().map(HandlerSlot::name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.name() == name)
    }

    /// Hides the previous handler, shows `index` and returns the new slot.
    pub(crate) fn activate(&mut self, index: usize) -> &mut HandlerSlot {
        if let Some(previous) = self.active {
            self.slots[previous].hide();
        }
        self.active = Some(index);
        let slot = &mut self.slots[index];
        slot.show();
        slot
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut HandlerSlot> {
        let index = self.active?;
        self.slots.get_mut(index)
    }
}
