use std::path::Path;
use std::sync::Arc;

use crate::browser::{Handler, LoadOutcome, MetadataView, Result, View};
use crate::extract::MetadataService;
use crate::formats::{FormatLibrary, has_extension};

pub const METADATA_VIEWER: &str = "TEM metadata viewer";

const EXTENSIONS: &[&str] = &["dm3", "dm4", "mrc", "ali", "rec", "ser", "emi"];

/// Shows the canonical metadata record of a file as text.
#[derive(Debug)]
pub struct MetadataHandler {
    service: MetadataService,
}

impl MetadataHandler {
    pub fn new(library: Arc<dyn FormatLibrary>, cache_capacity: usize) -> Self {
        Self::with_service(MetadataService::new(library, cache_capacity))
    }

    pub fn with_service(service: MetadataService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &MetadataService {
        &self.service
    }
}

impl Handler for MetadataHandler {
    fn name(&self) -> &'static str {
        METADATA_VIEWER
    }

    fn supports(&self, path: &Path) -> bool {
        has_extension(path, EXTENSIONS)
    }

    fn load(&mut self, path: &Path) -> Result<LoadOutcome> {
        let record = self.service.record_for(path)?;
        Ok(LoadOutcome::Rendered(View::Metadata(MetadataView {
            path: path.to_path_buf(),
            record,
        })))
    }
}
