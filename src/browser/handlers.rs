mod metadata;
mod raster;
mod tem;

use std::sync::Arc;

use crate::formats::FormatLibrary;

use super::Handler;

pub use metadata::{METADATA_VIEWER, MetadataHandler};
pub use raster::{IMAGE_VIEWER, RasterHandler};
pub use tem::{TEM_DATA_VIEWER, TemDataHandler};

/// The shipped handlers in registration order. Later entries win
/// auto-selection.
pub fn standard_handlers(
    library: Arc<dyn FormatLibrary>,
    cache_capacity: usize,
) -> Vec<Box<dyn Handler>> {
    vec![
        Box::new(MetadataHandler::new(Arc::clone(&library), cache_capacity)),
        Box::new(RasterHandler),
        Box::new(TemDataHandler::new(library)),
    ]
}
