mod containment;
mod dispatcher;
mod error;
mod handler;
mod handlers;
mod registry;
mod report;
mod view;


pub(crate) use containment::contain;
pub use dispatcher::Browser;
pub use error::{BrowseError, Result};
pub use handler::{Handler, LoadOutcome};
pub use handlers::{
    IMAGE_VIEWER, METADATA_VIEWER, MetadataHandler, RasterHandler, TEM_DATA_VIEWER,
    TemDataHandler, standard_handlers,
};
pub use registry::{HandlerRegistry, HandlerSlot};
pub use report::{LogReporter, MessageLog, StatusReporter};
pub use view::{ImageView, MetadataView, View, ViewSummary};
