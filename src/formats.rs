mod api;
mod error;
mod library;
mod mrc;
mod native;
mod raster;
mod tiff;
mod util;


pub use api::{read_raster, supported_extensions};
pub use error::{FormatError, Result};
pub use library::{
    EmdContainer, EmdDataset, EmdDimension, FixedHeader, FormatLibrary, HeaderField,
    STEMTOMO_VERSION_ATTR, StreamHeader, TagTree, VeloxDataGroup,
};
pub use native::NativeLibrary;
pub use util::{FileKind, extension, has_extension, sidecar_path};
