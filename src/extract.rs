mod companion;
mod container;
mod error;
mod extractor;
mod fixed_header;
mod service;
mod sidecar;
mod stream;
mod tag_tree;


pub use companion::{CompanionExtractor, companion_record};
pub use container::{ContainerExtractor, container_record, decode_velox_metadata};
pub use error::{ExtractError, Result};
pub use extractor::{ExtractorId, MetadataExtractor, NOISY_KEYS, is_noisy, standard_extractors};
pub use fixed_header::{FixedHeaderExtractor, fixed_header_record};
pub use service::MetadataService;
pub use sidecar::{Sidecars, parse_parameter_listing, parse_tilt_angles};
pub use stream::{StreamExtractor, stream_record};
pub use tag_tree::{TagTreeExtractor, tag_tree_record};
