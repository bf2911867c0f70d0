use std::path::PathBuf;

use crate::formats::FormatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot read metadata: {0}")]
    Format(#[from] FormatError),

    #[error("EMD container {} holds no data groups", .path.display())]
    EmptyContainer { path: PathBuf },
}
