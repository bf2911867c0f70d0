use crate::extract::ExtractError;
use crate::formats::FormatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowseError>;

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("unknown handler: {0}")]
    UnknownHandler(String),

    #[error("a handler named `{0}` is already registered")]
    DuplicateHandler(String),

    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Extract(#[from] ExtractError),

    #[error("handler `{handler}` panicked: {message}")]
    Panicked { handler: String, message: String },
}
