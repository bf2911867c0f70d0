use crate::browser::BrowseError;
use crate::config::ConfigError;
use crate::extract::ExtractError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("browser error: {0}")]
    Browse(#[from] BrowseError),

    #[error("metadata error: {0}")]
    Extract(#[from] ExtractError),

    #[error("no directory to browse: pass one or set `browse_dir`")]
    MissingBrowseDir,
}
