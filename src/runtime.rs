mod context;
mod error;
mod listing;

#[cfg(test)]
mod tests;

pub use context::AppContext;
pub use error::{AppError, Result};
pub use listing::BrowseEntry;
