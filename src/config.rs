mod error;
mod filter;
mod io;
mod settings;


pub use error::{ConfigError, Result};
pub use filter::{DEFAULT_FILE_FILTER, FileFilter};
pub use io::{load_config, save_config};
pub use settings::BrowserConfig;
