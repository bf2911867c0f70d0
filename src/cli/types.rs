use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::browser::ViewSummary;

#[derive(Debug, Parser)]
#[command(
    name = "temview",
    version,
    about = "Browse electron-microscopy files with normalized calibration metadata"
)]
pub(super) struct Cli {
    /// JSON or YAML browser configuration.
    #[arg(long, global = true)]
    pub(super) config: Option<PathBuf>,
    /// Choose the handler from each file.
    #[arg(long, global = true)]
    pub(super) auto_select: bool,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    pub(super) verbose: bool,
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Prints the canonical metadata record of a file as JSON.
    Info { input: PathBuf },
    /// Loads a file and prints a summary of the resulting view.
    /// Without --handler the handler is chosen from the file.
    View {
        input: PathBuf,
        #[arg(long)]
        handler: Option<String>,
    },
    /// Lists the files of a directory with the handler each opens in.
    Browse {
        dir: Option<PathBuf>,
        /// Comma-separated wildcard patterns, e.g. "*.dm3,*.mrc".
        #[arg(long)]
        filter: Option<String>,
    },
    /// Lists the handlers in registration order.
    Handlers,
}

#[derive(Debug, Serialize)]
pub(super) struct ViewReport {
    pub(super) file: PathBuf,
    pub(super) handler: Option<String>,
    pub(super) view: Option<ViewSummary>,
    pub(super) messages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct HandlerInfo {
    pub(super) name: String,
    pub(super) fallback: bool,
}
