pub mod browser;
pub mod cache;
pub mod cli;
pub mod config;
pub mod extract;
pub mod formats;
pub mod model;
pub mod reduce;
pub mod runtime;

#[cfg(test)]
mod test_support;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
