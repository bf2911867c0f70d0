use clap::Parser;
use env_logger::{Builder, Env};
use serde::Serialize;

use crate::browser::MessageLog;
use crate::config::{BrowserConfig, load_config};
use crate::runtime::AppContext;

use super::types::{Cli, Commands, HandlerInfo, ViewReport};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(level)).init();

    let mut config = match &cli.config {
        Some(path) => load_config(path).map_err(|error| error.to_string())?,
        None => BrowserConfig::default(),
    };
    if cli.auto_select {
        config.auto_select = true;
    }
    let mut app = AppContext::new(config);

    match cli.command {
        Commands::Info { input } => {
            let record = app
                .metadata_service()
                .record_for(&input)
                .map_err(|error| error.to_string())?;
            print_json(&*record)?;
        }
        Commands::View { input, handler } => {
            match handler {
                Some(name) => {
                    app.config_mut().auto_select = false;
                    app.config_mut().initial_handler = Some(name);
                }
                None => app.config_mut().auto_select = true,
            }
            let mut browser = app
                .browser(MessageLog::default())
                .map_err(|error| error.to_string())?;
            let outcome = browser.select_file(&input);
            let report = ViewReport {
                file: input,
                handler: browser.registry().active_name().map(str::to_string),
                view: browser.active_view().map(|view| view.summary()),
                messages: browser.reporter().messages().to_vec(),
            };
            print_json(&report)?;
            outcome.map_err(|error| error.to_string())?;
        }
        Commands::Browse { dir, filter } => {
            if let Some(filter) = filter {
                app.config_mut().file_filter = filter;
            }
            let entries = app
                .browse(dir.as_deref())
                .map_err(|error| error.to_string())?;
            print_json(&entries)?;
        }
        Commands::Handlers => {
            let registry = app.registry().map_err(|error| error.to_string())?;
            let handlers = registry
                .names()
                .into_iter()
                .map(|name| HandlerInfo {
                    name: name.to_string(),
                    fallback: name == registry.fallback(),
                })
                .collect::<Vec<_>>();
            print_json(&handlers)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(|error| error.to_string())?
    );
    Ok(())
}
