use std::env;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use tracing::warn;

mod cli;
mod config;
mod exits;
mod logging;
mod pass;
mod settings;
mod terminal;
mod tui;

use cli::{CliError, CliFlags, prompts};
use config::Config;

fn main() -> ExitCode {
    exits::install_handlers();
    exits::disable_core_dumps();

    let dir = config::storage_dir();
    let (config, config_error) = match Config::read(&dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // No arguments opens the form; anything else is a command-line run.
    let flags = if env::args_os().len() <= 1 {
        None
    } else {
        match CliFlags::try_parse() {
            Ok(flags) => Some(flags).filter(|f| !f.interactive),
            Err(e) => e.exit(),
        }
    };

    match &flags {
        None => logging::init_file(&dir, config.log_file),
        Some(flags) => logging::init_stderr(flags.quiet),
    }
    if let Some(e) = config_error {
        warn!("{e}; using default configuration");
    }

    let result = match flags {
        None => interactive(&dir, &config),
        Some(flags) => cli::run(flags, &dir, &config),
    };

    match result {
        Ok(()) => exits::code(exits::OK),
        Err(err) => {
            prompts::error(&format!("{err:#}"));
            if err.downcast_ref::<CliError>().is_some() {
                exits::code(exits::INVALID_INPUT)
            } else {
                exits::code(exits::FAILURE)
            }
        }
    }
}

fn interactive(dir: &Path, config: &Config) -> anyhow::Result<()> {
    tui::run(dir, config).context("interactive session failed")
}
