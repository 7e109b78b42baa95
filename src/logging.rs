//! Tracing setup for both run modes.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::ensure_dir;

pub const LOG_ENV: &str = "PWGEN_LOG";
const DEFAULT_FILTER: &str = "pwgen=warn";
const QUIET_FILTER: &str = "pwgen=error";
const LOG_FILE: &str = "pwgen.log";

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Directive used for command-line runs when `PWGEN_LOG` is unset.
fn stderr_default(quiet: bool) -> &'static str {
    if quiet { QUIET_FILTER } else { DEFAULT_FILTER }
}

/// Command-line mode logs to stderr so stdout carries only passwords.
/// Quiet runs only show errors.
pub fn init_stderr(quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(stderr_default(quiet)))
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Interactive mode appends to `pwgen.log` in `dir`. With the file disabled
/// or unopenable no subscriber is installed and events are dropped.
pub fn init_file(dir: &Path, enabled: bool) {
    if !enabled {
        return;
    }
    let Ok(file) = open_log(dir) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(DEFAULT_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

pub fn log_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE)
}

fn open_log(dir: &Path) -> io::Result<File> {
    ensure_dir(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_runs_only_log_errors() {
        assert_eq!(stderr_default(true), "pwgen=error");
        assert_eq!(stderr_default(false), "pwgen=warn");
    }

    #[test]
    fn log_file_is_created_in_the_storage_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sub");
        open_log(&nested).unwrap();
        assert!(log_path(&nested).is_file());
    }
}
