//! Centralized warning and status messages for CLI output.

use super::quiet;
use crate::terminal::{RED, RESET, YELLOW};

/// Print a warning message to stderr (yellow) - suppressed in quiet mode
pub fn warn(msg: &str) {
    if !quiet::enabled() {
        eprintln!("{YELLOW}{msg}{RESET}");
    }
}

/// Print an error message to stderr (red) - NOT suppressed (errors are always shown)
pub fn error(msg: &str) {
    eprintln!("{RED}{msg}{RESET}");
}

/// Print clipboard copied confirmation - suppressed in quiet mode
pub fn clipboard_copied(count: usize) {
    if quiet::enabled() {
        return;
    }
    if count == 1 {
        eprintln!("*** -COPIED TO CLIPBOARD- ***");
    } else {
        eprintln!("*** -{count} PASSWORDS COPIED TO CLIPBOARD- ***");
    }
}

pub fn clipboard_fallback() {
    warn("Clipboard unavailable, printing to terminal instead.");
}

/// Entropy estimate goes to stderr even in quiet mode; it was asked for.
pub fn entropy(summary: &str, charset_size: usize) {
    eprintln!("Entropy: {summary} \u{2022} {charset_size} chars");
}

pub fn settings_saved(path: &str) {
    if !quiet::enabled() {
        eprintln!("Settings saved \u{2192} {path}");
    }
}
