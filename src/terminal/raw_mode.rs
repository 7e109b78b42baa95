//! RAII guards for raw mode and the alternate screen.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while a [`ScreenGuard`] owns the terminal, so exit handlers know
/// whether there is an alternate screen to leave.
static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

pub const ENTER_SCREEN: &[u8] = b"\x1b[?1049h\x1b[?25l";
pub const LEAVE_SCREEN: &[u8] = b"\x1b[0m\x1b[?25h\x1b[?1049l";

/// Guard that ensures raw mode is disabled when dropped.
pub struct RawModeGuard {
    was_enabled: bool,
}

impl RawModeGuard {
    /// Enable raw mode, returning a guard that will disable it on drop.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { was_enabled: true })
    }

    /// Manually disable raw mode (also happens on drop).
    pub fn disable(&mut self) {
        if self.was_enabled {
            let _ = disable_raw_mode();
            self.was_enabled = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.disable();
    }
}

/// Full-screen session: alternate screen, hidden cursor and raw mode,
/// all restored on drop in reverse order.
pub struct ScreenGuard {
    raw: RawModeGuard,
}

impl ScreenGuard {
    pub fn enter() -> io::Result<Self> {
        let raw = RawModeGuard::new()?;
        let mut out = io::stdout();
        out.write_all(ENTER_SCREEN)?;
        out.flush()?;
        SCREEN_ACTIVE.store(true, Ordering::SeqCst);
        Ok(Self { raw })
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = out.write_all(LEAVE_SCREEN);
        let _ = out.flush();
        SCREEN_ACTIVE.store(false, Ordering::SeqCst);
        self.raw.disable();
    }
}

/// Whether the alternate screen is currently shown.
pub fn screen_active() -> bool {
    SCREEN_ACTIVE.load(Ordering::SeqCst)
}
