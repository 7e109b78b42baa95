//! Exit handling: signal handlers, terminal cleanup and exit codes.

use std::process::ExitCode;

use crate::terminal;

/// Successful run.
pub const OK: u8 = 0;
/// I/O or clipboard failure that aborted the run.
pub const FAILURE: u8 = 1;
/// Rejected length, empty selection or a usage error.
pub const INVALID_INPUT: u8 = 2;
/// Terminated by SIGINT, SIGTERM or SIGHUP.
pub const SIGNALED: i32 = 130;

pub fn code(status: u8) -> ExitCode {
    ExitCode::from(status)
}

/// Reset terminal to sane state using termios directly
fn reset_terminal_termios() {
    unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(0, &mut termios) == 0 {
            termios.c_oflag |= libc::OPOST | libc::ONLCR;
            termios.c_lflag |= libc::ICANON | libc::ECHO | libc::ISIG;
            libc::tcsetattr(0, libc::TCSANOW, &termios);
        }
    }
}

/// Registered with atexit. Leaves the alternate screen only if the
/// interactive form still owns it.
extern "C" fn cleanup_on_exit() {
    if !terminal::screen_active() {
        return;
    }
    reset_terminal_termios();
    let seq = terminal::LEAVE_SCREEN;
    unsafe {
        libc::write(1, seq.as_ptr() as *const libc::c_void, seq.len());
    }
}

/// SIGINT/SIGTERM/SIGHUP: exit, atexit handles cleanup.
extern "C" fn signal_handler(_: libc::c_int) {
    unsafe { libc::exit(SIGNALED) }
}

/// SIGSEGV/SIGABRT: restore the terminal, then re-raise for the default action.
extern "C" fn crash_handler(sig: libc::c_int) {
    cleanup_on_exit();
    unsafe {
        libc::signal(sig, libc::SIG_DFL);
        libc::raise(sig);
    }
}

/// Install all signal handlers and register atexit cleanup.
/// Call this early in main().
pub fn install_handlers() {
    unsafe {
        libc::atexit(cleanup_on_exit);
        for sig in [libc::SIGINT, libc::SIGTERM, libc::SIGHUP] {
            libc::signal(sig, signal_handler as *const () as libc::sighandler_t);
        }
        for sig in [libc::SIGSEGV, libc::SIGABRT] {
            libc::signal(sig, crash_handler as *const () as libc::sighandler_t);
        }
    }
}

/// Keep generated passwords out of core dumps.
pub fn disable_core_dumps() {
    #[cfg(target_os = "linux")]
    unsafe {
        libc::prctl(libc::PR_SET_DUMPABLE, 0);
    }
}
