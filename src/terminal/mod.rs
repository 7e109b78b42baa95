//! Shared terminal utilities.
//!
//! Box drawing, raw mode management, ANSI helpers and entropy estimates.

mod output;
mod raw_mode;

pub use output::*;
pub use raw_mode::*;
