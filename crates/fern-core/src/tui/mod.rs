//! Command front-end using cliclack (Charm-style inline output)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod commands;

#[cfg(feature = "tui")]
pub use commands::{create, run_program, CreateArgs, RunArgs};

/// Restore the terminal cursor hidden by an interrupted spinner
#[cfg(feature = "tui")]
pub fn restore_cursor() {
    let _ = console::Term::stderr().show_cursor();
}
