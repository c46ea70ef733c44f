//! Supporting helpers for console diagnostics.
//!
//! Diagnostics (missing files, skipped inputs, usage problems) go to
//! stderr with a colored prefix and never into the issue stream.

use owo_colors::OwoColorize;

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for fatal problems reported on stderr.
pub fn error_prefix() -> String {
    if use_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Prefix for skipped-but-continuing conditions.
pub fn note_prefix() -> String {
    if use_colors() {
        "note:".yellow().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Prefix for informational messages.
pub fn info_prefix() -> String {
    if use_colors() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}
