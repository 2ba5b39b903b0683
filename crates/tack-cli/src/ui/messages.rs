//! Status message functions for terminal output.

use std::fmt::Display;

use owo_colors::OwoColorize;

use super::{color_enabled, quiet};

/// Print a success message to stderr.
pub fn success(message: &str) {
    if quiet() {
        return;
    }
    if color_enabled() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        plain("✓", message);
    }
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if quiet() {
        return;
    }
    if color_enabled() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        plain("ℹ", message);
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if color_enabled() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        plain("⚠", message);
    }
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    if color_enabled() {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    } else {
        plain("✗", message);
    }
}

/// Print a debug message to stderr (only if RUST_LOG is set).
pub fn debug(message: &str) {
    if std::env::var_os("RUST_LOG").is_none() || quiet() {
        return;
    }
    if color_enabled() {
        eprintln!("{} {}", "◆".dimmed(), message.dimmed());
    } else {
        plain("◆", message);
    }
}

fn plain(symbol: impl Display, message: &str) {
    eprintln!("{} {}", symbol, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        success("Success message");
        info("Info message");
        warning("Warning message");
        error("Error message");
        debug("Debug message");
    }
}
