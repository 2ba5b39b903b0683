//! Terminal status lines for the tack CLI.
//!
//! Everything here writes to stderr. Colors follow `--no-color`, `NO_COLOR`,
//! `FORCE_COLOR` and whether stderr is a terminal; `--quiet` silences all but
//! warnings and errors.
//!
//! ```no_run
//! use tack_cli::ui;
//!
//! ui::init(false, false);
//! ui::info("Bundling src/main.js");
//! ui::success("Bundled in 42ms");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, format_size, print_bundle_summary};
pub use messages::{debug, error, info, success, warning};

static COLOR: AtomicBool = AtomicBool::new(true);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Decide color and quiet mode once, early in `main`.
pub fn init(no_color: bool, quiet: bool) {
    COLOR.store(!no_color && should_use_color(), Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Whether colors are supported by the environment.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise stderr must be a terminal.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

pub(crate) fn color_enabled() -> bool {
    COLOR.load(Ordering::Relaxed)
}

pub(crate) fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}
