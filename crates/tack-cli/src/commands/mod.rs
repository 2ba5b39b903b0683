//! Command implementations for the tack CLI.
//!
//! - [`run`] - plan and run tasks
//! - [`list`] - print the task set
//!
//! Each command provides an `execute` function returning [`crate::Result`].

pub mod list;
pub mod run;
pub(crate) mod utils;

pub use list::execute as list_execute;
pub use run::execute as run_execute;
