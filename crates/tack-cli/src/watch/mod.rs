//! The watch task's moving parts.
//!
//! - [`patterns`]: which changed paths qualify for a rebuild
//! - [`watcher`]: notify-backed recursive watch, forwarded into a tokio channel
//! - [`session`]: the Idle/Building rebuild loop over that channel

pub mod patterns;
pub mod session;
pub mod watcher;

pub use patterns::WatchPatterns;
pub use session::{Rebuild, WatchSession, WatchSummary};
pub use watcher::{FileChange, FileWatcher};
