//! Recursive filesystem watch with per-path debouncing.
//!
//! notify calls back on its own thread; the callback only forwards raw
//! [`FileChange`]s into a bounded tokio channel. A forwarding task debounces
//! them on the trailing edge: a path is passed on once it has been quiet for
//! the debounce window, carrying its latest change. Filtering against the
//! watch patterns happens on the receiving side.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::error::{CliError, Result};

const CHANNEL_CAPACITY: usize = 256;

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// A live recursive watch on the project root.
///
/// The watch is released when this value is dropped; pending changes are
/// then flushed and the change channel closes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl std::fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWatcher")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl FileWatcher {
    /// Start watching `root` recursively.
    ///
    /// A burst of events for one path is forwarded once, after `debounce` has
    /// passed without another event for it. Must be called inside a tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// [`CliError::FileNotFound`] when `root` is not a directory, and
    /// [`CliError::Watch`] when notify cannot set up the watch.
    pub fn new(root: &Path, debounce: Duration) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.is_dir() {
            return Err(CliError::FileNotFound(root.to_path_buf()));
        }

        let (raw_tx, raw_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "file watch error");
                    return;
                }
            };

            for change in changes_from(&event) {
                tracing::trace!(?change, "raw file event");
                // Receiver gone means the watch is over
                if raw_tx.blocking_send(change).is_err() {
                    return;
                }
            }
        })?;

        watcher.watch(root, RecursiveMode::Recursive)?;
        tokio::spawn(debounce_changes(raw_rx, tx, debounce));
        tracing::debug!(root = %root.display(), "file watcher started");

        Ok((
            Self {
                _watcher: watcher,
                root: root.to_path_buf(),
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn changes_from(event: &Event) -> Vec<FileChange> {
    let make: fn(PathBuf) -> FileChange = match event.kind {
        EventKind::Create(_) => FileChange::Created,
        EventKind::Modify(_) => FileChange::Modified,
        EventKind::Remove(_) => FileChange::Removed,
        _ => return Vec::new(),
    };
    event.paths.iter().cloned().map(make).collect()
}

/// Forward `raw` changes to `out`, one per path per quiet `window`.
///
/// Runs until `raw` closes, then flushes whatever is still pending.
async fn debounce_changes(
    mut raw: mpsc::Receiver<FileChange>,
    out: mpsc::Sender<FileChange>,
    window: Duration,
) {
    let mut pending = Pending::new(window);

    loop {
        let deadline = pending.next_deadline();
        tokio::select! {
            change = raw.recv() => match change {
                Some(change) => pending.push(change, Instant::now()),
                None => break,
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                for change in pending.take_due(Instant::now()) {
                    tracing::debug!(?change, "file change");
                    if out.send(change).await.is_err() {
                        return;
                    }
                }
            }
        }
    }

    for change in pending.take_all() {
        if out.send(change).await.is_err() {
            return;
        }
    }
}

/// Latest change per path, each with the instant it may be forwarded.
#[derive(Debug)]
struct Pending {
    window: Duration,
    changes: HashMap<PathBuf, (FileChange, Instant)>,
}

impl Pending {
    fn new(window: Duration) -> Self {
        Self {
            window,
            changes: HashMap::new(),
        }
    }

    /// Record `change`, replacing any earlier one for its path and
    /// restarting that path's quiet window.
    fn push(&mut self, change: FileChange, now: Instant) {
        let due = now + self.window;
        self.changes
            .insert(change.path().to_path_buf(), (change, due));
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.changes.values().map(|(_, due)| *due).min()
    }

    /// Remove and return changes whose window has passed, oldest first.
    fn take_due(&mut self, now: Instant) -> Vec<FileChange> {
        let mut due: Vec<(Instant, PathBuf)> = self
            .changes
            .iter()
            .filter(|(_, (_, at))| *at <= now)
            .map(|(path, (_, at))| (*at, path.clone()))
            .collect();
        due.sort();

        due.into_iter()
            .filter_map(|(_, path)| self.changes.remove(&path).map(|(change, _)| change))
            .collect()
    }

    fn take_all(&mut self) -> Vec<FileChange> {
        let mut all: Vec<(FileChange, Instant)> = self.changes.drain().map(|(_, v)| v).collect();
        all.sort_by_key(|(_, due)| *due);
        all.into_iter().map(|(change, _)| change).collect()
    }
}
