//! The rebuild loop behind the `watch` task.
//!
//! A session is `Idle` while it waits for changes and `Building` while a run
//! is in flight. Runs never overlap: the loop awaits each one before looking
//! at the channel again, and whatever queued up meanwhile is settled by the
//! [`OverlapPolicy`].

use std::future::Future;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tack_bundler::WrittenBundle;
use tack_config::OverlapPolicy;
use tokio::sync::mpsc;

use super::patterns::WatchPatterns;
use super::watcher::FileChange;
use crate::error::Result;
use crate::ui;

/// One bundle run, as seen by the watch loop.
///
/// Runs are awaited in place, never spawned, so the future need not be `Send`.
#[async_trait(?Send)]
pub trait Rebuild {
    async fn rebuild(&mut self) -> tack_bundler::Result<WrittenBundle>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Building,
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Completed runs, successful or not
    pub runs: usize,
    /// Runs that ended in a recoverable error
    pub failures: usize,
    /// Changes that shared a run with another change
    pub coalesced: usize,
    /// Changes discarded because a run was in flight
    pub dropped: usize,
    /// Changes that did not match the watch patterns
    pub ignored: usize,
}

pub struct WatchSession<B> {
    builder: B,
    root: PathBuf,
    patterns: WatchPatterns,
    overlap: OverlapPolicy,
    state: SessionState,
    summary: WatchSummary,
}

impl<B: Rebuild> WatchSession<B> {
    pub fn new(
        builder: B,
        root: impl Into<PathBuf>,
        patterns: WatchPatterns,
        overlap: OverlapPolicy,
    ) -> Self {
        Self {
            builder,
            root: root.into(),
            patterns,
            overlap,
            state: SessionState::Idle,
            summary: WatchSummary::default(),
        }
    }

    /// Consume changes until `shutdown` resolves or the channel closes.
    ///
    /// Recoverable bundle failures are reported and the loop goes on; any
    /// other error ends the session and is returned.
    pub async fn run<S>(
        mut self,
        mut changes: mpsc::Receiver<FileChange>,
        shutdown: S,
    ) -> Result<WatchSummary>
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let change = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("watch interrupted");
                    break;
                }
                change = changes.recv() => match change {
                    Some(change) => change,
                    None => {
                        tracing::debug!("change stream closed");
                        break;
                    }
                },
            };

            if !self.qualifies(&change) {
                self.summary.ignored += 1;
                continue;
            }

            ui::info(&format!("Changed: {}", self.display(change.path())));
            // Changes already buffered share this run
            let buffered = self.drain(&mut changes);
            self.summary.coalesced += buffered;
            self.build().await?;
            self.settle(&mut changes).await?;
        }

        tracing::debug!(summary = ?self.summary, "watch session ended");
        Ok(self.summary)
    }

    /// Apply the overlap policy to changes that arrived during a run.
    async fn settle(&mut self, changes: &mut mpsc::Receiver<FileChange>) -> Result<()> {
        loop {
            let pending = self.drain(changes);
            if pending == 0 {
                return Ok(());
            }

            match self.overlap {
                OverlapPolicy::Queue => {
                    tracing::debug!(pending, "changes during build, running once more");
                    self.summary.coalesced += pending - 1;
                    self.build().await?;
                }
                OverlapPolicy::Drop => {
                    tracing::debug!(pending, "changes during build dropped");
                    self.summary.dropped += pending;
                    return Ok(());
                }
            }
        }
    }

    /// Count qualifying changes already buffered in the channel.
    fn drain(&mut self, changes: &mut mpsc::Receiver<FileChange>) -> usize {
        let mut pending = 0;
        while let Ok(change) = changes.try_recv() {
            if self.qualifies(&change) {
                pending += 1;
            } else {
                self.summary.ignored += 1;
            }
        }
        pending
    }

    async fn build(&mut self) -> Result<()> {
        self.enter(SessionState::Building);
        let result = self.builder.rebuild().await;
        self.enter(SessionState::Idle);
        self.summary.runs += 1;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.is_recoverable() => {
                self.summary.failures += 1;
                tracing::warn!(error = %e, "rebuild failed, still watching");
                for line in failure_report(&e) {
                    ui::error(&line);
                }
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn enter(&mut self, state: SessionState) {
        tracing::trace!(from = ?self.state, to = ?state, "watch session state");
        self.state = state;
    }

    fn qualifies(&self, change: &FileChange) -> bool {
        self.patterns.matches_path(&self.root, change.path())
    }

    fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Status lines for a failed run, one per bundler diagnostic.
fn failure_report(error: &tack_bundler::Error) -> Vec<String> {
    match error.diagnostics() {
        [] => vec![format!("Rebuild failed: {error}")],
        diagnostics => std::iter::once(format!(
            "Rebuild failed with {} error(s)",
            diagnostics.len()
        ))
        .chain(diagnostics.iter().map(|diag| format!("  {diag}")))
        .collect(),
    }
}
