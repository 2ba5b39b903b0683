//! Running planned tasks against a loaded configuration.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tack_bundler::WrittenBundle;
use tack_config::{ConfigDiscovery, TackConfig, validate_fs, validate_schema};

use super::{TaskName, plan};
use crate::error::{Result, ResultExt};
use crate::ui;
use crate::watch::{FileWatcher, Rebuild, WatchPatterns, WatchSession};

/// Everything a task needs: the project root and the validated configuration.
///
/// Built once per invocation and never mutated.
#[derive(Debug, Clone)]
pub struct TaskContext {
    /// Canonical project root
    pub root: PathBuf,
    pub config: TackConfig,
    /// The configuration file that was loaded, if any
    pub config_file: Option<PathBuf>,
}

impl TaskContext {
    /// Load `tack.toml` (or `config_file`) for the project at `root`.
    pub fn load(root: &Path, config_file: Option<&Path>) -> Result<Self> {
        let root = root.canonicalize().with_path(root)?;

        let mut discovery = ConfigDiscovery::new(&root);
        if let Some(file) = config_file {
            discovery = discovery.with_file(file);
        }

        let config = discovery.load()?;
        validate_schema(&config)?;

        let config_file = discovery.find();
        match &config_file {
            Some(path) => tracing::debug!(path = %path.display(), "loaded configuration"),
            None => tracing::debug!("no tack.toml, using defaults"),
        }

        Ok(Self {
            root,
            config,
            config_file,
        })
    }

    pub fn new(root: impl Into<PathBuf>, config: TackConfig) -> Self {
        Self {
            root: root.into(),
            config,
            config_file: None,
        }
    }
}

/// Plan `requested` and run each task in order.
///
/// A recoverable bundle failure does not stop a plan that goes on to `watch`:
/// the watch gives the user a chance to fix the source. Any other failure
/// stops the plan.
pub async fn run_tasks(ctx: &TaskContext, requested: &[TaskName]) -> Result<()> {
    let planned = plan(requested);
    tracing::debug!(tasks = ?planned, "planned tasks");

    for (index, &task) in planned.iter().enumerate() {
        let start = Instant::now();
        tracing::info!(%task, "starting task");

        match run_task(ctx, task).await {
            Ok(()) => {
                tracing::info!(
                    %task,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "finished task"
                );
            }
            Err(e) if e.is_recoverable() && planned[index + 1..].contains(&TaskName::Watch) => {
                ui::error(&format!("{task} failed: {e}"));
                ui::warning("Starting watch anyway; save a fix to rebuild");
            }
            Err(e) => {
                tracing::debug!(%task, error = %e, "task failed");
                return Err(e);
            }
        }
    }

    Ok(())
}

async fn run_task(ctx: &TaskContext, task: TaskName) -> Result<()> {
    match task {
        TaskName::Bundle => {
            validate_fs(&ctx.config, &ctx.root)?;
            bundle(ctx).await?;
            Ok(())
        }
        TaskName::Watch => watch(ctx).await,
    }
}

/// One bundle run with a summary of what was written.
async fn bundle(ctx: &TaskContext) -> tack_bundler::Result<WrittenBundle> {
    let start = Instant::now();
    let written = tack_bundler::bundle(&ctx.config.bundle, &ctx.root).await?;
    let elapsed = start.elapsed();

    ui::success(&format!("Bundled in {}", ui::format_duration(elapsed)));
    ui::print_bundle_summary(&written, elapsed);
    Ok(written)
}

struct BundleRebuild<'a> {
    ctx: &'a TaskContext,
}

#[async_trait(?Send)]
impl Rebuild for BundleRebuild<'_> {
    async fn rebuild(&mut self) -> tack_bundler::Result<WrittenBundle> {
        bundle(self.ctx).await
    }
}

async fn watch(ctx: &TaskContext) -> Result<()> {
    let settings = &ctx.config.watch;
    let patterns = WatchPatterns::for_project(&ctx.config, &ctx.root)?;
    let (watcher, changes) =
        FileWatcher::new(&ctx.root, Duration::from_millis(settings.debounce_ms))?;

    ui::info(&format!(
        "Watching {} in {}",
        settings.patterns.join(", "),
        watcher.root().display()
    ));
    ui::info("Press Ctrl+C to stop");

    let session = WatchSession::new(
        BundleRebuild { ctx },
        ctx.root.clone(),
        patterns,
        settings.overlap,
    );
    let summary = session.run(changes, shutdown_signal()).await;

    // Release the watch before reporting
    drop(watcher);
    let summary = summary?;

    ui::success(&format!(
        "Watch stopped after {} rebuild(s), {} failed",
        summary.runs, summary.failures
    ));
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::watch::FileChange;
    use std::fs;
    use tack_config::OverlapPolicy;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    fn project(main: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.js"), main).unwrap();
        dir
    }

    #[test]
    fn load_uses_defaults_without_file() {
        let dir = project("");
        let ctx = TaskContext::load(dir.path(), None).unwrap();
        assert_eq!(ctx.config, TackConfig::default());
        assert!(ctx.config_file.is_none());
        assert!(ctx.root.is_absolute());
    }

    #[test]
    fn load_rejects_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = TaskContext::load(&dir.path().join("nope"), None).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn bundle_task_writes_output() {
        let dir = project("console.log('from-runner');\n");
        let ctx = TaskContext::load(dir.path(), None).unwrap();

        run_tasks(&ctx, &[TaskName::Bundle]).await.unwrap();

        let code = fs::read_to_string(ctx.root.join("dist/main.js")).unwrap();
        assert!(code.contains("from-runner"));
        assert!(ctx.root.join("dist/main.js.map").is_file());
    }

    #[tokio::test]
    async fn bundle_task_failure_stops_plan() {
        let dir = project("const = ;\n");
        let ctx = TaskContext::load(dir.path(), None).unwrap();

        let err = run_tasks(&ctx, &[]).await.unwrap_err();
        assert!(matches!(err, CliError::Bundle(_)));
        assert!(!ctx.root.join("dist").exists());
    }

    #[tokio::test]
    async fn missing_entry_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        let ctx = TaskContext::load(dir.path(), None).unwrap();

        let err = run_tasks(&ctx, &[TaskName::Bundle]).await.unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    /// Puts the entry back after the first run, as an editor finishing a
    /// delete-and-recreate save would, and reports the recreation.
    struct RestoreEntry<'a> {
        inner: BundleRebuild<'a>,
        restore: Option<(mpsc::Sender<FileChange>, PathBuf, &'static str)>,
    }

    #[async_trait(?Send)]
    impl Rebuild for RestoreEntry<'_> {
        async fn rebuild(&mut self) -> tack_bundler::Result<WrittenBundle> {
            let result = self.inner.rebuild().await;
            if let Some((tx, path, contents)) = self.restore.take() {
                fs::write(&path, contents).unwrap();
                tx.send(FileChange::Created(path)).await.unwrap();
            }
            result
        }
    }

    #[tokio::test]
    async fn entry_removed_mid_watch_keeps_watching() {
        let dir = project("console.log('before');\n");
        let ctx = TaskContext::load(dir.path(), None).unwrap();
        let entry = ctx.root.join("src/main.js");
        fs::remove_file(&entry).unwrap();

        let (tx, rx) = mpsc::channel(16);
        tx.send(FileChange::Removed(entry.clone())).await.unwrap();
        let builder = RestoreEntry {
            inner: BundleRebuild { ctx: &ctx },
            restore: Some((tx, entry, "console.log('restored');\n")),
        };
        let patterns = WatchPatterns::for_project(&ctx.config, &ctx.root).unwrap();

        let summary = WatchSession::new(builder, ctx.root.clone(), patterns, OverlapPolicy::Queue)
            .run(rx, std::future::pending())
            .await
            .unwrap();

        assert_eq!(summary.runs, 2);
        assert_eq!(summary.failures, 1);
        let code = fs::read_to_string(ctx.root.join("dist/main.js")).unwrap();
        assert!(code.contains("restored"));
    }
}
