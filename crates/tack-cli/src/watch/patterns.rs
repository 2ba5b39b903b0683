use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use tack_config::{TackConfig, WatchConfig};

use crate::error::Result;

/// Compiled watch and ignore globs.
///
/// Patterns are relative to the project root; [`matches`](Self::matches)
/// takes root-relative paths with forward slashes, e.g. `"src/util.js"`.
/// Hidden files and directories never match.
#[derive(Debug, Clone)]
pub struct WatchPatterns {
    include: GlobSet,
    ignore: GlobSet,
}

impl WatchPatterns {
    pub fn new(config: &WatchConfig) -> Result<Self> {
        Ok(Self {
            include: build_globset(&config.patterns)?,
            ignore: build_globset(&config.ignore)?,
        })
    }

    /// Patterns for a whole project.
    ///
    /// On top of the watch settings, the bundle's output directory is always
    /// ignored when it lies under `root`, wherever `dist_path` points.
    pub fn for_project(config: &TackConfig, root: &Path) -> Result<Self> {
        let mut ignore = config.watch.ignore.clone();
        let dist = config.bundle.dist_dir(root);
        if let Some(rel) = relative_str(root, &dist).filter(|rel| !rel.is_empty()) {
            ignore.push(format!("{}/**", globset::escape(&rel)));
        }

        Ok(Self {
            include: build_globset(&config.watch.patterns)?,
            ignore: build_globset(&ignore)?,
        })
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        if rel_path.is_empty() || is_hidden(rel_path) {
            return false;
        }
        if self.ignore.is_match(rel_path) {
            return false;
        }
        self.include.is_match(rel_path)
    }

    /// Like [`matches`](Self::matches) for an absolute path under `root`.
    ///
    /// Paths outside `root` never match.
    pub fn matches_path(&self, root: &Path, path: &Path) -> bool {
        relative_str(root, path).is_some_and(|rel| self.matches(&rel))
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

fn is_hidden(rel_path: &str) -> bool {
    rel_path
        .split('/')
        .any(|part| part.starts_with('.') && part != "." && part != "..")
}

/// `path` relative to `root`, with forward slashes.
fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}
