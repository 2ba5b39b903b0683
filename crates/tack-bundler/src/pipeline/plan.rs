//! First stage: turn a [`BuildConfig`] into a fully resolved [`BundlePlan`].

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tack_config::{BuildConfig, EsTarget, OutputFormat, Platform};

use super::steps::TransformStep;
use crate::{Error, Result};

/// Everything the bundler needs for one run, with every path made absolute.
///
/// A plan is cheap to build and holds no open resources; the watch task
/// rebuilds it for every run so that a config error surfaces on each attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePlan {
    /// Project root, used as the bundler's working directory
    pub root: PathBuf,
    /// Base source directory
    pub base_dir: PathBuf,
    /// Absolute entry file path
    pub entry: PathBuf,
    /// Chunk name, the entry file stem (`main` for `main.js`)
    pub name: String,
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    pub sourcemap: bool,
    pub target: EsTarget,
    pub platform: Platform,
    pub global_name: Option<String>,
    pub external: Vec<String>,
    /// Transform steps, applied in order
    pub steps: Vec<TransformStep>,
}

impl BundlePlan {
    pub fn from_config(config: &BuildConfig, root: &Path) -> Result<Self> {
        let root = absolute(root)?;
        let entry = config.entry_path(&root);

        if !entry.is_file() {
            return Err(Error::EntryNotFound(entry));
        }

        let name = entry
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "entry '{}' has no usable file name",
                    entry.display()
                ))
            })?
            .to_string();

        Ok(Self {
            base_dir: config.base_dir(&root),
            out_dir: config.dist_dir(&root),
            entry,
            name,
            format: config.format,
            sourcemap: config.sourcemap,
            target: config.target,
            platform: config.platform,
            global_name: config.name.clone(),
            external: config.external.clone(),
            steps: TransformStep::ORDERED.to_vec(),
            root,
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf().clean())
    } else {
        Ok(std::env::current_dir()?.join(path).clean())
    }
}
