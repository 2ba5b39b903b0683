//! The Build Configuration record consumed by the `bundle` task.

use std::fmt;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

/// Output format for the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Immediately-invoked function expression, for a plain `<script>` tag
    #[default]
    Iife,
    /// ECMAScript module
    Esm,
    /// CommonJS module
    Cjs,
    /// Universal module definition
    Umd,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iife => "iife",
            Self::Esm => "esm",
            Self::Cjs => "cjs",
            Self::Umd => "umd",
        }
    }

    /// Whether the format exposes its exports through a global variable.
    pub fn uses_global_name(&self) -> bool {
        matches!(self, Self::Iife | Self::Umd)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language baseline the transpiler lowers syntax to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EsTarget {
    /// ECMAScript 2015 (ES6), the default
    #[default]
    ES2015,
    ES2016,
    ES2017,
    ES2018,
    ES2019,
    ES2020,
    ES2021,
    ES2022,
    /// Latest syntax, no lowering
    ESNext,
}

impl EsTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ES2015 => "es2015",
            Self::ES2016 => "es2016",
            Self::ES2017 => "es2017",
            Self::ES2018 => "es2018",
            Self::ES2019 => "es2019",
            Self::ES2020 => "es2020",
            Self::ES2021 => "es2021",
            Self::ES2022 => "es2022",
            Self::ESNext => "esnext",
        }
    }
}

impl fmt::Display for EsTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime the bundle is built for. Selects resolver conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Browser,
    Node,
}

/// Build Configuration: where the entry lives, where the bundle goes, and how
/// it is emitted.
///
/// Relative paths are resolved against the project root; the entry is
/// resolved against the base source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Entry file, relative to `base_path`
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Base source directory
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Output directory
    #[serde(default = "default_dist_path")]
    pub dist_path: String,

    /// Emit an adjacent `.map` file
    #[serde(default = "default_sourcemap")]
    pub sourcemap: bool,

    /// Syntax baseline for transpilation
    #[serde(default)]
    pub target: EsTarget,

    /// Global variable name for `iife` / `umd` bundles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub platform: Platform,

    /// Module specifiers left out of the bundle
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            base_path: default_base_path(),
            format: OutputFormat::default(),
            dist_path: default_dist_path(),
            sourcemap: default_sourcemap(),
            target: EsTarget::default(),
            name: None,
            platform: Platform::default(),
            external: Vec::new(),
        }
    }
}

impl BuildConfig {
    pub fn new(entry: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn dist_path(mut self, dist_path: impl Into<String>) -> Self {
        self.dist_path = dist_path.into();
        self
    }

    pub fn sourcemap(mut self, enabled: bool) -> Self {
        self.sourcemap = enabled;
        self
    }

    pub fn target(mut self, target: EsTarget) -> Self {
        self.target = target;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Absolute base source directory.
    pub fn base_dir(&self, root: &Path) -> PathBuf {
        resolve(root, Path::new(&self.base_path))
    }

    /// Absolute entry file path (`root / base_path / entry`).
    pub fn entry_path(&self, root: &Path) -> PathBuf {
        resolve(&self.base_dir(root), Path::new(&self.entry))
    }

    /// Absolute output directory.
    pub fn dist_dir(&self, root: &Path) -> PathBuf {
        resolve(root, Path::new(&self.dist_path))
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        base.join(path).clean()
    }
}

fn default_entry() -> String {
    "main.js".to_string()
}

fn default_base_path() -> String {
    "./src/".to_string()
}

fn default_dist_path() -> String {
    "./dist".to_string()
}

fn default_sourcemap() -> bool {
    true
}
