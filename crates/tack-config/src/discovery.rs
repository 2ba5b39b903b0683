//! File-based config discovery for CLI use
//!
//! Handles finding and loading `tack.toml` from the filesystem. A project
//! without a config file runs on the built-in defaults.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Format as _, Serialized, Toml},
};

use crate::config::TackConfig;
use crate::error::{ConfigError, Result};

/// Conventional config file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "tack.toml";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use tack_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    explicit: Option<PathBuf>,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            explicit: None,
        }
    }

    /// Use a specific config file instead of searching the root.
    ///
    /// Relative paths are taken relative to the root.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.explicit = Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        });
        self
    }

    /// Find the config file to load, if any.
    pub fn find(&self) -> Option<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return Some(explicit.clone());
        }

        let toml_path = self.root.join(CONFIG_FILE_NAME);
        toml_path.is_file().then_some(toml_path)
    }

    /// Load configuration: defaults, then the config file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if an explicit file was requested and
    /// does not exist, and `ConfigError::Load` for syntax or type errors.
    pub fn load(&self) -> Result<TackConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(TackConfig::default()));

        match self.find() {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path));
                }
                tracing::debug!(path = %path.display(), "loading config file");
                figment = figment.merge(Toml::file(&path));
            }
            None => {
                tracing::debug!(root = %self.root.display(), "no config file, using defaults");
            }
        }

        Ok(figment.extract()?)
    }
}
