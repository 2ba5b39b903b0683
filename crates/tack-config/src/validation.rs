//! Configuration validation.
//!
//! [`validate_schema`] checks values without touching the filesystem;
//! [`validate_fs`] checks the entry file, the base directory and the output
//! directory against a project root.

use std::fs;
use std::path::Path;

use globset::Glob;

use crate::config::TackConfig;
use crate::error::{ConfigError, Result};

/// Check field values. No filesystem access.
pub fn validate_schema(config: &TackConfig) -> Result<()> {
    let bundle = &config.bundle;

    if bundle.entry.trim().is_empty() {
        return Err(ConfigError::MissingField("bundle.entry"));
    }
    if bundle.base_path.trim().is_empty() {
        return Err(ConfigError::MissingField("bundle.base_path"));
    }
    if bundle.dist_path.trim().is_empty() {
        return Err(ConfigError::MissingField("bundle.dist_path"));
    }

    if let Some(name) = &bundle.name {
        if !is_js_identifier(name) {
            return Err(ConfigError::invalid(
                "bundle.name",
                format!("'{name}' is not a valid JavaScript identifier"),
            ));
        }
        if !bundle.format.uses_global_name() {
            tracing::warn!(
                format = %bundle.format,
                "bundle.name is only used by iife and umd output"
            );
        }
    }

    for external in &bundle.external {
        if external.trim().is_empty() {
            return Err(ConfigError::invalid(
                "bundle.external",
                "external specifiers must not be empty",
            ));
        }
    }

    if config.watch.patterns.is_empty() {
        return Err(ConfigError::MissingField("watch.patterns"));
    }
    for pattern in config.watch.patterns.iter().chain(&config.watch.ignore) {
        Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.kind().to_string(),
        })?;
    }

    Ok(())
}

/// Check the configuration against the filesystem under `root`.
///
/// The output directory need not exist yet, but if it does it must be a
/// writable directory.
pub fn validate_fs(config: &TackConfig, root: &Path) -> Result<()> {
    let bundle = &config.bundle;

    let base_dir = bundle.base_dir(root);
    if !base_dir.is_dir() {
        return Err(ConfigError::BaseDirNotFound(base_dir));
    }

    let entry = bundle.entry_path(root);
    if !entry.exists() {
        return Err(ConfigError::EntryNotFound(entry));
    }
    if !entry.is_file() {
        return Err(ConfigError::EntryNotAFile(entry));
    }

    let dist_dir = bundle.dist_dir(root);
    if dist_dir.exists() {
        if !dist_dir.is_dir() {
            return Err(ConfigError::OutputNotADirectory(dist_dir));
        }
        if fs::metadata(&dist_dir)?.permissions().readonly() {
            return Err(ConfigError::OutputNotWritable(dist_dir));
        }
    }

    Ok(())
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
