//! Shared test utilities for tack-bundler tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create a project with `src/` holding the given files.
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    for (name, contents) in files {
        let path = dir.path().join("src").join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(&path, contents).expect("write source");
    }
    dir
}

pub fn dist(root: &Path) -> PathBuf {
    root.join("dist")
}

pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref())
        .unwrap_or_else(|e| panic!("read {}: {e}", path.as_ref().display()))
}

/// Sorted file names directly under `dir`, empty when it does not exist.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn assert_contains(code: &str, needle: &str) {
    assert!(
        code.contains(needle),
        "Expected bundle to contain '{}'.\nBundle preview (first 500 chars): {}",
        needle,
        &code[..code.len().min(500)]
    );
}
