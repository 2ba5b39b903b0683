//! Shared helpers for command implementations.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Resolve a path relative to a working directory.
///
/// If the path is absolute, returns it unchanged.
fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// The project root: `--cwd` if given, resolved against the process directory.
pub fn project_root(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    Ok(match cwd {
        Some(dir) => resolve_path(dir, &current),
        None => current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_relative_and_absolute() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(Path::new("app"), cwd), Path::new("/work/app"));
        assert_eq!(resolve_path(Path::new("/abs"), cwd), Path::new("/abs"));
    }

    #[test]
    fn root_defaults_to_current_dir() {
        assert_eq!(project_root(None).unwrap(), std::env::current_dir().unwrap());
    }
}
