//! Atomic, path-checked writing of emitted files.
//!
//! Every file is first written next to its target with a `.tmp` suffix. Only
//! when all of them are on disk are they renamed into place. A file being
//! replaced is moved aside to `.bak` first, so if any rename fails the targets
//! already replaced are restored and the previous bundle stays as it was.
//! Existing files are always replaced.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use super::artifact::{EmittedFile, WrittenBundle, WrittenFile};
use crate::{Error, Result};

/// Write `files` under `dir`, creating it if needed.
///
/// # Errors
///
/// - [`Error::InvalidOutputPath`] when a file name would escape `dir`
/// - [`Error::WriteFailure`] when a directory, temp file, or rename fails
pub fn write_files_to(files: &[EmittedFile], dir: &Path) -> Result<WrittenBundle> {
    let dir = normalize_dir(dir)?;

    fs::create_dir_all(&dir).map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to create output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    // Validate everything before the first byte is written
    let operations = files
        .iter()
        .map(|file| Ok((validate_output_path(&dir, &file.filename)?, file)))
        .collect::<Result<Vec<_>>>()?;

    write_atomic(&operations)?;

    let files = operations
        .into_iter()
        .map(|(path, file)| WrittenFile {
            size: file.contents.len() as u64,
            kind: file.kind,
            path,
        })
        .collect();

    Ok(WrittenBundle {
        out_dir: dir,
        files,
    })
}

fn normalize_dir(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.clean();
    if cleaned.is_absolute() {
        return Ok(cleaned);
    }

    let cwd = std::env::current_dir()
        .map_err(|e| Error::InvalidOutputPath(format!("Failed to get current directory: {}", e)))?;
    Ok(cwd.join(cleaned).clean())
}

/// Resolve `filename` under `base_dir`, rejecting anything that lands outside it.
fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.is_empty() {
        return Err(Error::InvalidOutputPath("Empty file name".to_string()));
    }
    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "Filename contains null byte".to_string(),
        ));
    }

    let full_path = base_dir.join(Path::new(filename).clean()).clean();

    if full_path == base_dir || !full_path.starts_with(base_dir) {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}' (resolved to '{}')",
            filename,
            base_dir.display(),
            full_path.display()
        )));
    }

    Ok(full_path)
}

/// `target` with `suffix` appended to its file name.
fn sibling_path(target: &Path, suffix: &str) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    target.with_file_name(name)
}

fn write_atomic(operations: &[(PathBuf, &EmittedFile)]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(operations.len());

    for (target, file) in operations {
        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                discard(&staged);
                return Err(Error::WriteFailure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                )));
            }
        }

        let temp = sibling_path(target, ".tmp");
        if let Err(e) = fs::write(&temp, &file.contents) {
            discard(&staged);
            let _ = fs::remove_file(&temp);
            return Err(Error::WriteFailure(format!(
                "Failed to write temporary file '{}': {}",
                temp.display(),
                e
            )));
        }
        staged.push((temp, target.as_path()));
    }

    commit(&staged)
}

/// A target renamed into place, with the backup of what it replaced.
type Replaced<'a> = (&'a Path, Option<PathBuf>);

/// Rename staged files over their targets as one unit.
fn commit(staged: &[(PathBuf, &Path)]) -> Result<()> {
    let mut replaced: Vec<Replaced<'_>> = Vec::with_capacity(staged.len());

    for (index, (temp, target)) in staged.iter().enumerate() {
        match replace(temp, target) {
            Ok(backup) => replaced.push((*target, backup)),
            Err(e) => {
                discard(&staged[index..]);
                roll_back(&replaced);
                return Err(e);
            }
        }
    }

    for (_, backup) in &replaced {
        if let Some(backup) = backup {
            remove_quietly(backup);
        }
    }
    Ok(())
}

/// Move `temp` over `target`, keeping the old target as a backup.
fn replace(temp: &Path, target: &Path) -> Result<Option<PathBuf>> {
    let backup = if target.exists() {
        let backup = sibling_path(target, ".bak");
        fs::rename(target, &backup).map_err(|e| {
            Error::WriteFailure(format!(
                "Failed to move '{}' aside: {}",
                target.display(),
                e
            ))
        })?;
        Some(backup)
    } else {
        None
    };

    if let Err(e) = fs::rename(temp, target) {
        roll_back(&[(target, backup)]);
        return Err(Error::WriteFailure(format!(
            "Failed to rename '{}' to '{}': {}",
            temp.display(),
            target.display(),
            e
        )));
    }

    Ok(backup)
}

/// Put back what `replaced` overwrote, newest first.
fn roll_back(replaced: &[Replaced<'_>]) {
    for (target, backup) in replaced.iter().rev() {
        let restored = match backup {
            Some(backup) => fs::rename(backup, target),
            None => fs::remove_file(target),
        };
        if let Err(e) = restored {
            tracing::warn!(
                path = %target.display(),
                error = %e,
                "failed to restore previous output file"
            );
        }
    }
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove backup file");
    }
}

/// Best-effort removal of staged temp files; we are already failing.
fn discard(staged: &[(PathBuf, &Path)]) {
    for (temp, _) in staged {
        if temp.exists() {
            if let Err(e) = fs::remove_file(temp) {
                tracing::warn!(
                    path = %temp.display(),
                    error = %e,
                    "failed to clean up temporary file"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::EmittedKind;
    use tempfile::TempDir;

    fn emitted(name: &str, contents: &str) -> EmittedFile {
        EmittedFile {
            filename: name.to_string(),
            contents: contents.as_bytes().to_vec(),
            kind: EmittedKind::Chunk,
        }
    }

    #[test]
    fn validate_output_path_normal() {
        let base = Path::new("/tmp/output");
        assert_eq!(
            validate_output_path(base, "main.js").unwrap(),
            Path::new("/tmp/output/main.js")
        );
        assert_eq!(
            validate_output_path(base, "./assets/logo.svg").unwrap(),
            Path::new("/tmp/output/assets/logo.svg")
        );
    }

    #[test]
    fn validate_output_path_rejects_traversal() {
        let base = Path::new("/tmp/output");
        for name in ["../etc/passwd", "safe/../../../../etc/passwd", "/etc/passwd", "."] {
            let err = validate_output_path(base, name).unwrap_err();
            assert!(matches!(err, Error::InvalidOutputPath(_)), "{name}");
        }
    }

    #[test]
    fn validate_output_path_rejects_null_byte() {
        assert!(validate_output_path(Path::new("/tmp/output"), "file\0name.js").is_err());
    }

    #[test]
    fn sibling_name_keeps_full_file_name() {
        assert_eq!(
            sibling_path(Path::new("/d/main.js.map"), ".tmp"),
            Path::new("/d/main.js.map.tmp")
        );
    }

    #[test]
    fn writes_and_replaces_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");

        let first = write_files_to(&[emitted("main.js", "one")], &out).unwrap();
        assert_eq!(first.files.len(), 1);
        assert_eq!(first.total_size(), 3);

        write_files_to(&[emitted("main.js", "three")], &out).unwrap();
        assert_eq!(fs::read_to_string(out.join("main.js")).unwrap(), "three");

        let leftovers: Vec<_> = fs::read_dir(&out)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn invalid_name_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("main.js"), "previous").unwrap();

        let files = [emitted("main.js", "next"), emitted("../escape.js", "x")];
        assert!(write_files_to(&files, &out).is_err());
        assert_eq!(fs::read_to_string(out.join("main.js")).unwrap(), "previous");
        assert!(!dir.path().join("escape.js").exists());
    }

    #[test]
    fn failed_rename_restores_replaced_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("main.js"), "old-code").unwrap();
        fs::write(out.join("main.js.map"), "old-map").unwrap();
        // A non-empty directory where the map's backup must go
        fs::create_dir_all(out.join("main.js.map.bak/blocker")).unwrap();

        let files = [emitted("main.js", "new-code"), emitted("main.js.map", "new-map")];
        let err = write_files_to(&files, &out).unwrap_err();

        assert!(matches!(err, Error::WriteFailure(_)));
        assert_eq!(fs::read_to_string(out.join("main.js")).unwrap(), "old-code");
        assert_eq!(fs::read_to_string(out.join("main.js.map")).unwrap(), "old-map");
        assert!(!out.join("main.js.bak").exists());
        assert!(!out.join("main.js.tmp").exists());
        assert!(!out.join("main.js.map.tmp").exists());
    }

    #[test]
    fn backups_are_removed_after_success() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");

        write_files_to(&[emitted("main.js", "one")], &out).unwrap();
        write_files_to(&[emitted("main.js", "two")], &out).unwrap();

        let names: Vec<_> = fs::read_dir(&out)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["main.js"]);
    }
}
