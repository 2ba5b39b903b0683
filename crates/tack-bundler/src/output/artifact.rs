use std::path::{Path, PathBuf};

use rolldown::BundleOutput;
use rolldown_common::Output;

use super::writer::write_files_to;
use crate::Result;

/// What an emitted file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmittedKind {
    /// Bundled JavaScript
    Chunk,
    /// `.map` file for a chunk
    SourceMap,
    /// Any other emitted asset
    Asset,
}

/// One file produced by the bundler, not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    /// Path relative to the output directory
    pub filename: String,
    pub contents: Vec<u8>,
    pub kind: EmittedKind,
}

/// In-memory result of bundle generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleArtifact {
    files: Vec<EmittedFile>,
}

impl BundleArtifact {
    pub fn new(files: Vec<EmittedFile>) -> Self {
        Self { files }
    }

    pub(crate) fn from_rolldown(output: &BundleOutput) -> Self {
        let files = output
            .assets
            .iter()
            .map(|item| match item {
                Output::Chunk(chunk) => EmittedFile {
                    filename: chunk.filename.as_str().to_string(),
                    contents: chunk.code.as_bytes().to_vec(),
                    kind: EmittedKind::Chunk,
                },
                Output::Asset(asset) => {
                    let filename = asset.filename.as_str().to_string();
                    let kind = if filename.ends_with(".map") {
                        EmittedKind::SourceMap
                    } else {
                        EmittedKind::Asset
                    };
                    EmittedFile {
                        filename,
                        contents: asset.source.as_bytes().to_vec(),
                        kind,
                    }
                }
            })
            .collect();

        Self { files }
    }

    pub fn files(&self) -> &[EmittedFile] {
        &self.files
    }

    /// Write every emitted file into `dir`, replacing existing files.
    ///
    /// All-or-nothing: see [`writer`](super::writer).
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<WrittenBundle> {
        write_files_to(&self.files, dir.as_ref())
    }
}

/// A file that made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub size: u64,
    pub kind: EmittedKind,
}

/// Result of the write stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenBundle {
    pub out_dir: PathBuf,
    pub files: Vec<WrittenFile>,
}

impl WrittenBundle {
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &WrittenFile> {
        self.files.iter().filter(|f| f.kind == EmittedKind::Chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file(name: &str, contents: &str, kind: EmittedKind) -> EmittedFile {
        EmittedFile {
            filename: name.to_string(),
            contents: contents.as_bytes().to_vec(),
            kind,
        }
    }

    #[test]
    fn written_bundle_reports_chunks_and_size() {
        let dir = TempDir::new().unwrap();
        let artifact = BundleArtifact::new(vec![
            file("main.js", "code", EmittedKind::Chunk),
            file("main.js.map", "{}", EmittedKind::SourceMap),
        ]);

        let written = artifact.write_to(dir.path().join("dist")).unwrap();

        assert_eq!(written.out_dir, dir.path().join("dist"));
        assert_eq!(written.total_size(), 6);
        let chunks: Vec<_> = written.chunks().map(|f| f.path.clone()).collect();
        assert_eq!(chunks, [dir.path().join("dist/main.js")]);
    }

    #[test]
    fn empty_artifact_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let written = BundleArtifact::default()
            .write_to(dir.path().join("dist"))
            .unwrap();

        assert!(written.files.is_empty());
        assert_eq!(written.chunks().count(), 0);
    }
}
