//! Bundle output: the in-memory artifact and the secure writer.

mod artifact;
pub mod writer;

pub use artifact::{BundleArtifact, EmittedFile, EmittedKind, WrittenBundle, WrittenFile};
