//! The bundle pipeline: plan → generate → write.

mod generate;
mod plan;
mod steps;

use std::path::Path;
use std::time::Instant;

use tack_config::BuildConfig;

use crate::Result;
use crate::output::WrittenBundle;

pub use generate::generate;
pub use plan::BundlePlan;
pub use steps::TransformStep;

/// Run the whole pipeline once for `config`, relative to the project `root`.
///
/// Generation happens fully in memory before anything touches the output
/// directory, so a failed run leaves previous output untouched.
pub async fn bundle(config: &BuildConfig, root: &Path) -> Result<WrittenBundle> {
    let start = Instant::now();

    let plan = BundlePlan::from_config(config, root)?;
    let artifact = generate(&plan).await?;
    let written = artifact.write_to(&plan.out_dir)?;

    tracing::info!(
        entry = %plan.entry.display(),
        out_dir = %written.out_dir.display(),
        files = written.files.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "bundle written"
    );

    Ok(written)
}
