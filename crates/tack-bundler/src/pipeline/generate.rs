//! Second stage: run Rolldown for a [`BundlePlan`] and capture what it emits.

use rolldown::{
    BundlerBuilder, BundlerOptions, InputItem, IsExternal, OutputFormat as RolldownFormat,
    SourceMapType,
};
use tack_config::OutputFormat;

use super::plan::BundlePlan;
use crate::output::BundleArtifact;
use crate::{Error, Result};

/// Generate the bundle in memory. Nothing is written to disk.
///
/// # Errors
///
/// Returns [`Error::Bundler`] with the extracted diagnostics when Rolldown
/// rejects the input (syntax errors, unresolved imports, ...).
pub async fn generate(plan: &BundlePlan) -> Result<BundleArtifact> {
    let options = rolldown_options(plan);

    tracing::debug!(
        entry = %plan.entry.display(),
        format = %plan.format,
        sourcemap = plan.sourcemap,
        "generating bundle"
    );

    let mut bundler = BundlerBuilder::default()
        .with_options(options)
        .build()
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    let output = bundler
        .generate()
        .await
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    if !output.warnings.is_empty() {
        tracing::warn!(count = output.warnings.len(), "bundler reported warnings");
    }

    let artifact = BundleArtifact::from_rolldown(&output);
    tracing::debug!(files = artifact.files().len(), "bundle generated");
    Ok(artifact)
}

/// Configure Rolldown options from the plan, then layer each transform step.
pub(crate) fn rolldown_options(plan: &BundlePlan) -> BundlerOptions {
    let mut options = BundlerOptions {
        input: Some(vec![InputItem {
            name: Some(plan.name.clone()),
            import: plan.entry.to_string_lossy().into_owned(),
        }]),
        cwd: Some(plan.root.clone()),
        format: Some(convert_format(plan.format)),
        sourcemap: plan.sourcemap.then_some(SourceMapType::File),
        external: Some(IsExternal::from(plan.external.clone())),
        ..Default::default()
    };

    if plan.format.uses_global_name() {
        options.name = plan.global_name.clone();
    }

    for step in &plan.steps {
        step.apply(plan, &mut options);
    }

    options
}

fn convert_format(format: OutputFormat) -> RolldownFormat {
    match format {
        OutputFormat::Iife => RolldownFormat::Iife,
        OutputFormat::Esm => RolldownFormat::Esm,
        OutputFormat::Cjs => RolldownFormat::Cjs,
        OutputFormat::Umd => RolldownFormat::Umd,
    }
}
