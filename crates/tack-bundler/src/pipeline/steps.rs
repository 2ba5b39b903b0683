//! The fixed, ordered transform steps of the bundle pipeline.
//!
//! Each step configures one concern of Rolldown's options. Rolldown then
//! executes them together during generation; the order here is the order in
//! which they are layered onto the options.

use std::fmt;
use std::path::Path;

use itertools::Either;
use rolldown::{BundlerOptions, Platform as RolldownPlatform, ResolveOptions};
use rolldown_common::BundlerTransformOptions;
use tack_config::Platform;

use super::plan::BundlePlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStep {
    /// Lower syntax to the configured language baseline.
    Transpile,
    /// Node-style module resolution from the base directory.
    Resolve,
    /// Let CommonJS packages resolve and be wrapped for ESM consumers.
    CommonJsInterop,
}

impl TransformStep {
    /// Syntax transpilation → dependency resolution → CommonJS interop.
    pub const ORDERED: [TransformStep; 3] = [
        TransformStep::Transpile,
        TransformStep::Resolve,
        TransformStep::CommonJsInterop,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransformStep::Transpile => "transpile",
            TransformStep::Resolve => "resolve",
            TransformStep::CommonJsInterop => "commonjs",
        }
    }

    pub fn apply(&self, plan: &BundlePlan, options: &mut BundlerOptions) {
        match self {
            TransformStep::Transpile => transpile(plan, options),
            TransformStep::Resolve => resolve(plan, options),
            TransformStep::CommonJsInterop => commonjs_interop(options),
        }
        tracing::debug!(step = self.name(), "applied transform step");
    }
}

impl fmt::Display for TransformStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn transpile(plan: &BundlePlan, options: &mut BundlerOptions) {
    let transform = options.transform.get_or_insert_with(BundlerTransformOptions::default);
    transform.target = Some(Either::Left(plan.target.as_str().to_string()));
}

fn resolve(plan: &BundlePlan, options: &mut BundlerOptions) {
    let (platform, conditions, main_fields): (_, &[&str], &[&str]) = match plan.platform {
        Platform::Browser => (
            RolldownPlatform::Browser,
            &["browser", "import", "module", "default"],
            &["browser", "module", "main"],
        ),
        Platform::Node => (
            RolldownPlatform::Node,
            &["node", "import", "module", "default"],
            &["module", "main"],
        ),
    };

    options.platform = Some(platform);
    options.resolve = Some(ResolveOptions {
        main_fields: Some(to_strings(main_fields)),
        condition_names: Some(to_strings(conditions)),
        extensions: Some(to_strings(&[".js", ".mjs", ".json"])),
        modules: Some(module_dirs(&plan.base_dir, &plan.root)),
        symlinks: Some(true),
        ..Default::default()
    });
}

fn commonjs_interop(options: &mut BundlerOptions) {
    let Some(resolve) = options.resolve.as_mut() else {
        return;
    };

    // CommonJS-only packages publish a `require` export condition
    if let Some(conditions) = resolve.condition_names.as_mut() {
        if !conditions.iter().any(|c| c == "require") {
            let at = conditions
                .iter()
                .position(|c| c == "default")
                .unwrap_or(conditions.len());
            conditions.insert(at, "require".to_string());
        }
    }
    if let Some(extensions) = resolve.extensions.as_mut() {
        if !extensions.iter().any(|e| e == ".cjs") {
            extensions.push(".cjs".to_string());
        }
    }
}

/// `node_modules` directories from the base directory up to the filesystem root.
///
/// Directories between the base directory and the project root come first.
fn module_dirs(base_dir: &Path, root: &Path) -> Vec<String> {
    let mut dirs = Vec::new();
    let start = if base_dir.starts_with(root) { base_dir } else { root };

    let mut current = Some(start);
    while let Some(dir) = current {
        dirs.push(dir.join("node_modules").to_string_lossy().into_owned());
        current = dir.parent();
    }

    dirs.push("node_modules".to_string());
    dirs
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
