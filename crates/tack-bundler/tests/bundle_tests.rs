mod helpers;

use helpers::{assert_contains, dist, list_dir, project, read};
use tack_bundler::{EmittedKind, Error, bundle};
use tack_config::{BuildConfig, EsTarget, OutputFormat};

#[tokio::test]
async fn default_config_writes_bundle_and_source_map() {
    let dir = project(&[("main.js", "console.log('tack-main');\n")]);

    let written = bundle(&BuildConfig::default(), dir.path())
        .await
        .expect("bundle");

    assert_eq!(list_dir(&dist(dir.path())), ["main.js", "main.js.map"]);
    assert_eq!(written.chunks().count(), 1);
    assert!(written.total_size() > 0);
    assert!(
        written
            .files
            .iter()
            .any(|f| f.kind == EmittedKind::SourceMap)
    );

    let code = read(dist(dir.path()).join("main.js"));
    assert_contains(&code, "tack-main");
    assert_contains(&code, "sourceMappingURL=main.js.map");
    assert_contains(&read(dist(dir.path()).join("main.js.map")), "\"mappings\"");
}

#[tokio::test]
async fn sourcemap_disabled_writes_only_bundle() {
    let dir = project(&[("main.js", "console.log('no-map');\n")]);
    let config = BuildConfig::default().sourcemap(false);

    bundle(&config, dir.path()).await.expect("bundle");

    assert_eq!(list_dir(&dist(dir.path())), ["main.js"]);
}

#[tokio::test]
async fn local_import_is_included_once_before_importer() {
    let dir = project(&[
        (
            "util.js",
            "console.log('util-loaded');\nexport function greet(name) { return 'hi ' + name; }\n",
        ),
        (
            "main.js",
            "import { greet } from './util.js';\nconsole.log(greet('main-marker'));\n",
        ),
    ]);

    bundle(&BuildConfig::default(), dir.path())
        .await
        .expect("bundle");

    let code = read(dist(dir.path()).join("main.js"));
    assert_eq!(code.matches("util-loaded").count(), 1);
    let util_at = code.find("util-loaded").expect("util code");
    let main_at = code.find("main-marker").expect("main code");
    assert!(util_at < main_at, "dependency must run before its importer");
    assert!(!code.contains("import {"), "imports must be bundled away");
}

#[tokio::test]
async fn commonjs_module_is_usable_from_esm() {
    let dir = project(&[
        ("legacy.js", "module.exports = { answer: 'cjs-answer' };\n"),
        (
            "main.js",
            "import legacy from './legacy.js';\nconsole.log(legacy.answer);\n",
        ),
    ]);

    bundle(&BuildConfig::default(), dir.path())
        .await
        .expect("bundle");

    let code = read(dist(dir.path()).join("main.js"));
    assert_contains(&code, "cjs-answer");
    assert!(!code.contains("import legacy"));
}

#[tokio::test]
async fn iife_output_is_wrapped() {
    let dir = project(&[("main.js", "console.log('wrapped');\n")]);
    let config = BuildConfig::default().format(OutputFormat::Iife);

    bundle(&config, dir.path()).await.expect("bundle");

    let code = read(dist(dir.path()).join("main.js"));
    assert_contains(&code, "(function");
    assert_contains(&code, "wrapped");
}

#[tokio::test]
async fn esm_output_keeps_exports() {
    let dir = project(&[("main.js", "export const version = 'esm-version';\n")]);
    let config = BuildConfig::default().format(OutputFormat::Esm);

    bundle(&config, dir.path()).await.expect("bundle");

    let code = read(dist(dir.path()).join("main.js"));
    assert_contains(&code, "esm-version");
    assert_contains(&code, "export");
}

const MODERN_SYNTAX: &str = "\
const settings = globalThis.settings;
const base = globalThis.base;
const exponent = globalThis.exponent;
console.log(base ** exponent);
console.log(settings?.theme);
console.log(settings ?? 'fallback-settings');
";

#[tokio::test]
async fn default_target_lowers_newer_syntax() {
    let dir = project(&[("main.js", MODERN_SYNTAX)]);

    bundle(&BuildConfig::default(), dir.path())
        .await
        .expect("bundle");

    let code = read(dist(dir.path()).join("main.js"));
    assert_contains(&code, "fallback-settings");
    assert_contains(&code, "Math.pow");
    assert!(!code.contains("base ** exponent"), "exponent operator kept:\n{code}");
    assert!(!code.contains("?.theme"), "optional chaining kept:\n{code}");
    assert!(!code.contains("settings ??"), "nullish coalescing kept:\n{code}");
}

#[tokio::test]
async fn esnext_target_keeps_newer_syntax() {
    let dir = project(&[("main.js", MODERN_SYNTAX)]);
    let config = BuildConfig::default().target(EsTarget::ESNext);

    bundle(&config, dir.path()).await.expect("bundle");

    let code = read(dist(dir.path()).join("main.js"));
    assert_contains(&code, "base ** exponent");
    assert_contains(&code, "settings?.theme");
    assert_contains(&code, "settings ?? ");
}

#[tokio::test]
async fn syntax_error_fails_without_writing() {
    let dir = project(&[("main.js", "const = ;\n")]);

    let err = bundle(&BuildConfig::default(), dir.path())
        .await
        .expect_err("syntax error must fail");

    assert!(matches!(err, Error::Bundler(_)), "got {err:?}");
    assert!(err.is_recoverable());
    assert!(list_dir(&dist(dir.path())).is_empty());
}

#[tokio::test]
async fn failed_run_keeps_previous_output() {
    let dir = project(&[("main.js", "console.log('good-build');\n")]);
    bundle(&BuildConfig::default(), dir.path())
        .await
        .expect("first bundle");

    std::fs::write(dir.path().join("src/main.js"), "const = ;\n").unwrap();
    assert!(bundle(&BuildConfig::default(), dir.path()).await.is_err());

    assert_contains(&read(dist(dir.path()).join("main.js")), "good-build");
}

#[tokio::test]
async fn missing_entry_is_reported_as_recoverable() {
    let dir = project(&[("other.js", "")]);

    let err = bundle(&BuildConfig::default(), dir.path())
        .await
        .expect_err("missing entry");

    assert!(matches!(err, Error::EntryNotFound(_)));
    assert!(err.is_recoverable());
    assert!(list_dir(&dist(dir.path())).is_empty());
}

#[tokio::test]
async fn repeated_runs_are_byte_identical() {
    let dir = project(&[
        ("util.js", "export const n = 41;\n"),
        ("main.js", "import { n } from './util.js';\nconsole.log(n + 1);\n"),
    ]);
    let config = BuildConfig::default();
    let out = dist(dir.path());

    bundle(&config, dir.path()).await.expect("first");
    let first = (read(out.join("main.js")), read(out.join("main.js.map")));

    bundle(&config, dir.path()).await.expect("second");
    let second = (read(out.join("main.js")), read(out.join("main.js.map")));

    assert_eq!(first, second);
    assert_eq!(list_dir(&out), ["main.js", "main.js.map"]);
}

#[tokio::test]
async fn custom_paths_are_honored() {
    let dir = project(&[("app/index.js", "console.log('custom-entry');\n")]);
    let config = BuildConfig::new("index.js", "./src/app").dist_path("./public/build");

    let written = bundle(&config, dir.path()).await.expect("bundle");

    assert_eq!(written.out_dir, dir.path().join("public/build"));
    assert_contains(
        &read(dir.path().join("public/build/index.js")),
        "custom-entry",
    );
}
