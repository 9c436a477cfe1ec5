//! End-to-end tests over the bundled fixture manifest.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::path::PathBuf;

use polyc::query::{evaluate, Verdict};
use polyc::{commands, load, LoadedManifest, ManifestError};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn containers() -> LoadedManifest {
    load(fixture("containers.json")).unwrap()
}

fn output(
    command: fn(&LoadedManifest, &mut Vec<u8>) -> std::io::Result<bool>,
    manifest: &LoadedManifest,
) -> (bool, String) {
    let mut out = Vec::new();
    let ok = command(manifest, &mut out).unwrap();
    (ok, String::from_utf8(out).unwrap())
}

#[test]
fn every_fixture_query_meets_its_expectation() {
    let manifest = containers();
    for query in &manifest.queries {
        let report = evaluate(&manifest, query);
        assert_eq!(report.verdict, Verdict::Met, "{report}");
    }
}

#[test]
fn check_summarizes_generics() {
    let manifest = containers();
    let (ok, out) = output(commands::check, &manifest);

    assert!(ok, "{out}");
    assert_eq!(
        out,
        "Box/1: 3 candidates (1 full, 1 partial, 1 primary)\n\
         Holder/1: 3 candidates (1 full, 1 partial, 1 primary)\n\
         Pair/2: 3 candidates (0 full, 2 partial, 1 primary)\n\
         View/2: 2 candidates (0 full, 1 partial, 1 primary)\n"
    );
}

#[test]
fn run_reports_each_query() {
    let manifest = containers();
    let (ok, out) = output(commands::run, &manifest);

    assert!(ok, "{out}");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), manifest.queries.len() + 1);
    assert_eq!(lines[0], "#0 Box[text] -> `text` {} [ok]");
    assert_eq!(lines[1], "#1 Box[*int] -> `pointer` {?T = int} [ok]");
    assert_eq!(
        lines[6],
        "#6 Holder(const [char; 6]) deduced [string] -> `string` {} [ok]"
    );
    assert_eq!(lines.last().copied(), Some("11 queries, 0 failed"));
}

#[test]
fn explain_prints_traces() {
    let manifest = containers();
    let (ok, out) = output(commands::explain, &manifest);

    assert!(ok, "{out}");
    assert!(out.contains("resolve `Pair` [int, int]"), "{out}");
    assert!(out.contains("deduced [string] by guide `string-literal`"), "{out}");
    assert!(out.contains("deduction failed: cannot deduce parameter `T` (#0) of `View`"), "{out}");
}

#[test]
fn missing_manifest_is_an_io_error() {
    let err = load(fixture("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, ManifestError::Io { .. }), "{err}");
}
