//! The `run` command: evaluate every query.

use std::io::{self, Write};

use crate::query::evaluate;
use crate::LoadedManifest;

/// Print one report line per query and a summary.
///
/// Fails when any query misses its expectation or errors without one.
pub fn run(manifest: &LoadedManifest, out: &mut impl Write) -> io::Result<bool> {
    let mut failures = 0usize;
    for (index, query) in manifest.queries.iter().enumerate() {
        let report = evaluate(manifest, query);
        if report.is_failure() {
            failures += 1;
        }
        writeln!(out, "#{index} {report}")?;
    }
    writeln!(
        out,
        "{} queries, {} failed",
        manifest.queries.len(),
        failures
    )?;
    Ok(failures == 0)
}
