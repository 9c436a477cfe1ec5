//! The `explain` command: print the resolution trace of every query.

use std::io::{self, Write};

use poly_deduce::DeductionOrigin;

use crate::query;
use crate::LoadedManifest;

/// Print how each query was deduced and resolved, candidate by candidate.
///
/// Passes under the same conditions as [`run`](super::run).
pub fn explain(manifest: &LoadedManifest, out: &mut impl Write) -> io::Result<bool> {
    let mut ok = true;
    for (index, q) in manifest.queries.iter().enumerate() {
        writeln!(out, "#{index}")?;
        match query::explain(manifest, q) {
            Ok((deduction, trace)) => {
                if let Some(deduction) = deduction {
                    let args: Vec<String> = deduction.args.iter().map(ToString::to_string).collect();
                    match deduction.origin {
                        DeductionOrigin::Guide { label, .. } => {
                            writeln!(out, "deduced [{}] by guide `{label}`", args.join(", "))?;
                        }
                        DeductionOrigin::Parameters(sources) => {
                            writeln!(out, "deduced [{}] from parameters {sources:?}", args.join(", "))?;
                        }
                    }
                }
                writeln!(out, "{trace}")?;
            }
            Err(err) => writeln!(out, "deduction failed: {err}")?,
        }
        ok &= !query::evaluate(manifest, q).is_failure();
    }
    Ok(ok)
}
