//! The `check` command: summarize the catalog and validate guides and queries.

use std::io::{self, Write};

use poly_ir::PatternKind;

use crate::LoadedManifest;

/// Print one line per generic, then every problem found.
///
/// A guide whose forced list has variables or the wrong arity, or a query
/// naming an undeclared generic, is a problem.
pub fn check(manifest: &LoadedManifest, out: &mut impl Write) -> io::Result<bool> {
    let catalog = &manifest.catalog;
    let mut problems = Vec::new();

    for name in catalog.generics() {
        let (Ok(decl), Ok(candidates)) = (
            catalog.declaration(name.as_str()),
            catalog.candidates_for(name.as_str()),
        ) else {
            continue;
        };
        let count = |kind: PatternKind| candidates.iter().filter(|c| c.kind() == kind).count();
        writeln!(
            out,
            "{name}/{}: {} candidates ({} full, {} partial, {} primary)",
            decl.arity(),
            candidates.len(),
            count(PatternKind::Full),
            count(PatternKind::Partial),
            count(PatternKind::Primary),
        )?;

        for guide in manifest.guides_for(name.as_str()) {
            if guide.forced.len() != decl.arity() {
                problems.push(format!(
                    "guide `{}` of `{name}` forces {} arguments, expected {}",
                    guide.label,
                    guide.forced.len(),
                    decl.arity()
                ));
            }
            if let Some(arg) = guide.forced.iter().find(|arg| !arg.is_concrete()) {
                problems.push(format!(
                    "guide `{}` of `{name}` forces non-concrete argument {arg}",
                    guide.label
                ));
            }
        }
    }

    for (index, query) in manifest.queries.iter().enumerate() {
        if !catalog.contains(query.generic.as_str()) {
            problems.push(format!("query #{index} names unknown generic `{}`", query.generic));
        }
    }

    for problem in &problems {
        writeln!(out, "problem: {problem}")?;
    }
    Ok(problems.is_empty())
}
