//! Running manifest queries.

use std::fmt;

use poly_deduce::{deduce, Deduction};
use poly_resolve::{BoundImplementation, ResolutionError, ResolutionTrace, Resolver};

use crate::manifest::{Expectation, FailureKind, LoadedManifest, Query, QueryInput};

impl FailureKind {
    pub fn of(err: &ResolutionError) -> Self {
        match err {
            ResolutionError::UnknownGeneric { .. } => FailureKind::UnknownGeneric,
            ResolutionError::NoMatch { .. } => FailureKind::NoMatch,
            ResolutionError::Ambiguous { .. } => FailureKind::Ambiguous,
            ResolutionError::UndeducedParameter { .. } => FailureKind::UndeducedParameter,
            ResolutionError::NonConcreteArgument { .. } => FailureKind::NonConcreteArgument,
            ResolutionError::ArgumentTooDeep { .. } => FailureKind::ArgumentTooDeep,
            ResolutionError::TooManyValues { .. } => FailureKind::TooManyValues,
        }
    }
}

impl Expectation {
    /// Whether `outcome` is what this expectation describes.
    pub fn is_met_by(&self, outcome: &Result<BoundImplementation, ResolutionError>) -> bool {
        match (self, outcome) {
            (Expectation::Selects(label), Ok(bound)) => bound.candidate().label() == label,
            (
                Expectation::Ambiguous(labels),
                Err(ResolutionError::Ambiguous {
                    tied_candidates, ..
                }),
            ) => {
                labels.is_empty()
                    || tied_candidates
                        .iter()
                        .map(|t| &t.label)
                        .eq(labels.iter())
            }
            (Expectation::Fails(kind), Err(err)) => FailureKind::of(err) == *kind,
            _ => false,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Selects(label) => write!(f, "selects `{label}`"),
            Expectation::Ambiguous(labels) if labels.is_empty() => f.write_str("ambiguous"),
            Expectation::Ambiguous(labels) => {
                f.write_str("ambiguous between")?;
                for label in labels {
                    write!(f, " `{label}`")?;
                }
                Ok(())
            }
            Expectation::Fails(kind) => write!(f, "fails with {kind:?}"),
        }
    }
}

/// How a query's outcome compares with its expectation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// No expectation was given.
    Unchecked,
    Met,
    Missed(Expectation),
}

/// The full result of running one query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryReport {
    pub query: Query,
    /// Present when the query supplied raw values and deduction succeeded.
    pub deduction: Option<Deduction>,
    pub outcome: Result<BoundImplementation, ResolutionError>,
    pub verdict: Verdict,
}

impl QueryReport {
    /// Whether the report should fail a run: a missed expectation, or an
    /// unexpected error when there was none.
    pub fn is_failure(&self) -> bool {
        match self.verdict {
            Verdict::Unchecked => self.outcome.is_err(),
            Verdict::Met => false,
            Verdict::Missed(_) => true,
        }
    }
}

impl fmt::Display for QueryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query.generic)?;
        match &self.query.input {
            QueryInput::Args(args) => write!(f, "[{}]", join(args))?,
            QueryInput::Values(values) => write!(f, "({})", join(values))?,
        }
        if let Some(deduction) = &self.deduction {
            write!(f, " deduced [{}]", join(&deduction.args))?;
        }
        match &self.outcome {
            Ok(bound) => write!(
                f,
                " -> `{}` {}",
                bound.candidate().label(),
                bound.bindings()
            )?,
            Err(err) => write!(f, " -> error: {err}")?,
        }
        match &self.verdict {
            Verdict::Unchecked => Ok(()),
            Verdict::Met => f.write_str(" [ok]"),
            Verdict::Missed(expected) => write!(f, " [expected: {expected}]"),
        }
    }
}

/// Run `query` against the manifest's catalog.
pub fn evaluate(manifest: &LoadedManifest, query: &Query) -> QueryReport {
    let resolver = Resolver::new(&manifest.catalog);
    let (deduction, outcome) = match &query.input {
        QueryInput::Args(args) => (None, resolver.resolve(query.generic.as_str(), args)),
        QueryInput::Values(values) => {
            let guides = manifest.guides_for(query.generic.as_str());
            match deduce(&manifest.catalog, query.generic.as_str(), values, guides) {
                Ok(deduction) => {
                    let outcome = resolver.resolve(query.generic.as_str(), &deduction.args);
                    (Some(deduction), outcome)
                }
                Err(err) => (None, Err(err)),
            }
        }
    };

    let verdict = match &query.expect {
        None => Verdict::Unchecked,
        Some(expected) if expected.is_met_by(&outcome) => Verdict::Met,
        Some(expected) => Verdict::Missed(expected.clone()),
    };

    QueryReport {
        query: query.clone(),
        deduction,
        outcome,
        verdict,
    }
}

/// Trace `query`. Deduction failures are returned before resolution starts.
pub fn explain(
    manifest: &LoadedManifest,
    query: &Query,
) -> Result<(Option<Deduction>, ResolutionTrace), ResolutionError> {
    let resolver = Resolver::new(&manifest.catalog);
    match &query.input {
        QueryInput::Args(args) => Ok((None, resolver.explain(query.generic.as_str(), args))),
        QueryInput::Values(values) => {
            let guides = manifest.guides_for(query.generic.as_str());
            let deduction = deduce(&manifest.catalog, query.generic.as_str(), values, guides)?;
            let trace = resolver.explain(query.generic.as_str(), &deduction.args);
            Ok((Some(deduction), trace))
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
    items.join(", ")
}
