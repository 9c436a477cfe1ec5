//! Diagnostic record of a single resolution.
//!
//! Produced by [`Resolver::explain`](crate::Resolver::explain). Carries the
//! per-candidate match outcome, the dominance relation among the matches,
//! and the final result, so a caller can show why a candidate won or why a
//! request was ambiguous.

use std::fmt;

use poly_ir::{Bindings, MatchFailure, Pattern, PatternKind, Symbol, TypeDesc};

use crate::{BoundImplementation, ResolutionError};

/// How one candidate fared against the arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateTrace {
    pub declared_order: usize,
    pub label: Symbol,
    pub pattern: Pattern,
    pub kind: PatternKind,
    pub outcome: Result<Bindings, MatchFailure>,
}

impl CandidateTrace {
    #[inline]
    pub fn matched(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionTrace {
    pub generic: Symbol,
    /// Empty when an argument exceeded the depth limit.
    pub args: Vec<TypeDesc>,
    /// Every candidate in declared order, matched or not.
    pub candidates: Vec<CandidateTrace>,
    /// `(winner, loser)` pairs of declared orders among the matching
    /// candidates, where `winner` is strictly more specific.
    pub dominance: Vec<(usize, usize)>,
    pub outcome: Result<BoundImplementation, ResolutionError>,
}

impl ResolutionTrace {
    /// Candidates whose pattern accepted the arguments.
    pub fn matches(&self) -> impl Iterator<Item = &CandidateTrace> {
        self.candidates.iter().filter(|c| c.matched())
    }

    /// Whether the candidate with `declared_order` is beaten by some other
    /// match.
    pub fn is_dominated(&self, declared_order: usize) -> bool {
        self.dominance.iter().any(|&(_, loser)| loser == declared_order)
    }
}

impl fmt::Display for ResolutionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resolve `{}` [", self.generic)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        writeln!(f, "]")?;

        for c in &self.candidates {
            write!(f, "  #{} `{}` {} ({}): ", c.declared_order, c.label, c.pattern, c.kind)?;
            match &c.outcome {
                Ok(bindings) if self.is_dominated(c.declared_order) => {
                    writeln!(f, "matched {bindings}, dominated")?;
                }
                Ok(bindings) => writeln!(f, "matched {bindings}, maximal")?,
                Err(failure) => writeln!(f, "rejected: {failure}")?,
            }
        }

        match &self.outcome {
            Ok(bound) => write!(f, "  => #{} `{}`", bound.declared_order(), bound.candidate().label()),
            Err(err) => write!(f, "  => error: {err}"),
        }
    }
}
