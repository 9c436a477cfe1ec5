//! Resolution error types.

use std::fmt;

use poly_catalog::{Candidate, UnknownGeneric};
use poly_ir::{Pattern, Symbol, TypeDesc};

/// A candidate that tied for most specific.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TiedCandidate {
    pub declared_order: usize,
    pub label: Symbol,
    pub pattern: Pattern,
}

impl From<&Candidate> for TiedCandidate {
    fn from(candidate: &Candidate) -> Self {
        TiedCandidate {
            declared_order: candidate.declared_order,
            label: candidate.label().clone(),
            pattern: candidate.pattern.clone(),
        }
    }
}

impl fmt::Display for TiedCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} `{}` {}", self.declared_order, self.label, self.pattern)
    }
}

/// Why a resolution or deduction request produced no implementation.
///
/// Every variant is an ordinary outcome for the caller to handle; the engine
/// never recovers from one by picking a default.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("unknown generic `{generic}`")]
    UnknownGeneric { generic: Symbol },

    /// No candidate pattern accepts the arguments.
    #[error("no candidate of `{generic}` accepts {}", list(args))]
    NoMatch { generic: Symbol, args: Vec<TypeDesc> },

    /// Several matching candidates are maximal and none dominates the others.
    #[error(
        "ambiguous instantiation of `{generic}` for {}: candidates {} are equally specific",
        list(args),
        list(tied_candidates)
    )]
    Ambiguous {
        generic: Symbol,
        args: Vec<TypeDesc>,
        /// Every maximal candidate, in declared order.
        tied_candidates: Vec<TiedCandidate>,
    },

    /// Deduction could not determine a required parameter.
    #[error("cannot deduce parameter `{param}` (#{index}) of `{generic}`")]
    UndeducedParameter {
        generic: Symbol,
        param: Symbol,
        index: usize,
    },

    /// An argument handed to resolution contains a pattern variable.
    #[error("argument #{index} of `{generic}` is not concrete: {arg}")]
    NonConcreteArgument {
        generic: Symbol,
        index: usize,
        arg: TypeDesc,
    },

    /// An argument is nested deeper than [`MAX_ARGUMENT_DEPTH`]. The argument
    /// itself is not kept.
    #[error("argument #{index} of `{generic}` is nested {depth} levels deep, the limit is {limit}")]
    ArgumentTooDeep {
        generic: Symbol,
        index: usize,
        depth: usize,
        limit: usize,
    },

    /// Deduction received more construction values than the generic has
    /// parameters.
    #[error("`{generic}` takes {expected} parameters, {found} values were supplied")]
    TooManyValues {
        generic: Symbol,
        expected: usize,
        found: usize,
    },
}

impl From<UnknownGeneric> for ResolutionError {
    fn from(err: UnknownGeneric) -> Self {
        ResolutionError::UnknownGeneric {
            generic: err.generic,
        }
    }
}

/// Deepest argument nesting resolution accepts. Matching, binding and the
/// error reports clone and compare arguments structurally.
pub const MAX_ARGUMENT_DEPTH: usize = 256;

/// Reject arguments nested too deeply or containing variables.
pub fn check_concrete(generic: &Symbol, args: &[TypeDesc]) -> Result<(), ResolutionError> {
    for (index, arg) in args.iter().enumerate() {
        let depth = arg.depth();
        if depth > MAX_ARGUMENT_DEPTH {
            return Err(ResolutionError::ArgumentTooDeep {
                generic: generic.clone(),
                index,
                depth,
                limit: MAX_ARGUMENT_DEPTH,
            });
        }
    }
    match args.iter().position(|arg| !arg.is_concrete()) {
        Some(index) => Err(ResolutionError::NonConcreteArgument {
            generic: generic.clone(),
            index,
            arg: args[index].clone(),
        }),
        None => Ok(()),
    }
}

fn list<T: fmt::Display>(items: &[T]) -> String {
    let items: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}
