//! Catalog error types.

use poly_ir::{Pattern, Symbol, TypeDesc};

/// A generic name was looked up but never declared or registered.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown generic `{generic}`")]
pub struct UnknownGeneric {
    pub generic: Symbol,
}

/// Registration of a declaration or a candidate was refused.
///
/// A refused registration leaves the catalog unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// A candidate with the same pattern (up to variable renaming) exists.
    #[error("generic `{generic}` already has a candidate for {pattern} (#{existing})")]
    DuplicatePattern {
        generic: Symbol,
        pattern: Pattern,
        /// Declared order of the candidate already holding the pattern.
        existing: usize,
    },

    /// The generic has been resolved at least once and no longer accepts
    /// candidates.
    #[error("generic `{generic}` is sealed: it has already been resolved")]
    CatalogSealed { generic: Symbol },

    /// The pattern's slot count differs from the generic's arity.
    #[error("pattern {pattern} has {found} slots but generic `{generic}` takes {expected}")]
    ArityMismatch {
        generic: Symbol,
        pattern: Pattern,
        expected: usize,
        found: usize,
    },

    /// `declare` was called for a name that already has an entry.
    #[error("generic `{generic}` is already declared")]
    AlreadyDeclared { generic: Symbol },

    /// A parameter default contains a pattern variable.
    #[error("default {default} for parameter `{param}` of `{generic}` is not concrete")]
    NonConcreteDefault {
        generic: Symbol,
        param: Symbol,
        default: TypeDesc,
    },
}
