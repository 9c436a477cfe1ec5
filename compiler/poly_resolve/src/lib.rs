//! Specialization resolution.
//!
//! Given a generic name and a concrete argument list, the [`Resolver`]
//! returns the single most specific matching candidate of the catalog, or a
//! typed failure:
//!
//! 1. Seal the generic and match every candidate pattern against the
//!    arguments.
//! 2. Order the matches by specificity: `A` is more specific than `B` when
//!    every argument list `A` accepts is also accepted by `B`, but not the
//!    other way round.
//! 3. Keep the maximal matches. One maximal match wins; several are reported
//!    as [`ResolutionError::Ambiguous`] in declared order, never tie-broken.
//!
//! Resolution is a pure function of the sealed snapshot and the arguments:
//! repeating a call returns an identical result.

mod bound;
mod error;
mod resolver;
mod specificity;
mod trace;

pub use bound::BoundImplementation;
pub use error::{check_concrete, ResolutionError, TiedCandidate, MAX_ARGUMENT_DEPTH};
pub use resolver::{resolve, Resolver};
pub use specificity::{compare, maximal, Specificity};
pub use trace::{CandidateTrace, ResolutionTrace};
