//! Core value types for the poly dispatch engine.
//!
//! Everything the catalog and resolver reason about is built from the
//! types in this crate:
//! - [`Symbol`]: cheap-to-clone identity for type names, variables and generics
//! - [`TypeDesc`]: a concrete type argument or a pattern fragment
//! - [`Pattern`]: the ordered slot list a candidate accepts
//! - [`Bindings`]: what pattern variables were bound to by a successful match
//!
//! # Matching
//!
//! [`match_pattern`] is one-way unification of a pattern against a concrete
//! argument list. [`is_instance_of`] reuses the same walk to compare two
//! patterns, which is what the resolver's specificity order is built on.

mod bindings;
mod pattern;
mod stack;
mod symbol;
mod ty;
mod unify;

pub use bindings::Bindings;
pub use pattern::{Pattern, PatternKind};
pub use stack::ensure_sufficient_stack;
pub use symbol::Symbol;
pub use ty::{TypeDesc, VarId};
pub use unify::{is_instance_of, match_pattern, unify, MatchFailure, SlotMismatch};
