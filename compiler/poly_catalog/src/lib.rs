//! Candidate catalog for generic dispatch.
//!
//! The catalog maps each generic name to its declaration and to the ordered
//! list of candidates competing to serve it. Entries are filled during startup
//! and sealed on their first resolution; from then on they are read-only and
//! can be read concurrently without locking.
//!
//! # Design
//!
//! - One entry per generic, holding a [`GenericDecl`] and its candidates
//! - Candidates keep their registration order (`declared_order`), which only
//!   orders error reports and never affects which candidate wins
//! - Duplicate detection compares patterns up to variable renaming
//! - Sealing publishes an immutable snapshot shared by every later reader

mod catalog;
mod decl;
mod error;
mod implementation;

pub use catalog::{Candidate, Catalog};
pub use decl::{GenericDecl, ParamDecl, Passing};
pub use error::{RegistrationError, UnknownGeneric};
pub use implementation::{CapabilityPredicate, CustomPredicate, Implementation};
