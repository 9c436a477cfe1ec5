//! One-way unification of patterns against argument lists.
//!
//! # Rules
//!
//! - `Leaf(n)` unifies only with `Leaf(n)`.
//! - `PointerTo(p)` unifies only with `PointerTo(c)`, recursing on `p`/`c`.
//! - `Array { elem: p, len }` unifies only with an array of the same length,
//!   recursing on the elements.
//! - `Var(id)` unifies with anything. The first occurrence binds `id`; every
//!   later occurrence must see an equal descriptor.
//!
//! Variables on the argument side are never bound. They behave like leaves
//! that are equal only to themselves, which is what makes [`is_instance_of`]
//! a plain call to [`match_pattern`].

use crate::stack::ensure_sufficient_stack;
use crate::{Bindings, Pattern, TypeDesc, VarId};

/// Why a single slot failed to unify.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SlotMismatch {
    /// The shapes differ (leaf vs pointer, different leaf names, array lengths).
    #[error("expected {expected}, found {found}")]
    Shape {
        /// The pattern fragment that failed.
        expected: TypeDesc,
        /// The argument fragment it was compared with.
        found: TypeDesc,
    },

    /// A repeated variable saw two different descriptors.
    #[error("{var} is already bound to {bound}, found {found}")]
    Conflict {
        var: VarId,
        bound: TypeDesc,
        found: TypeDesc,
    },
}

/// Why a whole pattern failed to match.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatchFailure {
    #[error("pattern has {expected} slots, found {found} arguments")]
    Arity { expected: usize, found: usize },

    #[error("slot {index}: {mismatch}")]
    Slot {
        /// Zero-based slot index.
        index: usize,
        mismatch: SlotMismatch,
    },
}

/// Unify one pattern slot against one argument, extending `bindings`.
///
/// On failure `bindings` may hold partial results; callers that need to keep
/// going after a failure should work on a copy.
pub fn unify(slot: &TypeDesc, arg: &TypeDesc, bindings: &mut Bindings) -> Result<(), SlotMismatch> {
    ensure_sufficient_stack(|| match (slot, arg) {
        (TypeDesc::Var(id), _) => match bindings.get(id) {
            Some(bound) if bound == arg => Ok(()),
            Some(bound) => Err(SlotMismatch::Conflict {
                var: id.clone(),
                bound: bound.clone(),
                found: arg.clone(),
            }),
            None => {
                bindings.insert(id.clone(), arg.clone());
                Ok(())
            }
        },
        (TypeDesc::Leaf(expected), TypeDesc::Leaf(found)) if expected == found => Ok(()),
        (TypeDesc::PointerTo(inner), TypeDesc::PointerTo(arg_inner)) => {
            unify(inner, arg_inner, bindings)
        }
        (
            TypeDesc::Array { elem, len },
            TypeDesc::Array {
                elem: arg_elem,
                len: arg_len,
            },
        ) if len == arg_len => unify(elem, arg_elem, bindings),
        _ => Err(SlotMismatch::Shape {
            expected: slot.clone(),
            found: arg.clone(),
        }),
    })
}

/// Match `pattern` against `args` slot by slot, left to right.
///
/// Stops at the first failing slot.
pub fn match_pattern(pattern: &Pattern, args: &[TypeDesc]) -> Result<Bindings, MatchFailure> {
    if pattern.arity() != args.len() {
        return Err(MatchFailure::Arity {
            expected: pattern.arity(),
            found: args.len(),
        });
    }

    let mut bindings = Bindings::new();
    for (index, (slot, arg)) in pattern.slots().iter().zip(args).enumerate() {
        unify(slot, arg, &mut bindings).map_err(|mismatch| MatchFailure::Slot { index, mismatch })?;
    }
    Ok(bindings)
}

/// Returns `true` if every argument list accepted by `specific` is also
/// accepted by `general`.
///
/// Decided by matching `general` against the slots of `specific`, with the
/// variables of `specific` held rigid. Because leaf names are unbounded, a
/// successful match is exactly the subset relation between the two sets of
/// accepted argument lists; no enumeration is needed.
pub fn is_instance_of(specific: &Pattern, general: &Pattern) -> bool {
    match_pattern(general, specific.slots()).is_ok()
}
