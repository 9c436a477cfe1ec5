//! Lowering raw types to type descriptors.
//!
//! Both modes first drop outer references and top-level qualifiers. By-value
//! slots then decay:
//!
//! | raw | by value | by reference |
//! |---|---|---|
//! | `[T; n]` | `*T` | `[T; n]` |
//! | `fn sig` | `*sig` | `sig` |
//! | anything else | unchanged | unchanged |
//!
//! Qualifiers below the top level are erased either way: descriptors carry no
//! qualifier information.

use poly_catalog::Passing;
use poly_ir::{ensure_sufficient_stack, TypeDesc};

use crate::RawType;

/// Lower `raw` for a slot with the given passing mode.
pub fn lower(raw: &RawType, passing: Passing) -> TypeDesc {
    match passing {
        Passing::ByValue => decay(raw),
        Passing::ByReference => natural(raw),
    }
}

/// By-value lowering: sequences and callables decay to pointers.
pub fn decay(raw: &RawType) -> TypeDesc {
    match raw.strip_outer() {
        RawType::Array { elem, .. } => TypeDesc::pointer_to(erase(elem)),
        RawType::Callable(signature) => TypeDesc::pointer_to(TypeDesc::leaf(signature)),
        other => erase(other),
    }
}

/// By-reference lowering: the natural type minus references and qualifiers.
pub fn natural(raw: &RawType) -> TypeDesc {
    erase(raw.strip_outer())
}

fn erase(raw: &RawType) -> TypeDesc {
    ensure_sufficient_stack(|| match raw {
        RawType::Named(name) => TypeDesc::leaf(name),
        RawType::Qualified(inner) | RawType::Reference(inner) => erase(inner),
        RawType::Pointer(inner) => TypeDesc::pointer_to(erase(inner)),
        RawType::Array { elem, len } => TypeDesc::array(erase(elem), *len),
        RawType::Callable(signature) => TypeDesc::leaf(signature),
    })
}
