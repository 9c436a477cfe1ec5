//! Natural types of construction values, before decay.

use std::fmt;

use poly_ir::{ensure_sufficient_stack, Symbol};

/// The type a construction value has at the call site.
///
/// Richer than [`TypeDesc`](poly_ir::TypeDesc): it still carries references,
/// qualifiers and callables, which lowering removes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RawType {
    Named(Symbol),
    /// Immutability qualifier.
    Qualified(Box<RawType>),
    Reference(Box<RawType>),
    Pointer(Box<RawType>),
    /// Fixed-size sequence.
    Array { elem: Box<RawType>, len: usize },
    /// A function, identified by its signature.
    Callable(Symbol),
}

impl RawType {
    pub fn named(name: impl Into<Symbol>) -> Self {
        RawType::Named(name.into())
    }

    pub fn qualified(inner: RawType) -> Self {
        RawType::Qualified(Box::new(inner))
    }

    pub fn reference(inner: RawType) -> Self {
        RawType::Reference(Box::new(inner))
    }

    pub fn pointer(inner: RawType) -> Self {
        RawType::Pointer(Box::new(inner))
    }

    pub fn array(elem: RawType, len: usize) -> Self {
        RawType::Array {
            elem: Box::new(elem),
            len,
        }
    }

    pub fn callable(signature: impl Into<Symbol>) -> Self {
        RawType::Callable(signature.into())
    }

    /// A character-sequence literal of `len` characters, terminator included.
    pub fn string_literal(len: usize) -> Self {
        RawType::qualified(RawType::array(RawType::named("char"), len))
    }

    /// This type with outer references removed.
    pub fn strip_references(&self) -> &RawType {
        let mut ty = self;
        while let RawType::Reference(inner) = ty {
            ty = &**inner;
        }
        ty
    }

    /// This type with outer references and top-level qualifiers removed.
    pub fn strip_outer(&self) -> &RawType {
        let mut ty = self;
        while let RawType::Reference(inner) | RawType::Qualified(inner) = ty {
            ty = &**inner;
        }
        ty
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            RawType::Named(name) => write!(f, "{name}"),
            RawType::Qualified(inner) => write!(f, "const {inner}"),
            RawType::Reference(inner) => write!(f, "&{inner}"),
            RawType::Pointer(inner) => write!(f, "*{inner}"),
            RawType::Array { elem, len } => write!(f, "[{elem}; {len}]"),
            RawType::Callable(signature) => write!(f, "fn {signature}"),
        })
    }
}
