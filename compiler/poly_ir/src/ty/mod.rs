//! Type descriptors.
//!
//! A [`TypeDesc`] is either a concrete type argument (no [`TypeDesc::Var`]
//! anywhere inside it) or a fragment of a pattern. Descriptors are plain
//! immutable values: they are built once during catalog registration or for a
//! single resolution call and never mutated in place.

use std::fmt;

use crate::stack::ensure_sufficient_stack;
use crate::Symbol;

/// Identity of a pattern variable (`?T`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct VarId(pub Symbol);

impl VarId {
    /// Create a variable id from its name.
    pub fn new(name: impl Into<Symbol>) -> Self {
        VarId(name.into())
    }

    /// The variable's name, without the `?` sigil.
    #[inline]
    pub fn name(&self) -> &Symbol {
        &self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0)
    }
}

/// A concrete type argument or a pattern fragment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TypeDesc {
    /// Opaque concrete type, equal only to a leaf of the same name.
    Leaf(Symbol),

    /// Pointer-shaped type.
    PointerTo(Box<TypeDesc>),

    /// Fixed-length sequence. Only produced when a sequence is accepted
    /// without decay, so that different lengths stay distinguishable.
    Array {
        /// Element type.
        elem: Box<TypeDesc>,
        /// Number of elements.
        len: usize,
    },

    /// Free variable. Only meaningful inside a [`Pattern`](crate::Pattern).
    Var(VarId),
}

impl TypeDesc {
    /// Create a leaf type.
    pub fn leaf(name: impl Into<Symbol>) -> Self {
        TypeDesc::Leaf(name.into())
    }

    /// Create a pointer to `inner`.
    pub fn pointer_to(inner: TypeDesc) -> Self {
        TypeDesc::PointerTo(Box::new(inner))
    }

    /// Create a fixed-length sequence of `elem`.
    pub fn array(elem: TypeDesc, len: usize) -> Self {
        TypeDesc::Array {
            elem: Box::new(elem),
            len,
        }
    }

    /// Create a pattern variable.
    pub fn var(name: impl Into<Symbol>) -> Self {
        TypeDesc::Var(VarId::new(name))
    }

    /// Returns `true` if no [`TypeDesc::Var`] occurs anywhere inside.
    pub fn is_concrete(&self) -> bool {
        ensure_sufficient_stack(|| match self {
            TypeDesc::Leaf(_) => true,
            TypeDesc::PointerTo(inner) | TypeDesc::Array { elem: inner, .. } => inner.is_concrete(),
            TypeDesc::Var(_) => false,
        })
    }

    /// Returns `true` for a bare variable (not a variable nested in a pointer).
    #[inline]
    pub fn is_bare_var(&self) -> bool {
        matches!(self, TypeDesc::Var(_))
    }

    /// Nesting depth: 1 for a leaf or variable, plus one per pointer or
    /// sequence layer. Measured without recursion.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut ty = self;
        while let TypeDesc::PointerTo(inner) | TypeDesc::Array { elem: inner, .. } = ty {
            depth += 1;
            ty = &**inner;
        }
        depth
    }

    /// Append every variable not already in `out`, in first-occurrence order.
    pub fn collect_vars(&self, out: &mut Vec<VarId>) {
        ensure_sufficient_stack(|| match self {
            TypeDesc::Leaf(_) => {}
            TypeDesc::PointerTo(inner) | TypeDesc::Array { elem: inner, .. } => {
                inner.collect_vars(out);
            }
            TypeDesc::Var(id) => {
                if !out.contains(id) {
                    out.push(id.clone());
                }
            }
        });
    }

    /// Count every variable occurrence, repeats included.
    pub fn var_occurrences(&self) -> usize {
        ensure_sufficient_stack(|| match self {
            TypeDesc::Leaf(_) => 0,
            TypeDesc::PointerTo(inner) | TypeDesc::Array { elem: inner, .. } => {
                inner.var_occurrences()
            }
            TypeDesc::Var(_) => 1,
        })
    }

    /// Rebuild the descriptor with every variable replaced by `f(var)`.
    pub fn map_vars(&self, f: &mut impl FnMut(&VarId) -> TypeDesc) -> TypeDesc {
        ensure_sufficient_stack(|| match self {
            TypeDesc::Leaf(name) => TypeDesc::Leaf(name.clone()),
            TypeDesc::PointerTo(inner) => TypeDesc::pointer_to(inner.map_vars(f)),
            TypeDesc::Array { elem, len } => TypeDesc::array(elem.map_vars(f), *len),
            TypeDesc::Var(id) => f(id),
        })
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            TypeDesc::Leaf(name) => write!(f, "{name}"),
            TypeDesc::PointerTo(inner) => write!(f, "*{inner}"),
            TypeDesc::Array { elem, len } => write!(f, "[{elem}; {len}]"),
            TypeDesc::Var(id) => write!(f, "{id}"),
        })
    }
}
