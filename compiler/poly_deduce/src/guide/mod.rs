//! Deduction guides.
//!
//! A guide pairs a list of raw-type shapes with the argument list to use when
//! every construction value fits its shape. Guides override decay: the forced
//! list is taken verbatim.

use std::fmt;

use poly_ir::{ensure_sufficient_stack, Symbol, TypeDesc};

use crate::RawType;

/// A shape a raw type can be tested against.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RawShape {
    /// Any type at all.
    Any,
    Named(Symbol),
    Qualified(Box<RawShape>),
    Pointer(Box<RawShape>),
    /// A sequence; `len: None` accepts every length.
    Array {
        elem: Box<RawShape>,
        #[cfg_attr(feature = "serde", serde(default))]
        len: Option<usize>,
    },
    /// A callable; `None` accepts every signature.
    Callable(Option<Symbol>),
}

impl RawShape {
    pub fn named(name: impl Into<Symbol>) -> Self {
        RawShape::Named(name.into())
    }

    pub fn qualified(inner: RawShape) -> Self {
        RawShape::Qualified(Box::new(inner))
    }

    pub fn pointer(inner: RawShape) -> Self {
        RawShape::Pointer(Box::new(inner))
    }

    pub fn array(elem: RawShape, len: Option<usize>) -> Self {
        RawShape::Array {
            elem: Box::new(elem),
            len,
        }
    }

    /// Whether `raw` fits this shape.
    ///
    /// Exact on qualifiers: `Named("int")` does not accept `const int`.
    /// References anywhere in the value are looked through.
    pub fn matches(&self, raw: &RawType) -> bool {
        ensure_sufficient_stack(|| match (self, raw.strip_references()) {
            (RawShape::Any, _) => true,
            (RawShape::Named(expected), RawType::Named(found)) => expected == found,
            (RawShape::Qualified(shape), RawType::Qualified(inner))
            | (RawShape::Pointer(shape), RawType::Pointer(inner)) => shape.matches(inner),
            (
                RawShape::Array { elem: shape, len },
                RawType::Array {
                    elem,
                    len: found_len,
                },
            ) => len.map_or(true, |len| len == *found_len) && shape.matches(elem),
            (RawShape::Callable(expected), RawType::Callable(found)) => {
                expected.as_ref().map_or(true, |sig| sig == found)
            }
            _ => false,
        })
    }
}

impl fmt::Display for RawShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            RawShape::Any => f.write_str("_"),
            RawShape::Named(name) => write!(f, "{name}"),
            RawShape::Qualified(inner) => write!(f, "const {inner}"),
            RawShape::Pointer(inner) => write!(f, "*{inner}"),
            RawShape::Array { elem, len: Some(len) } => write!(f, "[{elem}; {len}]"),
            RawShape::Array { elem, len: None } => write!(f, "[{elem}; _]"),
            RawShape::Callable(Some(signature)) => write!(f, "fn {signature}"),
            RawShape::Callable(None) => f.write_str("fn _"),
        })
    }
}

/// "When constructed from values shaped like `shapes`, use `forced`."
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeductionGuide {
    /// Names the guide in deduction results.
    pub label: Symbol,
    /// One shape per construction value.
    pub shapes: Vec<RawShape>,
    /// The argument list to resolve with. Must be concrete.
    pub forced: Vec<TypeDesc>,
}

impl DeductionGuide {
    pub fn new(label: impl Into<Symbol>, shapes: Vec<RawShape>, forced: Vec<TypeDesc>) -> Self {
        DeductionGuide {
            label: label.into(),
            shapes,
            forced,
        }
    }

    /// Whether every value fits its shape, counts included.
    pub fn matches(&self, values: &[RawType]) -> bool {
        self.shapes.len() == values.len()
            && self
                .shapes
                .iter()
                .zip(values)
                .all(|(shape, value)| shape.matches(value))
    }
}
