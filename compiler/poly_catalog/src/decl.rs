//! Generic declarations.

use poly_ir::{Symbol, TypeDesc};

/// How a parameter accepts its construction value during deduction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Passing {
    /// The value is copied: decay rules apply.
    #[default]
    ByValue,
    /// The value is referenced: its natural type is kept as-is.
    ByReference,
}

/// One type parameter of a generic.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamDecl {
    /// Parameter name, used in error messages.
    pub name: Symbol,

    /// How deduction treats the value supplied for this parameter.
    pub passing: Passing,

    /// Used when deduction receives no value for this parameter.
    /// Must be concrete.
    pub default: Option<TypeDesc>,
}

impl ParamDecl {
    pub fn by_value(name: impl Into<Symbol>) -> Self {
        ParamDecl {
            name: name.into(),
            passing: Passing::ByValue,
            default: None,
        }
    }

    pub fn by_reference(name: impl Into<Symbol>) -> Self {
        ParamDecl {
            name: name.into(),
            passing: Passing::ByReference,
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: TypeDesc) -> Self {
        self.default = Some(default);
        self
    }
}

/// Declaration of a generic: its name and type parameters.
///
/// The number of parameters fixes the arity every candidate pattern must have.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenericDecl {
    pub name: Symbol,
    pub params: Vec<ParamDecl>,
}

impl GenericDecl {
    pub fn new(name: impl Into<Symbol>, params: Vec<ParamDecl>) -> Self {
        GenericDecl {
            name: name.into(),
            params,
        }
    }

    /// The declaration assumed when a generic is first seen through
    /// `register`: by-value parameters `T0..Tn`, no defaults.
    pub fn implicit(name: impl Into<Symbol>, arity: usize) -> Self {
        GenericDecl::new(
            name,
            (0..arity)
                .map(|i| ParamDecl::by_value(format!("T{i}")))
                .collect(),
        )
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
