//! Implementation handles and capability gates.
//!
//! An [`Implementation`] is the payload a candidate stands for. The engine
//! never calls into it; it only exposes what the implementation offers:
//! - a fixed set of operations, available for every instantiation
//! - optional capabilities, each gated by a [`CapabilityPredicate`] evaluated
//!   against the bindings of a particular resolution
//!
//! Callers ask `has_capability` before invoking a gated operation, so an
//! unsupported operation is rejected up front rather than failing somewhere
//! inside the payload.

use std::fmt;
use std::sync::Arc;

use poly_ir::{unify, Bindings, Symbol, TypeDesc, VarId};

/// An opaque implementation handle.
#[derive(Clone, Debug)]
pub struct Implementation {
    label: Symbol,
    operations: Vec<Symbol>,
    gates: Vec<(Symbol, CapabilityPredicate)>,
}

impl Implementation {
    /// Create an implementation with no operations and no capabilities.
    pub fn new(label: impl Into<Symbol>) -> Self {
        Implementation {
            label: label.into(),
            operations: Vec::new(),
            gates: Vec::new(),
        }
    }

    /// Add operations to the always-available set.
    #[must_use]
    pub fn with_operations<S: Into<Symbol>>(mut self, operations: impl IntoIterator<Item = S>) -> Self {
        self.operations.extend(operations.into_iter().map(Into::into));
        self
    }

    /// Gate `capability` behind `predicate`.
    ///
    /// Gating the same capability twice keeps the first gate.
    #[must_use]
    pub fn with_capability(mut self, capability: impl Into<Symbol>, predicate: CapabilityPredicate) -> Self {
        let capability = capability.into();
        if !self.gates.iter().any(|(existing, _)| *existing == capability) {
            self.gates.push((capability, predicate));
        }
        self
    }

    #[inline]
    pub fn label(&self) -> &Symbol {
        &self.label
    }

    #[inline]
    pub fn operations(&self) -> &[Symbol] {
        &self.operations
    }

    /// Capabilities this implementation gates, in declaration order.
    pub fn capabilities(&self) -> impl Iterator<Item = &Symbol> {
        self.gates.iter().map(|(capability, _)| capability)
    }

    pub fn supports_operation(&self, operation: &str) -> bool {
        self.operations.iter().any(|op| *op == operation)
    }

    /// The predicate gating `capability`, if the implementation has one.
    pub fn gate(&self, capability: &str) -> Option<&CapabilityPredicate> {
        self.gates
            .iter()
            .find(|(existing, _)| *existing == capability)
            .map(|(_, predicate)| predicate)
    }

    /// Evaluate the gate for `capability` against `bindings`.
    ///
    /// Capabilities without a gate are unsupported.
    pub fn has_capability(&self, capability: &str, bindings: &Bindings) -> bool {
        self.gate(capability)
            .is_some_and(|predicate| predicate.evaluate(bindings))
    }
}

/// A boolean condition over the bound types of a resolution.
#[derive(Clone, Debug)]
pub enum CapabilityPredicate {
    /// Always satisfied.
    Always,

    /// Satisfied when `var` is bound and its type unifies with one of the
    /// `accepted` type patterns.
    VarMatches {
        var: VarId,
        accepted: Vec<TypeDesc>,
    },

    /// Satisfied when every inner predicate is.
    All(Vec<CapabilityPredicate>),

    /// Satisfied when at least one inner predicate is.
    Any(Vec<CapabilityPredicate>),

    /// Embedder-supplied check.
    Custom(CustomPredicate),
}

impl CapabilityPredicate {
    /// `var` must be bound to one of `accepted`.
    pub fn var_matches(var: impl Into<Symbol>, accepted: impl IntoIterator<Item = TypeDesc>) -> Self {
        CapabilityPredicate::VarMatches {
            var: VarId::new(var),
            accepted: accepted.into_iter().collect(),
        }
    }

    /// Wrap a closure as a predicate.
    pub fn custom(f: impl Fn(&Bindings) -> bool + Send + Sync + 'static) -> Self {
        CapabilityPredicate::Custom(CustomPredicate(Arc::new(f)))
    }

    pub fn evaluate(&self, bindings: &Bindings) -> bool {
        match self {
            CapabilityPredicate::Always => true,
            CapabilityPredicate::VarMatches { var, accepted } => bindings.get(var).is_some_and(|bound| {
                accepted
                    .iter()
                    .any(|pattern| unify(pattern, bound, &mut Bindings::new()).is_ok())
            }),
            CapabilityPredicate::All(inner) => inner.iter().all(|p| p.evaluate(bindings)),
            CapabilityPredicate::Any(inner) => inner.iter().any(|p| p.evaluate(bindings)),
            CapabilityPredicate::Custom(custom) => (custom.0)(bindings),
        }
    }
}

/// A shareable predicate closure.
#[derive(Clone)]
pub struct CustomPredicate(Arc<dyn Fn(&Bindings) -> bool + Send + Sync>);

impl fmt::Debug for CustomPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomPredicate(..)")
    }
}
