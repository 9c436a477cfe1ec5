//! The result of a successful resolution.

use std::sync::Arc;

use poly_catalog::{Candidate, Implementation};
use poly_ir::{Bindings, Pattern, TypeDesc};

/// The winning candidate together with the bindings its pattern produced.
#[derive(Clone, Debug)]
pub struct BoundImplementation {
    candidate: Candidate,
    bindings: Bindings,
}

impl BoundImplementation {
    pub(crate) fn new(candidate: Candidate, bindings: Bindings) -> Self {
        BoundImplementation {
            candidate,
            bindings,
        }
    }

    #[inline]
    pub fn implementation(&self) -> &Arc<Implementation> {
        &self.candidate.implementation
    }

    #[inline]
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    #[inline]
    pub fn pattern(&self) -> &Pattern {
        &self.candidate.pattern
    }

    #[inline]
    pub fn declared_order(&self) -> usize {
        self.candidate.declared_order
    }

    #[inline]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Whether the capability-gated operation `capability` may be invoked for
    /// this instantiation. Evaluated on demand against the bindings.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.candidate
            .implementation
            .has_capability(capability, &self.bindings)
    }

    /// Whether `operation` is in the implementation's fixed operation set.
    pub fn supports_operation(&self, operation: &str) -> bool {
        self.candidate.implementation.supports_operation(operation)
    }

    /// The winning pattern with its bindings substituted back in.
    pub fn instantiated_args(&self) -> Vec<TypeDesc> {
        self.candidate
            .pattern
            .slots()
            .iter()
            .map(|slot| self.bindings.apply(slot))
            .collect()
    }
}

impl PartialEq for BoundImplementation {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.candidate.implementation, &other.candidate.implementation)
            && self.candidate.declared_order == other.candidate.declared_order
            && self.candidate.pattern == other.candidate.pattern
            && self.bindings == other.bindings
    }
}

impl Eq for BoundImplementation {}
