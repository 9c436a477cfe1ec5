//! The catalog proper.
//!
//! # Concurrency
//!
//! Every entry carries its own registration lock. Registration takes the
//! write side and checks the seal while holding it; sealing takes the read
//! side while it publishes the snapshot. A registration racing the first
//! resolution therefore either lands in the snapshot or fails with
//! [`RegistrationError::CatalogSealed`]; it can never be silently dropped.
//! After sealing, readers clone the snapshot `Arc` without taking any lock.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use poly_ir::{Pattern, PatternKind, Symbol};
use rustc_hash::FxHashMap;

use crate::{GenericDecl, Implementation, RegistrationError, UnknownGeneric};

/// A candidate competing to serve a generic.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// Argument lists this candidate accepts.
    pub pattern: Pattern,

    /// The payload selected when this candidate wins.
    pub implementation: Arc<Implementation>,

    /// Zero-based registration index within the generic. Orders error
    /// reports; never consulted when ranking.
    pub declared_order: usize,

    kind: PatternKind,
    canonical: Pattern,
}

impl Candidate {
    fn new(pattern: Pattern, implementation: Implementation, declared_order: usize) -> Self {
        Candidate {
            kind: pattern.kind(),
            canonical: pattern.canonical(),
            pattern,
            implementation: Arc::new(implementation),
            declared_order,
        }
    }

    #[inline]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    #[inline]
    pub fn label(&self) -> &Symbol {
        self.implementation.label()
    }
}

/// Per-generic state.
struct Entry {
    decl: GenericDecl,
    /// Candidates in declared order. Only written while unsealed.
    pending: RwLock<Vec<Candidate>>,
    /// Set exactly once, on first resolution.
    sealed: OnceLock<Arc<[Candidate]>>,
}

impl Entry {
    fn new(decl: GenericDecl) -> Self {
        Entry {
            decl,
            pending: RwLock::new(Vec::new()),
            sealed: OnceLock::new(),
        }
    }

    fn push(&self, pattern: Pattern, implementation: Implementation) -> Result<usize, RegistrationError> {
        let mut pending = self.pending.write();
        let generic = &self.decl.name;

        if self.sealed.get().is_some() {
            return Err(RegistrationError::CatalogSealed {
                generic: generic.clone(),
            });
        }

        if pattern.arity() != self.decl.arity() {
            return Err(RegistrationError::ArityMismatch {
                generic: generic.clone(),
                expected: self.decl.arity(),
                found: pattern.arity(),
                pattern,
            });
        }

        let canonical = pattern.canonical();
        if let Some(existing) = pending.iter().find(|c| c.canonical == canonical) {
            return Err(RegistrationError::DuplicatePattern {
                generic: generic.clone(),
                existing: existing.declared_order,
                pattern,
            });
        }

        let declared_order = pending.len();
        let candidate = Candidate::new(pattern, implementation, declared_order);
        tracing::debug!(
            %generic,
            declared_order,
            pattern = %candidate.pattern,
            kind = %candidate.kind,
            label = %candidate.label(),
            "registered candidate"
        );
        pending.push(candidate);
        Ok(declared_order)
    }

    fn seal(&self) -> Arc<[Candidate]> {
        if let Some(snapshot) = self.sealed.get() {
            return Arc::clone(snapshot);
        }

        let pending = self.pending.read();
        let snapshot = self.sealed.get_or_init(|| {
            tracing::debug!(generic = %self.decl.name, candidates = pending.len(), "sealing generic");
            Arc::from(pending.as_slice())
        });
        Arc::clone(snapshot)
    }

    fn candidates(&self) -> Arc<[Candidate]> {
        match self.sealed.get() {
            Some(snapshot) => Arc::clone(snapshot),
            None => Arc::from(self.pending.read().as_slice()),
        }
    }
}

/// Registry of generics and their candidates.
#[derive(Default)]
pub struct Catalog {
    entries: RwLock<FxHashMap<Symbol, Arc<Entry>>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // === Registration ===

    /// Declare a generic explicitly, fixing its arity, passing modes and
    /// defaults.
    ///
    /// Must come before any `register` for the same name.
    pub fn declare(&self, decl: GenericDecl) -> Result<(), RegistrationError> {
        for param in &decl.params {
            if let Some(default) = param.default.as_ref().filter(|d| !d.is_concrete()) {
                return Err(RegistrationError::NonConcreteDefault {
                    generic: decl.name.clone(),
                    param: param.name.clone(),
                    default: default.clone(),
                });
            }
        }

        let mut entries = self.entries.write();
        if entries.contains_key(&decl.name) {
            return Err(RegistrationError::AlreadyDeclared {
                generic: decl.name.clone(),
            });
        }
        tracing::debug!(generic = %decl.name, arity = decl.arity(), "declared generic");
        entries.insert(decl.name.clone(), Arc::new(Entry::new(decl)));
        Ok(())
    }

    /// Add a candidate for `name`, returning its declared order.
    ///
    /// A name seen for the first time is declared implicitly with the
    /// pattern's arity (see [`GenericDecl::implicit`]).
    pub fn register(
        &self,
        name: impl Into<Symbol>,
        pattern: Pattern,
        implementation: Implementation,
    ) -> Result<usize, RegistrationError> {
        let name = name.into();
        let entry = self.entry_or_declare(&name, pattern.arity());
        entry.push(pattern, implementation)
    }

    fn entry_or_declare(&self, name: &Symbol, arity: usize) -> Arc<Entry> {
        if let Some(entry) = self.entries.read().get(name) {
            return Arc::clone(entry);
        }
        let mut entries = self.entries.write();
        let entry = entries
            .entry(name.clone())
            .or_insert_with(|| Arc::new(Entry::new(GenericDecl::implicit(name.clone(), arity))));
        Arc::clone(entry)
    }

    // === Sealing ===

    /// Mark `name` read-only. Idempotent.
    pub fn seal(&self, name: &str) -> Result<(), UnknownGeneric> {
        self.entry(name)?.seal();
        Ok(())
    }

    /// Seal `name` and return its candidate snapshot.
    ///
    /// This is what resolution reads: every resolution of the same name sees
    /// the same snapshot.
    pub fn sealed_candidates(&self, name: &str) -> Result<Arc<[Candidate]>, UnknownGeneric> {
        Ok(self.entry(name)?.seal())
    }

    #[inline]
    pub fn is_sealed(&self, name: &str) -> bool {
        self.entries
            .read()
            .get(name)
            .is_some_and(|entry| entry.sealed.get().is_some())
    }

    // === Lookup ===

    /// Candidates of `name` in declared order. Does not seal.
    pub fn candidates_for(&self, name: &str) -> Result<Arc<[Candidate]>, UnknownGeneric> {
        Ok(self.entry(name)?.candidates())
    }

    pub fn declaration(&self, name: &str) -> Result<GenericDecl, UnknownGeneric> {
        Ok(self.entry(name)?.decl.clone())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// All generic names, sorted.
    pub fn generics(&self) -> Vec<Symbol> {
        let mut names: Vec<_> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn entry(&self, name: &str) -> Result<Arc<Entry>, UnknownGeneric> {
        self.entries
            .read()
            .get(name)
            .map(Arc::clone)
            .ok_or_else(|| UnknownGeneric {
                generic: Symbol::new(name),
            })
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("generics", &self.generics())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
mod tests;
