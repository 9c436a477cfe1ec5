//! Resolution entry points.

use poly_catalog::{Candidate, Catalog};
use poly_ir::{match_pattern, Bindings, Symbol, TypeDesc};
use smallvec::SmallVec;

use crate::error::check_concrete;
use crate::specificity::{compare, maximal, Specificity};
use crate::{BoundImplementation, CandidateTrace, ResolutionError, ResolutionTrace, TiedCandidate};

/// Resolves instantiation requests against a catalog.
///
/// Holds only a borrow; any number of resolvers may share one catalog across
/// threads.
#[derive(Copy, Clone, Debug)]
pub struct Resolver<'cat> {
    catalog: &'cat Catalog,
}

impl<'cat> Resolver<'cat> {
    pub fn new(catalog: &'cat Catalog) -> Self {
        Resolver { catalog }
    }

    #[inline]
    pub fn catalog(&self) -> &'cat Catalog {
        self.catalog
    }

    /// Select the most specific candidate of `name` that accepts `args`.
    ///
    /// Seals `name` on first use. `args` must be concrete.
    #[tracing::instrument(level = "debug", skip_all, fields(generic = %name, arity = args.len()))]
    pub fn resolve(&self, name: &str, args: &[TypeDesc]) -> Result<BoundImplementation, ResolutionError> {
        let generic = Symbol::new(name);
        check_concrete(&generic, args)?;
        let candidates = self.catalog.sealed_candidates(name)?;

        let matches: Vec<(&Candidate, Bindings)> = candidates
            .iter()
            .filter_map(|candidate| match match_pattern(&candidate.pattern, args) {
                Ok(bindings) => Some((candidate, bindings)),
                Err(failure) => {
                    tracing::trace!(
                        candidate = candidate.declared_order,
                        label = %candidate.label(),
                        %failure,
                        "candidate rejected"
                    );
                    None
                }
            })
            .collect();

        select(generic, args, matches)
    }

    /// Like [`resolve`](Self::resolve), also recording how each candidate
    /// fared.
    pub fn explain(&self, name: &str, args: &[TypeDesc]) -> ResolutionTrace {
        let generic = Symbol::new(name);
        let candidates = match check_concrete(&generic, args)
            .and_then(|()| self.catalog.sealed_candidates(name).map_err(Into::into))
        {
            Ok(candidates) => candidates,
            Err(err) => {
                let args = if matches!(err, ResolutionError::ArgumentTooDeep { .. }) {
                    Vec::new()
                } else {
                    args.to_vec()
                };
                return ResolutionTrace {
                    generic,
                    args,
                    candidates: Vec::new(),
                    dominance: Vec::new(),
                    outcome: Err(err),
                };
            }
        };

        let traces: Vec<CandidateTrace> = candidates
            .iter()
            .map(|candidate| CandidateTrace {
                declared_order: candidate.declared_order,
                label: candidate.label().clone(),
                pattern: candidate.pattern.clone(),
                kind: candidate.kind(),
                outcome: match_pattern(&candidate.pattern, args),
            })
            .collect();

        let matched: Vec<&Candidate> = candidates
            .iter()
            .zip(&traces)
            .filter(|(_, trace)| trace.matched())
            .map(|(candidate, _)| candidate)
            .collect();

        let mut dominance = Vec::new();
        for a in &matched {
            for b in &matched {
                if compare(&a.pattern, &b.pattern) == Specificity::MoreSpecific {
                    dominance.push((a.declared_order, b.declared_order));
                }
            }
        }

        let matches = candidates
            .iter()
            .zip(&traces)
            .filter_map(|(candidate, trace)| {
                trace.outcome.as_ref().ok().map(|bindings| (candidate, bindings.clone()))
            })
            .collect();

        ResolutionTrace {
            outcome: select(generic.clone(), args, matches),
            generic,
            args: args.to_vec(),
            candidates: traces,
            dominance,
        }
    }
}

/// Resolve through a temporary [`Resolver`].
pub fn resolve(
    catalog: &Catalog,
    name: &str,
    args: &[TypeDesc],
) -> Result<BoundImplementation, ResolutionError> {
    Resolver::new(catalog).resolve(name, args)
}

/// Pick the unique maximal match, or report why there is none.
///
/// `matches` is in declared order; the ambiguity report keeps that order.
fn select(
    generic: Symbol,
    args: &[TypeDesc],
    matches: Vec<(&Candidate, Bindings)>,
) -> Result<BoundImplementation, ResolutionError> {
    if matches.is_empty() {
        tracing::debug!("no candidate matched");
        return Err(ResolutionError::NoMatch {
            generic,
            args: args.to_vec(),
        });
    }

    let best: SmallVec<[usize; 2]> = maximal(&matches, |(candidate, _)| &candidate.pattern);
    if let [winner] = best.as_slice() {
        let (candidate, bindings) = &matches[*winner];
        tracing::debug!(
            candidate = candidate.declared_order,
            label = %candidate.label(),
            %bindings,
            "resolved"
        );
        return Ok(BoundImplementation::new((*candidate).clone(), bindings.clone()));
    }

    let tied_candidates: Vec<TiedCandidate> = best
        .iter()
        .map(|&i| TiedCandidate::from(matches[i].0))
        .collect();
    tracing::debug!(tied = tied_candidates.len(), "ambiguous");
    Err(ResolutionError::Ambiguous {
        generic,
        args: args.to_vec(),
        tied_candidates,
    })
}
