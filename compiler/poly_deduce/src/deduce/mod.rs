//! Deduction entry points.

use poly_catalog::{Catalog, Passing};
use poly_ir::{Symbol, TypeDesc};
use poly_resolve::{check_concrete, BoundImplementation, ResolutionError, Resolver};

use crate::{lower, DeductionGuide, RawType};

/// How one argument slot was filled when no guide applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlotSource {
    /// Lowered from a by-value value.
    Decayed,
    /// Lowered from a by-reference value.
    Natural,
    /// Taken from the parameter's default.
    Default,
}

impl From<Passing> for SlotSource {
    fn from(passing: Passing) -> Self {
        match passing {
            Passing::ByValue => SlotSource::Decayed,
            Passing::ByReference => SlotSource::Natural,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeductionOrigin {
    /// A guide matched and supplied the list.
    Guide { index: usize, label: Symbol },
    /// Built slot by slot from the declaration.
    Parameters(Vec<SlotSource>),
}

/// A deduced argument list and where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deduction {
    pub args: Vec<TypeDesc>,
    pub origin: DeductionOrigin,
}

/// Deduce the argument list for constructing `name` from `values`.
///
/// Guides are tried in order and the first match wins. Without a match,
/// parameter `i` takes `values[i]` lowered by its passing mode, or its
/// default when fewer values were supplied.
#[tracing::instrument(level = "debug", skip_all, fields(generic = %name, values = values.len()))]
pub fn deduce(
    catalog: &Catalog,
    name: &str,
    values: &[RawType],
    guides: &[DeductionGuide],
) -> Result<Deduction, ResolutionError> {
    let decl = catalog.declaration(name)?;

    if let Some((index, guide)) = guides.iter().enumerate().find(|(_, g)| g.matches(values)) {
        tracing::debug!(guide = index, label = %guide.label, "guide matched");
        check_concrete(&decl.name, &guide.forced)?;
        return Ok(Deduction {
            args: guide.forced.clone(),
            origin: DeductionOrigin::Guide {
                index,
                label: guide.label.clone(),
            },
        });
    }

    if values.len() > decl.arity() {
        return Err(ResolutionError::TooManyValues {
            generic: decl.name.clone(),
            expected: decl.arity(),
            found: values.len(),
        });
    }

    let mut args = Vec::with_capacity(decl.arity());
    let mut sources = Vec::with_capacity(decl.arity());
    for (index, param) in decl.params.iter().enumerate() {
        if let Some(value) = values.get(index) {
            args.push(lower(value, param.passing));
            sources.push(SlotSource::from(param.passing));
        } else if let Some(default) = &param.default {
            args.push(default.clone());
            sources.push(SlotSource::Default);
        } else {
            return Err(ResolutionError::UndeducedParameter {
                generic: decl.name.clone(),
                param: param.name.clone(),
                index,
            });
        }
    }

    tracing::debug!(?args, "deduced from parameters");
    Ok(Deduction {
        args,
        origin: DeductionOrigin::Parameters(sources),
    })
}

/// [`deduce`], then resolve the deduced list.
pub fn deduce_and_resolve(
    catalog: &Catalog,
    name: &str,
    values: &[RawType],
    guides: &[DeductionGuide],
) -> Result<BoundImplementation, ResolutionError> {
    let deduction = deduce(catalog, name, values, guides)?;
    Resolver::new(catalog).resolve(name, &deduction.args)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
mod tests;
