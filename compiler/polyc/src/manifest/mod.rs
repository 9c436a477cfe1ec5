//! JSON catalog manifests.
//!
//! A manifest declares generics with their candidates and deduction guides,
//! plus the queries to run against them:
//!
//! ```json
//! {
//!   "generics": [{
//!     "name": "Box",
//!     "candidates": [
//!       { "label": "primary", "pattern": [{ "var": "T" }] },
//!       { "label": "text", "pattern": [{ "leaf": "text" }] }
//!     ]
//!   }],
//!   "queries": [
//!     { "generic": "Box", "args": [{ "leaf": "text" }], "expect": { "selects": "text" } }
//!   ]
//! }
//! ```

use std::path::Path;

use poly_catalog::{
    CapabilityPredicate, Catalog, GenericDecl, Implementation, ParamDecl, Passing,
    RegistrationError,
};
use poly_deduce::{DeductionGuide, RawType};
use poly_ir::{Pattern, Symbol, TypeDesc};
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Why a manifest could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("candidate `{label}` of `{generic}` was rejected: {source}")]
    Registration {
        generic: Symbol,
        label: Symbol,
        #[source]
        source: RegistrationError,
    },

    #[error("declaration of `{generic}` was rejected: {source}")]
    Declaration {
        generic: Symbol,
        #[source]
        source: RegistrationError,
    },
}

// === Wire format ===

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub generics: Vec<GenericSpec>,
    #[serde(default)]
    pub queries: Vec<Query>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenericSpec {
    pub name: Symbol,
    /// Explicit parameters. Without them the generic is declared by its
    /// first candidate.
    #[serde(default)]
    pub params: Option<Vec<ParamSpec>>,
    #[serde(default)]
    pub candidates: Vec<CandidateSpec>,
    #[serde(default)]
    pub guides: Vec<DeductionGuide>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamSpec {
    pub name: Symbol,
    #[serde(default)]
    pub passing: PassingSpec,
    #[serde(default)]
    pub default: Option<TypeDesc>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassingSpec {
    #[default]
    ByValue,
    ByReference,
}

impl From<PassingSpec> for Passing {
    fn from(spec: PassingSpec) -> Self {
        match spec {
            PassingSpec::ByValue => Passing::ByValue,
            PassingSpec::ByReference => Passing::ByReference,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateSpec {
    pub label: Symbol,
    pub pattern: Vec<TypeDesc>,
    #[serde(default)]
    pub operations: Vec<Symbol>,
    #[serde(default)]
    pub capabilities: Vec<CapabilitySpec>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilitySpec {
    pub name: Symbol,
    pub when: PredicateSpec,
}

/// Serializable subset of [`CapabilityPredicate`]: everything but custom
/// closures.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateSpec {
    Always,
    VarMatches { var: Symbol, accepted: Vec<TypeDesc> },
    All(Vec<PredicateSpec>),
    Any(Vec<PredicateSpec>),
}

impl PredicateSpec {
    fn build(self) -> CapabilityPredicate {
        match self {
            PredicateSpec::Always => CapabilityPredicate::Always,
            PredicateSpec::VarMatches { var, accepted } => {
                CapabilityPredicate::var_matches(var, accepted)
            }
            PredicateSpec::All(inner) => {
                CapabilityPredicate::All(inner.into_iter().map(PredicateSpec::build).collect())
            }
            PredicateSpec::Any(inner) => {
                CapabilityPredicate::Any(inner.into_iter().map(PredicateSpec::build).collect())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "QuerySpec")]
pub struct Query {
    pub generic: Symbol,
    pub input: QueryInput,
    pub expect: Option<Expectation>,
}

/// Arguments to resolve directly, or raw values to deduce them from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryInput {
    Args(Vec<TypeDesc>),
    Values(Vec<RawType>),
}

/// On-disk query. Exactly one of `args` and `values` must be present.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct QuerySpec {
    generic: Symbol,
    #[serde(default)]
    args: Option<Vec<TypeDesc>>,
    #[serde(default)]
    values: Option<Vec<RawType>>,
    #[serde(default)]
    expect: Option<Expectation>,
}

impl TryFrom<QuerySpec> for Query {
    type Error = &'static str;

    fn try_from(spec: QuerySpec) -> Result<Self, Self::Error> {
        let input = match (spec.args, spec.values) {
            (Some(args), None) => QueryInput::Args(args),
            (None, Some(values)) => QueryInput::Values(values),
            (Some(_), Some(_)) => return Err("a query takes `args` or `values`, not both"),
            (None, None) => return Err("a query needs `args` or `values`"),
        };
        Ok(Query {
            generic: spec.generic,
            input,
            expect: spec.expect,
        })
    }
}

/// What a query is supposed to produce.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// The candidate with this label wins.
    Selects(Symbol),
    /// Ambiguity between exactly these labels, in declared order. An empty
    /// list accepts any ambiguity.
    Ambiguous(Vec<Symbol>),
    /// Any other failure, by kind.
    Fails(FailureKind),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnknownGeneric,
    NoMatch,
    Ambiguous,
    UndeducedParameter,
    NonConcreteArgument,
    ArgumentTooDeep,
    TooManyValues,
}

// === Loading ===

/// A manifest with its generics registered.
#[derive(Debug, Default)]
pub struct LoadedManifest {
    pub catalog: Catalog,
    /// Deduction guides per generic, in manifest order.
    pub guides: FxHashMap<Symbol, Vec<DeductionGuide>>,
    pub queries: Vec<Query>,
}

impl LoadedManifest {
    pub fn guides_for(&self, generic: &str) -> &[DeductionGuide] {
        self.guides.get(generic).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Read and register the manifest at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<LoadedManifest, ManifestError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    from_str(&text)
}

pub fn from_str(text: &str) -> Result<LoadedManifest, ManifestError> {
    let manifest: Manifest = serde_json::from_str(text)?;
    manifest.register()
}

impl Manifest {
    /// Declare and register every generic in manifest order.
    #[tracing::instrument(level = "debug", skip_all, fields(generics = self.generics.len()))]
    pub fn register(self) -> Result<LoadedManifest, ManifestError> {
        let catalog = Catalog::new();
        let mut guides = FxHashMap::default();

        for generic in self.generics {
            if let Some(params) = generic.params {
                let params = params
                    .into_iter()
                    .map(|p| ParamDecl {
                        name: p.name,
                        passing: p.passing.into(),
                        default: p.default,
                    })
                    .collect();
                catalog
                    .declare(GenericDecl::new(generic.name.clone(), params))
                    .map_err(|source| ManifestError::Declaration {
                        generic: generic.name.clone(),
                        source,
                    })?;
            }

            for candidate in generic.candidates {
                let mut implementation =
                    Implementation::new(candidate.label.clone()).with_operations(candidate.operations);
                for capability in candidate.capabilities {
                    implementation =
                        implementation.with_capability(capability.name, capability.when.build());
                }
                catalog
                    .register(generic.name.clone(), Pattern::new(candidate.pattern), implementation)
                    .map_err(|source| ManifestError::Registration {
                        generic: generic.name.clone(),
                        label: candidate.label,
                        source,
                    })?;
            }

            if !generic.guides.is_empty() {
                guides
                    .entry(generic.name)
                    .or_insert_with(Vec::new)
                    .extend(generic.guides);
            }
        }

        Ok(LoadedManifest {
            catalog,
            guides,
            queries: self.queries,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
mod tests;
