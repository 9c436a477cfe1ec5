//! Variable bindings produced by matching.

use std::collections::BTreeMap;
use std::fmt;

use crate::{TypeDesc, VarId};

/// Pattern variables and the concrete descriptors they were bound to.
///
/// Backed by a `BTreeMap` so iteration and display order are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bindings {
    map: BTreeMap<VarId, TypeDesc>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable by name.
    pub fn get(&self, var: &VarId) -> Option<&TypeDesc> {
        self.map.get(var)
    }

    /// Look up a variable by its bare name (`"T"` for `?T`).
    pub fn get_named(&self, name: &str) -> Option<&TypeDesc> {
        self.map.get(&VarId::new(name))
    }

    /// Bind `var` to `ty`, returning the previous binding if there was one.
    pub(crate) fn insert(&mut self, var: VarId, ty: TypeDesc) -> Option<TypeDesc> {
        self.map.insert(var, ty)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VarId, &TypeDesc)> {
        self.map.iter()
    }

    /// Substitute bound variables in `ty`. Unbound variables are kept.
    pub fn apply(&self, ty: &TypeDesc) -> TypeDesc {
        ty.map_vars(&mut |id| {
            self.map
                .get(id)
                .cloned()
                .unwrap_or_else(|| TypeDesc::Var(id.clone()))
        })
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (var, ty)) in self.map.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{var} = {ty}")?;
        }
        f.write_str("}")
    }
}
