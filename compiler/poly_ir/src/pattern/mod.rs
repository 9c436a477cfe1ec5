//! Candidate patterns.
//!
//! A [`Pattern`] is the ordered list of slots a candidate accepts. Its
//! [`PatternKind`] places it on the generality scale:
//!
//! | kind | shape | example |
//! |------|-------|---------|
//! | `Full` | no variables | `[text]` |
//! | `Partial` | anything in between | `[*?T]`, `[?T, ?T]`, `[int, ?U]` |
//! | `Primary` | one distinct bare variable per slot | `[?T, ?U]` |

use std::fmt;

use smallvec::SmallVec;

use crate::{Symbol, TypeDesc, VarId};

/// Where a pattern sits between fully generic and fully concrete.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// No variables at all: matches exactly one argument list.
    Full,
    /// Some structure or some repeated variable.
    Partial,
    /// Every slot is a bare variable and no variable repeats.
    Primary,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PatternKind::Full => "full",
            PatternKind::Partial => "partial",
            PatternKind::Primary => "primary",
        })
    }
}

/// The ordered slot list a candidate accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Pattern {
    slots: SmallVec<[TypeDesc; 2]>,
}

impl Pattern {
    /// Build a pattern from its slots.
    pub fn new(slots: impl IntoIterator<Item = TypeDesc>) -> Self {
        Pattern {
            slots: slots.into_iter().collect(),
        }
    }

    /// The primary pattern of the given arity: `[?T0, ?T1, ...]`.
    pub fn primary(arity: usize) -> Self {
        Pattern::new((0..arity).map(|i| TypeDesc::var(format!("T{i}"))))
    }

    #[inline]
    pub fn slots(&self) -> &[TypeDesc] {
        &self.slots
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    /// Distinct variables in first-occurrence order.
    pub fn vars(&self) -> Vec<VarId> {
        let mut vars = Vec::new();
        for slot in &self.slots {
            slot.collect_vars(&mut vars);
        }
        vars
    }

    /// Classify the pattern.
    pub fn kind(&self) -> PatternKind {
        let occurrences: usize = self.slots.iter().map(TypeDesc::var_occurrences).sum();
        if occurrences == 0 {
            return PatternKind::Full;
        }
        let all_bare = self.slots.iter().all(TypeDesc::is_bare_var);
        if all_bare && self.vars().len() == self.slots.len() {
            PatternKind::Primary
        } else {
            PatternKind::Partial
        }
    }

    /// Rename variables by first occurrence (`?0`, `?1`, ...).
    ///
    /// Two patterns that differ only in variable names have equal canonical
    /// forms, and they accept exactly the same argument lists.
    pub fn canonical(&self) -> Pattern {
        let order = self.vars();
        Pattern::new(self.slots.iter().map(|slot| {
            slot.map_vars(&mut |id| {
                let position = order.iter().position(|v| v == id).unwrap_or(order.len());
                TypeDesc::var(Symbol::new(position.to_string()))
            })
        }))
    }
}

impl FromIterator<TypeDesc> for Pattern {
    fn from_iter<I: IntoIterator<Item = TypeDesc>>(iter: I) -> Self {
        Pattern::new(iter)
    }
}

impl From<Vec<TypeDesc>> for Pattern {
    fn from(slots: Vec<TypeDesc>) -> Self {
        Pattern::new(slots)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{slot}")?;
        }
        f.write_str("]")
    }
}
