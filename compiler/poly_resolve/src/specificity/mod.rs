//! The specificity partial order over candidate patterns.
//!
//! `A` is more specific than `B` when the argument lists accepted by `A` are
//! a strict subset of those accepted by `B`. The subset test is the pattern
//! instance check from `poly_ir`, run in both directions, so the order is
//! decided structurally and never by enumerating argument lists.
//!
//! For the usual shapes this gives:
//!
//! | more specific | less specific | why |
//! |---|---|---|
//! | `[text]` | anything else that accepts `text` | no variables |
//! | `[*?T]` | `[?T]` | pointer slot vs bare variable |
//! | `[?T, ?T]` | `[?T, ?U]` | repeated vs distinct variables |
//! | `[int, ?U]` | `[?T, ?U]` | leaf slot vs bare variable |
//! | every other pattern | `[?T, ?U]` | primary pattern is least specific |
//!
//! `[int, ?U]` and `[?T, ?T]` are incomparable: each accepts lists the other
//! rejects. When both match, neither can win and resolution is ambiguous.
//! The same holds for any pair the instance check cannot strictly order.

use std::fmt;

use poly_ir::{is_instance_of, Pattern};
use smallvec::SmallVec;

/// Outcome of comparing two patterns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Specificity {
    /// The left pattern accepts a strict subset of the right's lists.
    MoreSpecific,
    /// The left pattern accepts a strict superset of the right's lists.
    LessSpecific,
    /// Same accepted lists: the patterns differ at most in variable names.
    Equivalent,
    /// Each pattern accepts lists the other rejects.
    Incomparable,
}

impl Specificity {
    /// The outcome with left and right swapped.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Specificity::MoreSpecific => Specificity::LessSpecific,
            Specificity::LessSpecific => Specificity::MoreSpecific,
            other => other,
        }
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Specificity::MoreSpecific => "more specific",
            Specificity::LessSpecific => "less specific",
            Specificity::Equivalent => "equivalent",
            Specificity::Incomparable => "incomparable",
        })
    }
}

/// Compare `a` against `b`.
pub fn compare(a: &Pattern, b: &Pattern) -> Specificity {
    if a.arity() != b.arity() {
        return Specificity::Incomparable;
    }
    match (is_instance_of(a, b), is_instance_of(b, a)) {
        (true, true) => Specificity::Equivalent,
        (true, false) => Specificity::MoreSpecific,
        (false, true) => Specificity::LessSpecific,
        (false, false) => Specificity::Incomparable,
    }
}

/// Indices of the items that no other item is strictly more specific than,
/// in input order.
pub fn maximal<T>(items: &[T], pattern: impl Fn(&T) -> &Pattern) -> SmallVec<[usize; 2]> {
    (0..items.len())
        .filter(|&i| {
            !items.iter().enumerate().any(|(j, other)| {
                j != i && compare(pattern(other), pattern(&items[i])) == Specificity::MoreSpecific
            })
        })
        .collect()
}
