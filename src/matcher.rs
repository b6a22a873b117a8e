//! Character matchers: immutable predicates over a single `char`.
//!
//! A [`CharMatcher`] is a cheap handle to a shared, never-mutated matcher
//! node. Composing matchers clones handles, it never copies the operands,
//! so any expression built with [`CharMatcher::and`], [`CharMatcher::or`] and
//! [`CharMatcher::negate`] is a DAG of shared nodes.
//!
//! Characters are Unicode scalar values. Tables that cover "every character"
//! (see [`CharMatcher::precomputed`]) are sized for `'\0'..=char::MAX`.

use std::fmt;
use std::mem;
use std::sync::Arc;

mod named;
mod ops;
mod precompute;
mod strategy;
mod whitespace;


pub use ops::CharPredicate;

use precompute::BitTable;

/// An immutable character class.
///
/// Cloning is O(1) and yields a handle to the same matcher.
#[derive(Clone)]
pub struct CharMatcher {
    kind: Arc<Kind>,
}

enum Kind {
    None,
    Any,
    Is(char),
    IsEither(char, char),
    /// Sorted, deduplicated, at least three members.
    AnyOf(Box<[char]>),
    /// Inclusive bounds, `lo <= hi`.
    InRange(char, char),
    /// Sorted, disjoint, inclusive ranges.
    Ranges {
        description: &'static str,
        ranges: &'static [(char, char)],
    },
    Predicate {
        description: &'static str,
        predicate: fn(char) -> bool,
    },
    Whitespace,
    Precomputed {
        table: BitTable,
        description: String,
    },
    And(CharMatcher, CharMatcher),
    Or(CharMatcher, CharMatcher),
    Negated(CharMatcher),
}

impl Kind {
    /// Whether `matches` on this variant already runs in constant time.
    const fn is_fast(&self) -> bool {
        matches!(
            self,
            Kind::None
                | Kind::Any
                | Kind::Is(_)
                | Kind::IsEither(..)
                | Kind::InRange(..)
                | Kind::Whitespace
                | Kind::Precomputed { .. }
        )
    }

    /// Move the operand handles of a combinator onto `stack`, leaving
    /// childless placeholders behind.
    fn take_operands(&mut self, stack: &mut Vec<CharMatcher>) {
        match self {
            Kind::And(a, b) | Kind::Or(a, b) => {
                stack.push(mem::replace(a, CharMatcher::none()));
                stack.push(mem::replace(b, CharMatcher::none()));
            }
            Kind::Negated(inner) => stack.push(mem::replace(inner, CharMatcher::none())),
            _ => {}
        }
    }
}

/// Combinator chains are dropped with an explicit stack so that arbitrarily
/// long chains do not exhaust the call stack.
impl Drop for Kind {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_operands(&mut stack);
        while let Some(matcher) = stack.pop() {
            if let Some(mut kind) = Arc::into_inner(matcher.kind) {
                kind.take_operands(&mut stack);
            }
        }
    }
}

impl CharMatcher {
    fn from_kind(kind: Kind) -> Self {
        Self {
            kind: Arc::new(kind),
        }
    }

    /// Test whether `c` belongs to this class.
    #[inline]
    pub fn matches(&self, c: char) -> bool {
        match &*self.kind {
            Kind::None => false,
            Kind::Any => true,
            Kind::Is(c0) => c == *c0,
            Kind::IsEither(c0, c1) => c == *c0 || c == *c1,
            Kind::AnyOf(set) => strategy::set_contains(set, c),
            Kind::InRange(lo, hi) => *lo <= c && c <= *hi,
            Kind::Ranges { ranges, .. } => strategy::ranges_contain(ranges, c),
            Kind::Predicate { predicate, .. } => predicate(c),
            Kind::Whitespace => whitespace::matches(c),
            Kind::Precomputed { table, .. } => table.contains(c),
            Kind::And(a, b) => a.matches(c) && b.matches(c),
            Kind::Or(a, b) => a.matches(c) || b.matches(c),
            Kind::Negated(inner) => !inner.matches(c),
        }
    }

    /// Whether [`matches`](Self::matches) is constant-time for this matcher.
    ///
    /// Fast matchers are returned unchanged by [`precomputed`](Self::precomputed).
    pub fn is_fast(&self) -> bool {
        self.kind.is_fast()
    }

    /// Matches characters matched by both `self` and `other`.
    ///
    /// `other` is not consulted for characters `self` rejects.
    pub fn and(&self, other: &CharMatcher) -> CharMatcher {
        Self::from_kind(Kind::And(self.clone(), other.clone()))
    }

    /// Matches characters matched by either `self` or `other`.
    ///
    /// `other` is not consulted for characters `self` accepts.
    pub fn or(&self, other: &CharMatcher) -> CharMatcher {
        Self::from_kind(Kind::Or(self.clone(), other.clone()))
    }

    /// Matches exactly the characters `self` does not.
    pub fn negate(&self) -> CharMatcher {
        Self::from_kind(Kind::Negated(self.clone()))
    }

    /// Returns `true` if both handles refer to the same matcher instance.
    pub fn ptr_eq(this: &CharMatcher, other: &CharMatcher) -> bool {
        Arc::ptr_eq(&this.kind, &other.kind)
    }
}

impl CharPredicate for CharMatcher {
    #[inline]
    fn matches(&self, c: char) -> bool {
        CharMatcher::matches(self, c)
    }
}

impl fmt::Display for CharMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.kind {
            Kind::None => write!(f, "CharMatcher::none()"),
            Kind::Any => write!(f, "CharMatcher::any()"),
            Kind::Is(c) => write!(f, "CharMatcher::is({c:?})"),
            Kind::IsEither(c0, c1) => {
                write!(f, "CharMatcher::any_of({:?})", String::from_iter([*c0, *c1]))
            }
            Kind::AnyOf(set) => {
                write!(f, "CharMatcher::any_of({:?})", set.iter().collect::<String>())
            }
            Kind::InRange(lo, hi) => write!(f, "CharMatcher::in_range({lo:?}, {hi:?})"),
            Kind::Ranges { description, .. } | Kind::Predicate { description, .. } => {
                f.write_str(description)
            }
            Kind::Whitespace => write!(f, "CharMatcher::whitespace()"),
            Kind::Precomputed { description, .. } => f.write_str(description),
            Kind::And(a, b) => write!(f, "{a}.and({b})"),
            Kind::Or(a, b) => write!(f, "{a}.or({b})"),
            Kind::Negated(inner) => write!(f, "{inner}.negate()"),
        }
    }
}

impl fmt::Debug for CharMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharMatcher({self})")
    }
}
