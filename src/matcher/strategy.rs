//! Representation selection for explicit character sets and ranges.

use itertools::Itertools;

use crate::error::MatcherError;

use super::{CharMatcher, Kind};

impl CharMatcher {
    /// Matches only `c`.
    pub fn is(c: char) -> CharMatcher {
        Self::from_kind(Kind::Is(c))
    }

    /// Matches any of `chars`. Duplicates are ignored.
    ///
    /// Small sets get a comparison-based representation: no characters is
    /// [`none`](Self::none), one is [`is`](Self::is), two compare against
    /// both. Three or more are sorted and searched with a binary search.
    pub fn any_of(chars: impl IntoIterator<Item = char>) -> CharMatcher {
        let set = chars.into_iter().sorted_unstable().dedup().collect_vec();
        match set.len() {
            0 => Self::none(),
            1 => Self::is(set[0]),
            2 => Self::from_kind(Kind::IsEither(set[0], set[1])),
            _ => Self::from_kind(Kind::AnyOf(set.into_boxed_slice())),
        }
    }

    /// Matches any character not in `chars`.
    pub fn none_of(chars: impl IntoIterator<Item = char>) -> CharMatcher {
        Self::any_of(chars).negate()
    }

    /// Matches characters between `lo` and `hi`, both inclusive.
    pub fn in_range(lo: char, hi: char) -> Result<CharMatcher, MatcherError> {
        if lo > hi {
            return Err(MatcherError::InvalidRange { lo, hi });
        }
        Ok(Self::from_kind(Kind::InRange(lo, hi)))
    }
}

pub(super) fn set_contains(set: &[char], c: char) -> bool {
    set.binary_search(&c).is_ok()
}

/// Binary search over sorted, disjoint inclusive ranges.
pub(super) fn ranges_contain(ranges: &[(char, char)], c: char) -> bool {
    let idx = ranges.partition_point(|&(lo, _)| lo <= c);
    idx > 0 && c <= ranges[idx - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_none() {
        let m = CharMatcher::any_of("".chars());
        assert!(matches!(*m.kind, Kind::None));
        assert!(CharMatcher::ptr_eq(&m, &CharMatcher::none()));
    }

    #[test]
    fn single_char_is_is() {
        let m = CharMatcher::any_of("aaa".chars());
        assert!(matches!(*m.kind, Kind::Is('a')));
    }

    #[test]
    fn two_chars_is_either() {
        let m = CharMatcher::any_of("baba".chars());
        assert!(matches!(*m.kind, Kind::IsEither('a', 'b')));
        assert!(m.matches('a'));
        assert!(m.matches('b'));
        assert!(!m.matches('c'));
    }

    #[test]
    fn many_chars_sorted_and_deduplicated() {
        let m = CharMatcher::any_of("kjihgfedcbaa".chars());
        match &*m.kind {
            Kind::AnyOf(set) => assert_eq!(set.iter().collect::<String>(), "abcdefghijk"),
            _ => panic!("expected AnyOf"),
        }
        assert!(m.matches('e'));
        assert!(!m.matches('z'));
        assert!(!m.is_fast());
    }

    #[test]
    fn none_of_negates() {
        let m = CharMatcher::none_of("xyz".chars());
        assert!(m.matches('a'));
        assert!(!m.matches('y'));
    }

    #[test]
    fn in_range_bounds_inclusive() {
        let m = CharMatcher::in_range('0', '9').unwrap();
        assert!(m.matches('0'));
        assert!(m.matches('9'));
        assert!(!m.matches('/'));
        assert!(!m.matches(':'));
    }

    #[test]
    fn in_range_single_char() {
        let m = CharMatcher::in_range('q', 'q').unwrap();
        assert!(matches!(*m.kind, Kind::InRange('q', 'q')));
        assert!(m.matches('q'));
        assert!(!m.matches('r'));
    }

    #[test]
    fn in_range_rejects_reversed_bounds() {
        assert_eq!(
            CharMatcher::in_range('z', 'a').unwrap_err(),
            MatcherError::InvalidRange { lo: 'z', hi: 'a' }
        );
    }

    #[test]
    fn ranges_lookup() {
        let ranges = [('a', 'c'), ('x', 'z')];
        assert!(ranges_contain(&ranges, 'a'));
        assert!(ranges_contain(&ranges, 'c'));
        assert!(!ranges_contain(&ranges, 'd'));
        assert!(ranges_contain(&ranges, 'y'));
        assert!(!ranges_contain(&ranges, '0'));
        assert!(!ranges_contain(&ranges, '{'));
        assert!(!ranges_contain(&[], 'a'));
    }
}
