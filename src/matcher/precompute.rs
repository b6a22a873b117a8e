//! Bitmap-backed matchers with constant-time lookup.

use crate::error::MatcherError;

use super::{CharMatcher, Kind};

const WORD_BITS: usize = u64::BITS as usize;

/// One bit for every value in `'\0'..=char::MAX`. Surrogate slots stay clear.
const TABLE_WORDS: usize = (char::MAX as usize + 1) / WORD_BITS;

pub(super) struct BitTable {
    words: Box<[u64]>,
}

impl BitTable {
    /// Evaluate `matcher` once for every character.
    fn build(matcher: &CharMatcher) -> Result<Self, MatcherError> {
        let mut words = Vec::<u64>::new();
        words.try_reserve_exact(TABLE_WORDS)?;
        words.resize(TABLE_WORDS, 0);
        for c in '\0'..=char::MAX {
            if matcher.matches(c) {
                let i = c as usize;
                words[i / WORD_BITS] |= 1u64 << (i % WORD_BITS);
            }
        }
        Ok(Self {
            words: words.into_boxed_slice(),
        })
    }

    #[inline]
    pub(super) fn contains(&self, c: char) -> bool {
        let i = c as usize;
        self.words[i / WORD_BITS] & (1u64 << (i % WORD_BITS)) != 0
    }

    /// Number of characters in the table.
    fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl CharMatcher {
    /// Returns a matcher with the same behaviour as `self` whose
    /// [`matches`](Self::matches) is a single table lookup.
    ///
    /// Matchers that are already constant-time ([`is_fast`](Self::is_fast))
    /// are returned as-is: the result is the same instance, see
    /// [`ptr_eq`](Self::ptr_eq). Anything else costs one pass over every
    /// character and a 136 KiB table, so do it once and keep the result.
    ///
    /// # Errors
    ///
    /// [`MatcherError::Allocation`] if the table cannot be allocated.
    pub fn precomputed(&self) -> Result<CharMatcher, MatcherError> {
        if self.is_fast() {
            return Ok(self.clone());
        }
        let table = BitTable::build(self)?;
        tracing::debug!(source = %self, matching = table.count(), "precomputed character table");
        Ok(Self::from_kind(Kind::Precomputed {
            table,
            description: format!("{self}.precomputed()"),
        }))
    }
}
