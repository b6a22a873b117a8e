//! String operations over any character class.
//!
//! All positions are **character** (not byte) indices into the input.

use itertools::Itertools;

/// A character class that can be applied to strings.
///
/// Only [`matches`](Self::matches) is required; every string operation is
/// written once in terms of it and calls it once per character inspected.
/// None of them modify their input.
pub trait CharPredicate {
    /// Test whether `c` belongs to this class.
    fn matches(&self, c: char) -> bool;

    /// `true` if at least one character of `s` matches.
    fn matches_any_of(&self, s: &str) -> bool {
        s.chars().any(|c| self.matches(c))
    }

    /// `true` if every character of `s` matches, including when `s` is empty.
    fn matches_all_of(&self, s: &str) -> bool {
        s.chars().all(|c| self.matches(c))
    }

    /// `true` if no character of `s` matches, including when `s` is empty.
    fn matches_none_of(&self, s: &str) -> bool {
        !self.matches_any_of(s)
    }

    /// Index of the first matching character at or after `from`, or `None`.
    ///
    /// A `from` past the end of `s` finds nothing.
    fn index_in(&self, s: &str, from: usize) -> Option<usize> {
        s.chars()
            .enumerate()
            .skip(from)
            .find_map(|(i, c)| self.matches(c).then_some(i))
    }

    /// Index of the last matching character, or `None`.
    fn last_index_in(&self, s: &str) -> Option<usize> {
        let len = s.chars().count();
        s.chars()
            .rev()
            .position(|c| self.matches(c))
            .map(|from_end| len - 1 - from_end)
    }

    /// Number of matching characters in `s`.
    fn count_in(&self, s: &str) -> usize {
        s.chars().filter(|&c| self.matches(c)).count()
    }

    /// `s` with every matching character deleted.
    fn remove_from(&self, s: &str) -> String {
        s.chars().filter(|&c| !self.matches(c)).collect()
    }

    /// `s` with every non-matching character deleted.
    fn retain_from(&self, s: &str) -> String {
        s.chars().filter(|&c| self.matches(c)).collect()
    }

    /// `s` with every matching character replaced by `replacement`.
    fn replace_from(&self, s: &str, replacement: char) -> String {
        s.chars()
            .map(|c| if self.matches(c) { replacement } else { c })
            .collect()
    }

    /// `s` with every matching character replaced by `replacement`, which may
    /// be empty or longer than one character.
    fn replace_from_str(&self, s: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            if self.matches(c) {
                out.push_str(replacement);
            } else {
                out.push(c);
            }
        }
        out
    }

    /// `s` without its leading and trailing runs of matching characters.
    /// Matching characters in the interior are kept.
    fn trim_from<'a>(&self, s: &'a str) -> &'a str {
        s.trim_matches(|c: char| self.matches(c))
    }

    fn trim_leading_from<'a>(&self, s: &'a str) -> &'a str {
        s.trim_start_matches(|c: char| self.matches(c))
    }

    fn trim_trailing_from<'a>(&self, s: &'a str) -> &'a str {
        s.trim_end_matches(|c: char| self.matches(c))
    }

    /// `s` with each run of consecutive matching characters replaced by a
    /// single `replacement`.
    fn collapse_from(&self, s: &str, replacement: char) -> String {
        let mut out = String::with_capacity(s.len());
        for (matched, run) in &s.chars().chunk_by(|&c| self.matches(c)) {
            if matched {
                out.push(replacement);
            } else {
                out.extend(run);
            }
        }
        out
    }

    /// [`trim_from`](Self::trim_from) followed by
    /// [`collapse_from`](Self::collapse_from).
    fn trim_and_collapse_from(&self, s: &str, replacement: char) -> String {
        self.collapse_from(self.trim_from(s), replacement)
    }
}
