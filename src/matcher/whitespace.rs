//! Perfect-hash membership test for the whitespace alphabet.
//!
//! Every whitespace character `c` sits at `TABLE[(MULTIPLIER * c) >> SHIFT]`
//! (32-bit wrapping multiply). Any other character either lands on a slot
//! holding a different character, or on a filler slot. Filler slots repeat
//! `'\u{3000}'`, which is itself whitespace and so only equals itself.

const TABLE: [char; 32] = [
    '\u{2002}', '\u{3000}', '\r', '\u{85}', '\u{200A}', '\u{2005}', '\u{2000}', '\u{3000}',
    '\u{2029}', '\u{B}', '\u{3000}', '\u{2008}', '\u{2003}', '\u{205F}', '\u{3000}', '\u{1680}',
    '\t', ' ', '\u{2006}', '\u{2001}', '\u{202F}', '\u{A0}', '\u{C}', '\u{2009}',
    '\u{3000}', '\u{2004}', '\u{3000}', '\u{3000}', '\u{2028}', '\n', '\u{2007}', '\u{3000}',
];

const MULTIPLIER: u32 = 1_682_554_634;

const SHIFT: u32 = (TABLE.len() as u32 - 1).leading_zeros();

#[inline]
pub(super) fn matches(c: char) -> bool {
    TABLE[(MULTIPLIER.wrapping_mul(c as u32) >> SHIFT) as usize] == c
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITESPACE: [char; 25] = [
        '\t', '\n', '\u{B}', '\u{C}', '\r', ' ', '\u{85}', '\u{A0}', '\u{1680}', '\u{2000}',
        '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}', '\u{2007}',
        '\u{2008}', '\u{2009}', '\u{200A}', '\u{2028}', '\u{2029}', '\u{202F}', '\u{205F}',
        '\u{3000}',
    ];

    #[test]
    fn shift_selects_five_bits() {
        assert_eq!(SHIFT, 27);
    }

    #[test]
    fn every_member_hashes_to_itself() {
        for c in WHITESPACE {
            assert!(matches(c), "expected whitespace: {c:?}");
        }
    }

    #[test]
    fn no_other_character_matches() {
        for c in '\0'..=char::MAX {
            assert_eq!(matches(c), WHITESPACE.contains(&c), "mismatch at {c:?}");
        }
    }

    #[test]
    fn table_holds_only_members() {
        assert!(TABLE.iter().all(|c| WHITESPACE.contains(c)));
    }
}
