//! Standard character classes.
//!
//! Each class is built once per process; every call hands out a clone of the
//! same handle.

use std::sync::LazyLock;

use itertools::Itertools;
use phf::{Map, phf_map};

use super::strategy::ranges_contain;
use super::{CharMatcher, Kind, whitespace};

/// Unicode `Nd` (decimal digit number), Unicode 14.0. Every run is ten
/// characters starting at a zero digit.
const DIGIT_RANGES: &[(char, char)] = &[
    ('\u{30}', '\u{39}'), ('\u{660}', '\u{669}'), ('\u{6F0}', '\u{6F9}'), ('\u{7C0}', '\u{7C9}'),
    ('\u{966}', '\u{96F}'), ('\u{9E6}', '\u{9EF}'), ('\u{A66}', '\u{A6F}'), ('\u{AE6}', '\u{AEF}'),
    ('\u{B66}', '\u{B6F}'), ('\u{BE6}', '\u{BEF}'), ('\u{C66}', '\u{C6F}'), ('\u{CE6}', '\u{CEF}'),
    ('\u{D66}', '\u{D6F}'), ('\u{DE6}', '\u{DEF}'), ('\u{E50}', '\u{E59}'), ('\u{ED0}', '\u{ED9}'),
    ('\u{F20}', '\u{F29}'), ('\u{1040}', '\u{1049}'), ('\u{1090}', '\u{1099}'), ('\u{17E0}', '\u{17E9}'),
    ('\u{1810}', '\u{1819}'), ('\u{1946}', '\u{194F}'), ('\u{19D0}', '\u{19D9}'), ('\u{1A80}', '\u{1A89}'),
    ('\u{1A90}', '\u{1A99}'), ('\u{1B50}', '\u{1B59}'), ('\u{1BB0}', '\u{1BB9}'), ('\u{1C40}', '\u{1C49}'),
    ('\u{1C50}', '\u{1C59}'), ('\u{A620}', '\u{A629}'), ('\u{A8D0}', '\u{A8D9}'), ('\u{A900}', '\u{A909}'),
    ('\u{A9D0}', '\u{A9D9}'), ('\u{A9F0}', '\u{A9F9}'), ('\u{AA50}', '\u{AA59}'), ('\u{ABF0}', '\u{ABF9}'),
    ('\u{FF10}', '\u{FF19}'), ('\u{104A0}', '\u{104A9}'), ('\u{10D30}', '\u{10D39}'), ('\u{11066}', '\u{1106F}'),
    ('\u{110F0}', '\u{110F9}'), ('\u{11136}', '\u{1113F}'), ('\u{111D0}', '\u{111D9}'), ('\u{112F0}', '\u{112F9}'),
    ('\u{11450}', '\u{11459}'), ('\u{114D0}', '\u{114D9}'), ('\u{11650}', '\u{11659}'), ('\u{116C0}', '\u{116C9}'),
    ('\u{11730}', '\u{11739}'), ('\u{118E0}', '\u{118E9}'), ('\u{11950}', '\u{11959}'), ('\u{11C50}', '\u{11C59}'),
    ('\u{11D50}', '\u{11D59}'), ('\u{11DA0}', '\u{11DA9}'), ('\u{16A60}', '\u{16A69}'), ('\u{16AC0}', '\u{16AC9}'),
    ('\u{16B50}', '\u{16B59}'), ('\u{1D7CE}', '\u{1D7D7}'), ('\u{1D7D8}', '\u{1D7E1}'), ('\u{1D7E2}', '\u{1D7EB}'),
    ('\u{1D7EC}', '\u{1D7F5}'), ('\u{1D7F6}', '\u{1D7FF}'), ('\u{1E140}', '\u{1E149}'), ('\u{1E2F0}', '\u{1E2F9}'),
    ('\u{1E950}', '\u{1E959}'), ('\u{1FBF0}', '\u{1FBF9}'),
];

const ISO_CONTROL_RANGES: &[(char, char)] = &[('\u{0}', '\u{1F}'), ('\u{7F}', '\u{9F}')];

static NONE: LazyLock<CharMatcher> = LazyLock::new(|| CharMatcher::from_kind(Kind::None));
static ANY: LazyLock<CharMatcher> = LazyLock::new(|| CharMatcher::from_kind(Kind::Any));
static ASCII: LazyLock<CharMatcher> =
    LazyLock::new(|| CharMatcher::from_kind(Kind::InRange('\0', '\u{7F}')));
static WHITESPACE: LazyLock<CharMatcher> =
    LazyLock::new(|| CharMatcher::from_kind(Kind::Whitespace));
static BREAKING_WHITESPACE: LazyLock<CharMatcher> = LazyLock::new(|| {
    CharMatcher::from_kind(Kind::Predicate {
        description: "CharMatcher::breaking_whitespace()",
        predicate: is_breaking_whitespace,
    })
});
static DIGIT: LazyLock<CharMatcher> = LazyLock::new(|| {
    CharMatcher::from_kind(Kind::Ranges {
        description: "CharMatcher::digit()",
        ranges: DIGIT_RANGES,
    })
});
static ISO_CONTROL: LazyLock<CharMatcher> = LazyLock::new(|| {
    CharMatcher::from_kind(Kind::Ranges {
        description: "CharMatcher::iso_control()",
        ranges: ISO_CONTROL_RANGES,
    })
});
static LETTER: LazyLock<CharMatcher> = LazyLock::new(|| {
    CharMatcher::from_kind(Kind::Predicate {
        description: "CharMatcher::letter()",
        predicate: char::is_alphabetic,
    })
});
static LETTER_OR_DIGIT: LazyLock<CharMatcher> = LazyLock::new(|| {
    CharMatcher::from_kind(Kind::Predicate {
        description: "CharMatcher::letter_or_digit()",
        predicate: is_letter_or_digit,
    })
});
static LOWER_CASE: LazyLock<CharMatcher> = LazyLock::new(|| {
    CharMatcher::from_kind(Kind::Predicate {
        description: "CharMatcher::lower_case()",
        predicate: char::is_lowercase,
    })
});
static UPPER_CASE: LazyLock<CharMatcher> = LazyLock::new(|| {
    CharMatcher::from_kind(Kind::Predicate {
        description: "CharMatcher::upper_case()",
        predicate: char::is_uppercase,
    })
});

fn is_breaking_whitespace(c: char) -> bool {
    whitespace::matches(c) && !matches!(c, '\u{A0}' | '\u{2007}' | '\u{202F}')
}

fn is_letter_or_digit(c: char) -> bool {
    c.is_alphabetic() || ranges_contain(DIGIT_RANGES, c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Named {
    Any,
    Ascii,
    BreakingWhitespace,
    Digit,
    IsoControl,
    Letter,
    LetterOrDigit,
    LowerCase,
    None,
    UpperCase,
    Whitespace,
}

/// Class names accepted by [`CharMatcher::named`].
static NAMES: Map<&'static str, Named> = phf_map! {
    "any" => Named::Any,
    "ascii" => Named::Ascii,
    "breaking_whitespace" => Named::BreakingWhitespace,
    "digit" => Named::Digit,
    "iso_control" => Named::IsoControl,
    "letter" => Named::Letter,
    "letter_or_digit" => Named::LetterOrDigit,
    "lower_case" => Named::LowerCase,
    "none" => Named::None,
    "upper_case" => Named::UpperCase,
    "whitespace" => Named::Whitespace,
};

impl Named {
    fn matcher(self) -> CharMatcher {
        match self {
            Named::Any => CharMatcher::any(),
            Named::Ascii => CharMatcher::ascii(),
            Named::BreakingWhitespace => CharMatcher::breaking_whitespace(),
            Named::Digit => CharMatcher::digit(),
            Named::IsoControl => CharMatcher::iso_control(),
            Named::Letter => CharMatcher::letter(),
            Named::LetterOrDigit => CharMatcher::letter_or_digit(),
            Named::LowerCase => CharMatcher::lower_case(),
            Named::None => CharMatcher::none(),
            Named::UpperCase => CharMatcher::upper_case(),
            Named::Whitespace => CharMatcher::whitespace(),
        }
    }
}

impl CharMatcher {
    /// Matches no characters.
    pub fn none() -> CharMatcher {
        NONE.clone()
    }

    /// Matches every character.
    pub fn any() -> CharMatcher {
        ANY.clone()
    }

    /// `'\0'..='\u{7F}'`.
    pub fn ascii() -> CharMatcher {
        ASCII.clone()
    }

    /// Unicode whitespace: `\t`, `\n`, `\u{B}`, `\u{C}`, `\r`, space,
    /// `\u{85}`, `\u{A0}`, `\u{1680}`, `\u{2000}`–`\u{200A}`, `\u{2028}`,
    /// `\u{2029}`, `\u{202F}`, `\u{205F}` and `\u{3000}`.
    ///
    /// Membership is a perfect-hash table lookup.
    pub fn whitespace() -> CharMatcher {
        WHITESPACE.clone()
    }

    /// [`whitespace`](Self::whitespace) without the non-breaking spaces
    /// `\u{A0}`, `\u{2007}` and `\u{202F}`.
    pub fn breaking_whitespace() -> CharMatcher {
        BREAKING_WHITESPACE.clone()
    }

    /// Unicode decimal digits (general category `Nd`), not just `0`–`9`.
    pub fn digit() -> CharMatcher {
        DIGIT.clone()
    }

    /// C0 and C1 control characters.
    pub fn iso_control() -> CharMatcher {
        ISO_CONTROL.clone()
    }

    pub fn letter() -> CharMatcher {
        LETTER.clone()
    }

    /// [`letter`](Self::letter) or [`digit`](Self::digit).
    pub fn letter_or_digit() -> CharMatcher {
        LETTER_OR_DIGIT.clone()
    }

    pub fn lower_case() -> CharMatcher {
        LOWER_CASE.clone()
    }

    pub fn upper_case() -> CharMatcher {
        UPPER_CASE.clone()
    }

    /// Wraps an arbitrary predicate. Lookups call `predicate` every time
    /// until the matcher is [`precomputed`](Self::precomputed).
    pub fn for_predicate(description: &'static str, predicate: fn(char) -> bool) -> CharMatcher {
        Self::from_kind(Kind::Predicate {
            description,
            predicate,
        })
    }

    /// Look up a standard class by its function name, e.g. `"whitespace"`.
    pub fn named(name: &str) -> Option<CharMatcher> {
        NAMES.get(name).map(|named| named.matcher())
    }

    /// All names accepted by [`named`](Self::named), sorted.
    pub fn names() -> Vec<&'static str> {
        NAMES.keys().copied().sorted_unstable().collect()
    }
}
