//! Recursive descent compiler for character-class expressions.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::MatcherError;
use crate::matcher::CharMatcher;

/// Errors that can occur while compiling a class expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExprError {
    #[error("Unexpected character in class expression: {0:?}")]
    UnexpectedChar(char),
    #[error("Unexpected end of class expression")]
    UnexpectedEnd,
    #[error("Operator is missing an operand")]
    MissingOperand,
    #[error("Unknown character class: {0}")]
    UnknownClass(String),
    #[error("Unclosed group '(' in class expression")]
    UnclosedGroup,
    #[error("Unclosed character literal")]
    UnclosedChar,
    #[error("Unclosed string literal")]
    UnclosedString,
    #[error("Invalid escape sequence: \\{0}")]
    InvalidEscape(String),
    #[error("Groups nested deeper than {} levels", MAX_DEPTH)]
    TooDeep,
    #[error("Class expression uses more than {} operators", MAX_OPERATORS)]
    TooComplex,
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

/// Maximum nesting of `(` groups.
pub const MAX_DEPTH: usize = 256;

/// Maximum number of `!`, `&` and `|` operators. Bounds the depth of the
/// compiled matcher, which is evaluated recursively.
pub const MAX_OPERATORS: usize = 4096;

/// Compile a class expression into a [`CharMatcher`].
pub fn compile(input: &str) -> Result<CharMatcher, ExprError> {
    let mut parser = Parser {
        chars: input.chars().peekable(),
        depth: 0,
        operators: 0,
    };
    let matcher = parser.parse_or()?;
    parser.skip_space();
    if let Some(c) = parser.chars.next() {
        return Err(ExprError::UnexpectedChar(c));
    }
    tracing::trace!(%input, %matcher, "compiled class expression");
    Ok(matcher)
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    /// Number of currently open groups.
    depth: usize,
    /// Operators consumed so far.
    operators: usize,
}

impl Parser<'_> {
    fn parse_or(&mut self) -> Result<CharMatcher, ExprError> {
        let mut matcher = self.parse_and()?;
        loop {
            self.skip_space();
            if self.chars.next_if_eq(&'|').is_none() {
                return Ok(matcher);
            }
            self.count_operator()?;
            matcher = matcher.or(&self.parse_and()?);
        }
    }

    fn parse_and(&mut self) -> Result<CharMatcher, ExprError> {
        let mut matcher = self.parse_unary()?;
        loop {
            self.skip_space();
            if self.chars.next_if_eq(&'&').is_none() {
                return Ok(matcher);
            }
            self.count_operator()?;
            matcher = matcher.and(&self.parse_unary()?);
        }
    }

    fn parse_unary(&mut self) -> Result<CharMatcher, ExprError> {
        let mut negations = 0usize;
        loop {
            self.skip_space();
            if self.chars.next_if_eq(&'!').is_none() {
                break;
            }
            self.count_operator()?;
            negations += 1;
        }
        let mut matcher = self.parse_atom()?;
        for _ in 0..negations {
            matcher = matcher.negate();
        }
        Ok(matcher)
    }

    fn parse_atom(&mut self) -> Result<CharMatcher, ExprError> {
        match self.chars.peek().copied() {
            None | Some('|' | '&' | ')') => Err(ExprError::MissingOperand),
            Some('(') => {
                if self.depth == MAX_DEPTH {
                    return Err(ExprError::TooDeep);
                }
                self.chars.next(); // consume '('
                self.depth += 1;
                let inner = self.parse_or()?;
                self.depth -= 1;
                self.skip_space();
                if self.chars.next_if_eq(&')').is_none() {
                    return Err(ExprError::UnclosedGroup);
                }
                Ok(inner)
            }
            Some('\'') => {
                let lo = self.parse_char_literal()?;
                self.skip_space();
                if self.chars.next_if_eq(&'-').is_none() {
                    return Ok(CharMatcher::is(lo));
                }
                self.skip_space();
                match self.chars.peek() {
                    Some('\'') => {}
                    Some(&c) => return Err(ExprError::UnexpectedChar(c)),
                    None => return Err(ExprError::UnexpectedEnd),
                }
                let hi = self.parse_char_literal()?;
                Ok(CharMatcher::in_range(lo, hi)?)
            }
            Some('"') => {
                self.chars.next(); // consume '"'
                let mut set = Vec::new();
                loop {
                    match self.chars.next() {
                        None => return Err(ExprError::UnclosedString),
                        Some('"') => break,
                        Some('\\') => set.push(self.parse_escape()?),
                        Some(c) => set.push(c),
                    }
                }
                Ok(CharMatcher::any_of(set))
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(c) = self
                    .chars
                    .next_if(|c| c.is_ascii_alphanumeric() || *c == '_')
                {
                    name.push(c);
                }
                CharMatcher::named(&name).ok_or(ExprError::UnknownClass(name))
            }
            Some(c) => Err(ExprError::UnexpectedChar(c)),
        }
    }

    /// Parse `'c'`, with the opening quote still pending.
    fn parse_char_literal(&mut self) -> Result<char, ExprError> {
        self.chars.next(); // consume opening '\''
        let c = match self.chars.next() {
            None => return Err(ExprError::UnclosedChar),
            Some('\'') => return Err(ExprError::UnexpectedChar('\'')),
            Some('\\') => self.parse_escape()?,
            Some(c) => c,
        };
        if self.chars.next_if_eq(&'\'').is_none() {
            return Err(ExprError::UnclosedChar);
        }
        Ok(c)
    }

    /// Parse an escape sequence, with the backslash already consumed.
    fn parse_escape(&mut self) -> Result<char, ExprError> {
        match self.chars.next() {
            Some('t') => Ok('\t'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('0') => Ok('\0'),
            Some(c @ ('\\' | '\'' | '"')) => Ok(c),
            Some('u') => self.parse_unicode_escape(),
            Some(c) => Err(ExprError::InvalidEscape(c.to_string())),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    /// Parse the `{HEX}` part of `\u{HEX}`.
    fn parse_unicode_escape(&mut self) -> Result<char, ExprError> {
        if self.chars.next_if_eq(&'{').is_none() {
            return Err(ExprError::InvalidEscape("u".to_string()));
        }
        let mut hex = String::new();
        while let Some(c) = self.chars.next_if(char::is_ascii_hexdigit) {
            hex.push(c);
        }
        let invalid = || ExprError::InvalidEscape(format!("u{{{hex}}}"));
        if self.chars.next_if_eq(&'}').is_none() || hex.is_empty() || hex.len() > 6 {
            return Err(invalid());
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(invalid)
    }

    fn count_operator(&mut self) -> Result<(), ExprError> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(ExprError::TooComplex);
        }
        Ok(())
    }

    fn skip_space(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CharPredicate;

    fn compile_ok(input: &str) -> CharMatcher {
        compile(input).unwrap_or_else(|e| panic!("compile failed for {input:?}: {e}"))
    }

    fn compile_err(input: &str) -> ExprError {
        compile(input).expect_err("expected compile error")
    }

    // --- Atoms ---

    #[test]
    fn test_named_class() {
        let m = compile_ok("whitespace");
        assert!(CharMatcher::ptr_eq(&m, &CharMatcher::whitespace()));
    }

    #[test]
    fn test_single_char() {
        let m = compile_ok("'x'");
        assert_eq!(m.to_string(), "CharMatcher::is('x')");
    }

    #[test]
    fn test_range() {
        let m = compile_ok("'a' - 'f'");
        assert_eq!(m.to_string(), "CharMatcher::in_range('a', 'f')");
        assert!(m.matches('c'));
        assert!(!m.matches('g'));
    }

    #[test]
    fn test_string_set() {
        let m = compile_ok("\"-_.\"");
        assert_eq!(m.to_string(), "CharMatcher::any_of(\"-._\")");
    }

    #[test]
    fn test_empty_string_is_none() {
        let m = compile_ok("\"\"");
        assert!(CharMatcher::ptr_eq(&m, &CharMatcher::none()));
    }

    #[test]
    fn test_escapes() {
        assert!(compile_ok("'\\t'").matches('\t'));
        assert!(compile_ok("'\\''").matches('\''));
        assert!(compile_ok("'\\u{3000}'").matches('\u{3000}'));
        let m = compile_ok("\"\\n\\\"\\\\\"");
        assert!(m.matches('\n'));
        assert!(m.matches('"'));
        assert!(m.matches('\\'));
    }

    // --- Operators ---

    #[test]
    fn test_precedence() {
        // !'a' & letter | digit  ==  ((!'a') & letter) | digit
        let m = compile_ok("!'a' & letter | digit");
        assert_eq!(
            m.to_string(),
            "CharMatcher::is('a').negate().and(CharMatcher::letter()).or(CharMatcher::digit())"
        );
        assert!(m.matches('b'));
        assert!(m.matches('7'));
        assert!(!m.matches('a'));
        assert!(!m.matches('-'));
    }

    #[test]
    fn test_group() {
        let m = compile_ok("!('a' | 'b')");
        assert!(!m.matches('a'));
        assert!(!m.matches('b'));
        assert!(m.matches('c'));
    }

    #[test]
    fn test_negation_chain_at_limit() {
        let input = format!("{}digit", "!".repeat(MAX_OPERATORS - 1));
        let m = compile_ok(&input);
        assert!(!m.matches('5'));
        assert!(m.matches('x'));
    }

    #[test]
    fn test_too_many_operators() {
        let negations = format!("{}digit", "!".repeat(500_000));
        assert_eq!(compile_err(&negations), ExprError::TooComplex);
        let alternatives = vec!["'a'"; MAX_OPERATORS + 2].join("|");
        assert_eq!(compile_err(&alternatives), ExprError::TooComplex);
        let conjunctions = vec!["digit"; MAX_OPERATORS + 2].join(" & ");
        assert_eq!(compile_err(&conjunctions), ExprError::TooComplex);
    }

    #[test]
    fn test_nesting_at_limit() {
        let input = format!("{}'x'{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(compile_ok(&input).matches('x'));
    }

    #[test]
    fn test_nesting_too_deep() {
        let input = format!("{}'x'{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert_eq!(compile_err(&input), ExprError::TooDeep);
        assert_eq!(compile_err(&"(".repeat(500_000)), ExprError::TooDeep);
    }

    #[test]
    fn test_double_negation() {
        let m = compile_ok("!!digit");
        assert_eq!(m.to_string(), "CharMatcher::digit().negate().negate()");
    }

    #[test]
    fn test_matches_hand_built_matcher() {
        let compiled = compile_ok("'0'-'9' | 'a'-'z' | 'A'-'Z'");
        assert_eq!(compiled.retain_from("MyP@ssw0rd!"), "MyPssw0rd");
        let built = CharMatcher::in_range('0', '9')
            .unwrap()
            .or(&CharMatcher::in_range('a', 'z').unwrap())
            .or(&CharMatcher::in_range('A', 'Z').unwrap());
        assert_eq!(compiled.to_string(), built.to_string());
    }

    #[test]
    fn test_whitespace_between_tokens() {
        let m = compile_ok("  ( digit\t|\n'x' )  ");
        assert!(m.matches('x'));
        assert!(m.matches('1'));
    }

    // --- Errors ---

    #[test]
    fn test_empty_input() {
        assert_eq!(compile_err(""), ExprError::MissingOperand);
        assert_eq!(compile_err("   "), ExprError::MissingOperand);
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(compile_err("digit |"), ExprError::MissingOperand);
        assert_eq!(compile_err("& digit"), ExprError::MissingOperand);
        assert_eq!(compile_err("!"), ExprError::MissingOperand);
        assert_eq!(compile_err("()"), ExprError::MissingOperand);
    }

    #[test]
    fn test_unknown_class() {
        assert_eq!(
            compile_err("vowel"),
            ExprError::UnknownClass("vowel".to_string())
        );
    }

    #[test]
    fn test_unclosed() {
        assert_eq!(compile_err("(digit"), ExprError::UnclosedGroup);
        assert_eq!(compile_err("'a"), ExprError::UnclosedChar);
        assert_eq!(compile_err("'"), ExprError::UnclosedChar);
        assert_eq!(compile_err("\"abc"), ExprError::UnclosedString);
    }

    #[test]
    fn test_reversed_range() {
        assert_eq!(
            compile_err("'z'-'a'"),
            ExprError::Matcher(MatcherError::InvalidRange { lo: 'z', hi: 'a' })
        );
    }

    #[test]
    fn test_incomplete_range() {
        assert_eq!(compile_err("'a'-"), ExprError::UnexpectedEnd);
        assert_eq!(compile_err("'a'-z"), ExprError::UnexpectedChar('z'));
    }

    #[test]
    fn test_bad_escapes() {
        assert_eq!(
            compile_err("'\\q'"),
            ExprError::InvalidEscape("q".to_string())
        );
        assert_eq!(
            compile_err("'\\u{D800}'"),
            ExprError::InvalidEscape("u{D800}".to_string())
        );
        assert_eq!(
            compile_err("'\\u{}'"),
            ExprError::InvalidEscape("u{}".to_string())
        );
    }

    #[test]
    fn test_trailing_garbage() {
        assert_eq!(compile_err("digit )"), ExprError::UnexpectedChar(')'));
        assert_eq!(compile_err("digit letter"), ExprError::UnexpectedChar('l'));
        assert_eq!(compile_err("#"), ExprError::UnexpectedChar('#'));
    }

    #[test]
    fn test_empty_char_literal() {
        assert_eq!(compile_err("''"), ExprError::UnexpectedChar('\''));
    }
}
