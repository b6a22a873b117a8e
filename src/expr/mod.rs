//! Textual character-class expressions.
//!
//! An expression compiles to a [`CharMatcher`](crate::CharMatcher) built from
//! the same constructors and combinators a caller would use directly.
//!
//! # Syntax
//!
//! | Form            | Meaning                                          |
//! |-----------------|--------------------------------------------------|
//! | `whitespace`    | A standard class, see [`CharMatcher::names`]     |
//! | `'x'`           | One character                                    |
//! | `'a'-'z'`       | Inclusive character range                        |
//! | `"abc"`         | Any of the listed characters                     |
//! | `!X`            | Negation                                         |
//! | `X & Y`         | Both                                             |
//! | `X \| Y`        | Either                                           |
//! | `(…)`           | Grouping                                         |
//!
//! `!` binds tightest, then `&`, then `|`. Whitespace between tokens is
//! ignored. Inside quotes, `\t`, `\n`, `\r`, `\0`, `\\`, `\'`, `\"` and
//! `\u{HEX}` are recognised escapes.
//!
//! Groups may nest at most [`MAX_DEPTH`](parser::MAX_DEPTH) levels and an
//! expression may use at most [`MAX_OPERATORS`](parser::MAX_OPERATORS)
//! operators. Longer input is rejected rather than compiled.
//!
//! [`CharMatcher::names`]: crate::CharMatcher::names

pub mod parser;

pub use parser::{ExprError, compile};
