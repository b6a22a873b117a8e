//! Composable character classes.
//!
//! A [`CharMatcher`] answers whether a single `char` belongs to a class.
//! Matchers are built from explicit sets and ranges or standard classes,
//! combined with `and`/`or`/`negate`, and can be
//! [`precomputed`](CharMatcher::precomputed) into a constant-time lookup
//! table. The [`CharPredicate`] trait applies a class to whole strings.
//!
//! # Example
//!
//! ```rust
//! use charmatch::{CharMatcher, CharPredicate};
//!
//! let alnum = CharMatcher::in_range('0', '9')?
//!     .or(&CharMatcher::in_range('a', 'z')?)
//!     .or(&CharMatcher::in_range('A', 'Z')?);
//! assert_eq!(alnum.retain_from("MyP@ssw0rd!"), "MyPssw0rd");
//!
//! // Already constant-time: precomputing hands back the same matcher.
//! let ws = CharMatcher::whitespace();
//! assert!(CharMatcher::ptr_eq(&ws, &ws.precomputed()?));
//!
//! let vowels = CharMatcher::any_of("aeiouAEIOU".chars()).precomputed()?;
//! assert_eq!(vowels.remove_from("Programming is fun!"), "Prgrmmng s fn!");
//!
//! let filename = charmatch::compile("letter_or_digit | \"-_.\"").unwrap();
//! assert_eq!(filename.retain_from("my file (copy).txt"), "myfilecopy.txt");
//! # Ok::<(), charmatch::MatcherError>(())
//! ```

mod error;
pub mod expr;
mod matcher;

pub use error::MatcherError;
pub use expr::{ExprError, compile};
pub use matcher::{CharMatcher, CharPredicate};
