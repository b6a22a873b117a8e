use std::collections::TryReserveError;

/// Errors raised while building a [`CharMatcher`](crate::CharMatcher).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatcherError {
    /// `in_range` was given a lower bound above its upper bound.
    #[error("Invalid character range: {lo:?} is greater than {hi:?}")]
    InvalidRange { lo: char, hi: char },
    /// The lookup table for a precomputed matcher could not be allocated.
    #[error("Failed to allocate precomputed table: {0}")]
    Allocation(#[from] TryReserveError),
}
