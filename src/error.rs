//! Error type for the fallible (`try_*`) arithmetic API.

use thiserror::Error;

/// Errors reported by the fallible exact-arithmetic operations.
///
/// The infallible API (operators, predicate entry points) treats every one of
/// these as a violated precondition and panics instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum ExactError {
    /// A fixed-capacity word store cannot hold the result.
    #[error("word capacity exceeded: {needed} words needed, {capacity} available")]
    CapacityExceeded {
        /// Number of words the result requires.
        needed: usize,
        /// Number of words the store can hold.
        capacity: usize,
    },

    /// An unsigned subtraction whose subtrahend exceeds the minuend.
    #[error("unsigned subtraction would produce a negative magnitude")]
    NegativeMagnitude,

    /// NaN or an infinity was supplied where a finite value is required.
    #[error("non-finite input {0}")]
    NonFinite(f64),

    /// A rational number was built or divided with a zero denominator.
    #[error("rational denominator is zero")]
    ZeroDenominator,

    /// A predicate received the wrong number of coordinates.
    #[error("expected {expected} coordinates, found {found}")]
    ArityMismatch {
        /// Coordinates the predicate program reads.
        expected: usize,
        /// Coordinates actually supplied.
        found: usize,
    },
}
