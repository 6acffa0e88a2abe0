//! Domain validation errors for core domain types.
//!
//! These errors are returned when engine parameters or inputs violate an
//! invariant the algorithms rely on. Missing input data (no stores, no
//! transactions) is not an error; see [`SkipReason`](super::recommendation::SkipReason).
//!
//! # Examples
//!
//! ```
//! use basketry::domain::error::DomainError;
//! use basketry::domain::period::Period;
//!
//! let result: Result<Period, _> = "thirty days".parse();
//! assert!(matches!(result, Err(DomainError::InvalidPeriod { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Period text could not be parsed into a lookback window.
    #[error("invalid period '{input}': expected <n>h, <n>d or <n>w with n >= 1")]
    InvalidPeriod {
        /// The text that failed to parse.
        input: String,
    },

    /// Basket time window must be positive.
    #[error("basket window must be positive, got {seconds}s")]
    NonPositiveWindow {
        /// The invalid window length in seconds.
        seconds: i64,
    },

    /// K-means needs at least one cluster.
    #[error("cluster count must be at least 1")]
    ZeroClusters,

    /// Rankings must keep at least one consequent per product.
    #[error("top-per-product must be at least 1")]
    ZeroTopPerProduct,

    /// Feature space must have at least one dimension.
    #[error("top-features must be at least 1")]
    ZeroFeatures,

    /// All vectors handed to the clusterer must share one length.
    #[error("vector {index} has length {actual}, expected {expected}")]
    DimensionMismatch {
        /// Position of the offending vector.
        index: usize,
        /// Length of the first vector.
        expected: usize,
        /// Length of the offending vector.
        actual: usize,
    },
}
