//! Crate-wide error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors reported by the calculation modules.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum Error {
    /// The civil date cannot be represented in the lunar calendar tables.
    ///
    /// Raised for dates before 1901-01-01, dates past the end of the packed
    /// tables (2050), and dates falling inside a leap month, which the
    /// reference month-walking algorithm cannot resolve.
    #[error("{0} is outside the supported lunar calendar range")]
    UnsupportedDate(NaiveDate),

    /// The hexagram generator was given other than exactly three numbers.
    #[error("expected exactly three numbers, got {0}")]
    InvalidArgument(usize),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
