//! When a numeric conversion goes wrong.

use std::error;
use std::fmt::{self, Display};

/// Classification of a failed or saturated conversion.
///
/// A parse never leaves the value undefined: when an error is reported the
/// outcome still carries a best-effort value, zero for invalid input and the
/// nearest representable extreme for overflow.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// No digits or recognized token were found in the input.
    InvalidInput,
    /// The magnitude exceeds the destination type's range and the value was
    /// saturated. Underflow below the smallest representable magnitude is
    /// reported with this same kind.
    Overflow,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::InvalidInput => f.write_str("invalid numeric input"),
            ErrorKind::Overflow => f.write_str("numeric value out of range"),
        }
    }
}

impl error::Error for ErrorKind {}
