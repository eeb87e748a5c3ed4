//! The result type shared by every parser in this crate.

use std::fmt::{self, Debug};
use std::ops::{BitOr, BitOrAssign};

use crate::error::ErrorKind;

/// Result of a conversion.
///
/// Every parser returns one of these: the parsed value (best-effort when an
/// error is reported), the number of bytes consumed from the input, the
/// grammar elements that were seen, and the error classification if any.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOutcome<T> {
    /// The parsed value. Zero when no digits were found, saturated to the
    /// nearest representable extreme on overflow.
    pub value: T,
    /// Number of bytes consumed from the front of the input. Zero when the
    /// input was invalid.
    pub len: usize,
    /// Grammar elements encountered while scanning, reported even when the
    /// parse ultimately failed.
    pub flags: ParseFlags,
    /// `None` on success.
    pub error: Option<ErrorKind>,
}

impl<T> ParseOutcome<T> {
    /// Returns true if the parse completed without error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub(crate) fn ok(value: T, len: usize, flags: ParseFlags) -> Self {
        ParseOutcome {
            value,
            len,
            flags,
            error: None,
        }
    }

    pub(crate) fn fail(value: T, len: usize, flags: ParseFlags, kind: ErrorKind) -> Self {
        ParseOutcome {
            value,
            len,
            flags,
            error: Some(kind),
        }
    }
}

/// Bitset of grammar elements observed during a parse.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct ParseFlags(u32);

impl ParseFlags {
    /// Leading whitespace was skipped.
    pub const SPACES: ParseFlags = ParseFlags(1 << 0);
    /// An explicit `+` or `-` sign was present.
    pub const SIGN: ParseFlags = ParseFlags(1 << 1);
    /// The decimal-point character was present.
    pub const DECIMAL_POINT: ParseFlags = ParseFlags(1 << 2);
    /// An `e`/`E` exponent marker was present.
    pub const EXPONENT: ParseFlags = ParseFlags(1 << 3);
    /// A `0x`/`0X` prefix selected hexadecimal.
    pub const HEX_PREFIX: ParseFlags = ParseFlags(1 << 4);
    /// A leading zero followed by an octal digit selected octal.
    pub const OCTAL_PREFIX: ParseFlags = ParseFlags(1 << 5);

    /// The empty set.
    pub const fn empty() -> Self {
        ParseFlags(0)
    }

    /// Returns true if no flags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if all flags in `other` are set in `self`.
    pub fn contains(self, other: ParseFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub(crate) fn insert(&mut self, other: ParseFlags) {
        self.0 |= other.0;
    }
}

impl BitOr for ParseFlags {
    type Output = ParseFlags;

    fn bitor(self, rhs: ParseFlags) -> ParseFlags {
        ParseFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ParseFlags {
    fn bitor_assign(&mut self, rhs: ParseFlags) {
        self.0 |= rhs.0;
    }
}

impl Debug for ParseFlags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const NAMES: [(ParseFlags, &str); 6] = [
            (ParseFlags::SPACES, "SPACES"),
            (ParseFlags::SIGN, "SIGN"),
            (ParseFlags::DECIMAL_POINT, "DECIMAL_POINT"),
            (ParseFlags::EXPONENT, "EXPONENT"),
            (ParseFlags::HEX_PREFIX, "HEX_PREFIX"),
            (ParseFlags::OCTAL_PREFIX, "OCTAL_PREFIX"),
        ];

        if self.is_empty() {
            return f.write_str("(empty)");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_ops() {
        let mut flags = ParseFlags::empty();
        assert!(flags.is_empty());
        flags.insert(ParseFlags::SIGN);
        flags |= ParseFlags::EXPONENT;
        assert!(flags.contains(ParseFlags::SIGN));
        assert!(flags.contains(ParseFlags::SIGN | ParseFlags::EXPONENT));
        assert!(!flags.contains(ParseFlags::SPACES));
        assert_eq!(format!("{:?}", flags), "SIGN | EXPONENT");
        assert_eq!(format!("{:?}", ParseFlags::empty()), "(empty)");
    }
}
