//! Integer parsing for all widths, with base auto-detection and overflow
//! saturation.

use crate::error::ErrorKind;
use crate::outcome::{ParseFlags, ParseOutcome};
use crate::table::{digit_value, is_space};

struct Scanned {
    magnitude: u64,
    negative: bool,
    len: usize,
    flags: ParseFlags,
    overflow: bool,
}

/// Scan an unsigned magnitude with optional sign. The error carries the
/// flags seen before the input ran out of digits.
fn scan_unsigned(input: &[u8], base: u32) -> Result<Scanned, ParseFlags> {
    let mut flags = ParseFlags::empty();
    let mut pos = 0;

    while pos < input.len() && is_space(input[pos]) {
        pos += 1;
    }
    if pos != 0 {
        flags.insert(ParseFlags::SPACES);
    }
    if pos == input.len() {
        return Err(flags);
    }

    let mut negative = false;
    if input[pos] == b'+' || input[pos] == b'-' {
        negative = input[pos] == b'-';
        flags.insert(ParseFlags::SIGN);
        pos += 1;
        // Whitespace is tolerated between the sign and the first digit.
        while pos < input.len() && is_space(input[pos]) {
            pos += 1;
        }
        if pos == input.len() {
            return Err(flags);
        }
    }

    let mut base = base;
    if !(2..=36).contains(&base) {
        base = 10;
        if input[pos] == b'0' && pos + 1 < input.len() {
            match input[pos + 1] {
                b'x' | b'X' => {
                    flags.insert(ParseFlags::HEX_PREFIX);
                    base = 16;
                    pos += 2;
                }
                b'0'..=b'7' => {
                    flags.insert(ParseFlags::OCTAL_PREFIX);
                    base = 8;
                }
                _ => {}
            }
        }
    }

    let digits_start = pos;
    let mut magnitude: u64 = 0;
    let mut overflow = false;

    if base.is_power_of_two() {
        // Power-of-two bases accumulate by shifting; overflow is a mask test.
        let shift = base.trailing_zeros();
        while pos < input.len() {
            let digit = digit_value(input[pos]);
            if u32::from(digit) >= base {
                break;
            }
            if magnitude >> (64 - shift) != 0 {
                overflow = true;
                break;
            }
            magnitude = magnitude << shift | u64::from(digit);
            pos += 1;
        }
    } else {
        // Check the threshold before multiplying so the first over-range
        // digit is detected exactly.
        let threshold = u64::MAX / u64::from(base);
        while pos < input.len() {
            let digit = digit_value(input[pos]);
            if u32::from(digit) >= base {
                break;
            }
            if magnitude > threshold {
                overflow = true;
                break;
            }
            magnitude *= u64::from(base);
            match magnitude.checked_add(u64::from(digit)) {
                Some(value) => magnitude = value,
                None => {
                    overflow = true;
                    break;
                }
            }
            pos += 1;
        }
    }

    if overflow {
        // Keep consuming valid digits without accumulating so the reported
        // length still covers the whole numeral.
        magnitude = u64::MAX;
        pos += 1;
        while pos < input.len() && u32::from(digit_value(input[pos])) < base {
            pos += 1;
        }
    }

    if pos == digits_start {
        return Err(flags);
    }

    Ok(Scanned {
        magnitude,
        negative,
        len: pos,
        flags,
        overflow,
    })
}

/// Parse an unsigned 64-bit integer.
///
/// `base` selects the digit set; any value outside `2..=36` (conventionally
/// 0) enables auto-detection: a `0x`/`0X` prefix selects hexadecimal, a
/// leading zero followed by an octal digit selects octal, and anything else
/// is decimal.
///
/// A negative sign is accepted syntactically, but a nonzero magnitude after
/// one cannot be represented and saturates to zero with [`ErrorKind::Overflow`].
/// `"-0"` parses cleanly.
pub fn parse_u64(input: &[u8], base: u32) -> ParseOutcome<u64> {
    let scanned = match scan_unsigned(input, base) {
        Ok(scanned) => scanned,
        Err(flags) => return ParseOutcome::fail(0, 0, flags, ErrorKind::InvalidInput),
    };
    if scanned.negative && scanned.magnitude != 0 {
        ParseOutcome::fail(0, scanned.len, scanned.flags, ErrorKind::Overflow)
    } else if scanned.overflow {
        ParseOutcome::fail(u64::MAX, scanned.len, scanned.flags, ErrorKind::Overflow)
    } else {
        ParseOutcome::ok(scanned.magnitude, scanned.len, scanned.flags)
    }
}

/// Parse a signed 64-bit integer. Same grammar as [`parse_u64`]; magnitudes
/// beyond the representable range saturate to `i64::MIN`/`i64::MAX` with
/// [`ErrorKind::Overflow`].
pub fn parse_i64(input: &[u8], base: u32) -> ParseOutcome<i64> {
    let scanned = match scan_unsigned(input, base) {
        Ok(scanned) => scanned,
        Err(flags) => return ParseOutcome::fail(0, 0, flags, ErrorKind::InvalidInput),
    };
    if scanned.negative {
        if scanned.magnitude > i64::MAX as u64 + 1 {
            ParseOutcome::fail(i64::MIN, scanned.len, scanned.flags, ErrorKind::Overflow)
        } else {
            let value = (scanned.magnitude as i64).wrapping_neg();
            ParseOutcome::ok(value, scanned.len, scanned.flags)
        }
    } else if scanned.magnitude > i64::MAX as u64 {
        ParseOutcome::fail(i64::MAX, scanned.len, scanned.flags, ErrorKind::Overflow)
    } else {
        ParseOutcome::ok(scanned.magnitude as i64, scanned.len, scanned.flags)
    }
}

macro_rules! parse_unsigned_impl {
    ($(#[$attr:meta])* $name:ident, $t:ty) => {
        $(#[$attr])*
        pub fn $name(input: &[u8], base: u32) -> ParseOutcome<$t> {
            let wide = parse_u64(input, base);
            if wide.value > <$t>::MAX as u64 {
                ParseOutcome::fail(<$t>::MAX, wide.len, wide.flags, ErrorKind::Overflow)
            } else {
                ParseOutcome {
                    value: wide.value as $t,
                    len: wide.len,
                    flags: wide.flags,
                    error: wide.error,
                }
            }
        }
    };
}

macro_rules! parse_signed_impl {
    ($(#[$attr:meta])* $name:ident, $t:ty) => {
        $(#[$attr])*
        pub fn $name(input: &[u8], base: u32) -> ParseOutcome<$t> {
            let wide = parse_i64(input, base);
            if wide.value < <$t>::MIN as i64 {
                ParseOutcome::fail(<$t>::MIN, wide.len, wide.flags, ErrorKind::Overflow)
            } else if wide.value > <$t>::MAX as i64 {
                ParseOutcome::fail(<$t>::MAX, wide.len, wide.flags, ErrorKind::Overflow)
            } else {
                ParseOutcome {
                    value: wide.value as $t,
                    len: wide.len,
                    flags: wide.flags,
                    error: wide.error,
                }
            }
        }
    };
}

parse_unsigned_impl! {
    /// Parse an unsigned 8-bit integer; out-of-range values saturate.
    parse_u8, u8
}
parse_unsigned_impl! {
    /// Parse an unsigned 16-bit integer; out-of-range values saturate.
    parse_u16, u16
}
parse_unsigned_impl! {
    /// Parse an unsigned 32-bit integer; out-of-range values saturate.
    parse_u32, u32
}
parse_signed_impl! {
    /// Parse a signed 8-bit integer; out-of-range values saturate.
    parse_i8, i8
}
parse_signed_impl! {
    /// Parse a signed 16-bit integer; out-of-range values saturate.
    parse_i16, i16
}
parse_signed_impl! {
    /// Parse a signed 32-bit integer; out-of-range values saturate.
    parse_i32, i32
}
