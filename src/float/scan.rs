//! Decimal scanner splitting text into sign, digits and exponent.

use crate::outcome::ParseFlags;
use crate::table::{digit_value, is_space};

use super::num::{EXPONENT_MASK, MANTISSA_MASK, QUIET_NAN_BITS};

/// Largest decimal exponent magnitude kept exact. Anything beyond it
/// overflows or underflows a double regardless of the digits, so the
/// clamped value only needs to stay on the same side of the range.
const EXPONENT_CLAMP: i64 = 19999;

/// A scanned numeral with a non-zero significand.
///
/// The value it denotes is `±digits * 10^exp10`, where `digits` is the
/// concatenation of `integer` and `fraction`. Both slices hold only
/// significant digits, so the first byte is never `b'0'` and the last byte
/// of the significand is never `b'0'` either.
pub(super) struct ScannedFloat<'a> {
    pub negative: bool,
    /// Significant digits before the decimal point.
    pub integer: &'a [u8],
    /// Significant digits after the decimal point.
    pub fraction: &'a [u8],
    /// Total count of significant digits.
    pub nd: usize,
    /// Power of ten the significand is scaled by.
    pub exp10: i64,
    /// Numeric value of the first `min(nd, 9)` digits.
    pub y: u32,
    /// Numeric value of digits 10 through `min(nd, 16)`.
    pub z: u32,
    /// Bytes consumed from the input.
    pub len: usize,
    pub flags: ParseFlags,
}

/// Result of scanning one numeral.
pub(super) enum Scan<'a> {
    /// A non-zero finite numeral.
    Number(ScannedFloat<'a>),
    /// An infinity or NaN token.
    Special {
        value: f64,
        negative: bool,
        len: usize,
        flags: ParseFlags,
    },
    /// A numeral whose significant digits are all zero.
    Zero {
        negative: bool,
        len: usize,
        flags: ParseFlags,
    },
    /// No numeral at the start of the input.
    Invalid { flags: ParseFlags },
}

pub(super) fn scan(input: &[u8], decimal_point: u8, special_tokens: bool) -> Scan<'_> {
    let mut flags = ParseFlags::empty();
    let mut pos = 0;

    while pos < input.len() && is_space(input[pos]) {
        pos += 1;
    }
    if pos != 0 {
        flags.insert(ParseFlags::SPACES);
    }

    let mut negative = false;
    match input.get(pos) {
        Some(&b'-') => {
            negative = true;
            pos += 1;
            flags.insert(ParseFlags::SIGN);
        }
        Some(&b'+') => {
            pos += 1;
            flags.insert(ParseFlags::SIGN);
        }
        _ => {}
    }
    let start = pos;

    // Integer part, with leading zeros skipped up front.
    let mut digits_seen = false;
    while input.get(pos) == Some(&b'0') {
        digits_seen = true;
        pos += 1;
    }
    let int_start = pos;
    while pos < input.len() && input[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut integer = &input[int_start..pos];
    digits_seen |= !integer.is_empty();

    // Fraction part.
    let mut fraction: &[u8] = &[];
    let mut frac_all_len = 0usize;
    if input.get(pos) == Some(&decimal_point) {
        flags.insert(ParseFlags::DECIMAL_POINT);
        pos += 1;
        let frac_start = pos;
        while pos < input.len() && input[pos].is_ascii_digit() {
            pos += 1;
        }
        let all = &input[frac_start..pos];
        frac_all_len = all.len();
        digits_seen |= !all.is_empty();
        fraction = all;
        if integer.is_empty() {
            // Leading fraction zeros carry no significance without an
            // integer part; the exponent below already accounts for them.
            let lead = fraction.iter().take_while(|&&b| b == b'0').count();
            fraction = &fraction[lead..];
        }
    }

    // Trailing zeros move from the significand into the exponent.
    let mut stripped: i64 = 0;
    let frac_tail = fraction.iter().rev().take_while(|&&b| b == b'0').count();
    stripped += frac_tail as i64;
    fraction = &fraction[..fraction.len() - frac_tail];
    if fraction.is_empty() {
        let int_tail = integer.iter().rev().take_while(|&&b| b == b'0').count();
        stripped += int_tail as i64;
        integer = &integer[..integer.len() - int_tail];
    }

    // Optional exponent. An exponent marker not followed by a digit is
    // handed back, but its flag survives.
    let mut e_explicit: i64 = 0;
    if matches!(input.get(pos), Some(&(b'e' | b'E'))) {
        let marker = pos;
        pos += 1;
        flags.insert(ParseFlags::EXPONENT);
        let mut exp_negative = false;
        match input.get(pos) {
            Some(&b'-') => {
                exp_negative = true;
                pos += 1;
            }
            Some(&b'+') => {
                pos += 1;
            }
            _ => {}
        }
        if pos == input.len() {
            // Truncated exponent at the end of input counts as zero.
        } else if !input[pos].is_ascii_digit() {
            pos = marker;
        } else {
            while input.get(pos) == Some(&b'0') {
                pos += 1;
            }
            let digits_start = pos;
            let mut value: i64 = 0;
            while let Some(d @ b'0'..=b'9') = input.get(pos).copied() {
                if value <= EXPONENT_CLAMP {
                    value = value * 10 + i64::from(d - b'0');
                }
                pos += 1;
            }
            if pos - digits_start > 8 || value > EXPONENT_CLAMP {
                value = EXPONENT_CLAMP;
            }
            e_explicit = if exp_negative { -value } else { value };
        }
    }

    let nd = integer.len() + fraction.len();
    if nd == 0 {
        if digits_seen {
            return Scan::Zero {
                negative,
                len: pos,
                flags,
            };
        }
        if special_tokens {
            if let Some((value, used)) = scan_special(&input[start..]) {
                return Scan::Special {
                    value,
                    negative,
                    len: start + used,
                    flags,
                };
            }
        }
        return Scan::Invalid { flags };
    }

    let mut y: u32 = 0;
    let mut z: u32 = 0;
    for (i, &b) in integer.iter().chain(fraction).take(16).enumerate() {
        let d = u32::from(b - b'0');
        if i < 9 {
            y = y * 10 + d;
        } else {
            z = z * 10 + d;
        }
    }

    Scan::Number(ScannedFloat {
        negative,
        integer,
        fraction,
        nd,
        exp10: e_explicit - frac_all_len as i64 + stripped,
        y,
        z,
        len: pos,
        flags,
    })
}

/// Recognize `inf`, `infinity` and `nan` tokens, case-insensitively.
fn scan_special(rest: &[u8]) -> Option<(f64, usize)> {
    if rest.len() >= 8 && rest[..8].eq_ignore_ascii_case(b"infinity") {
        return Some((f64::INFINITY, 8));
    }
    if rest.len() >= 3 && rest[..3].eq_ignore_ascii_case(b"inf") {
        return Some((f64::INFINITY, 3));
    }
    if rest.len() >= 3 && rest[..3].eq_ignore_ascii_case(b"nan") {
        if rest.get(3) == Some(&b'(') {
            if let Some((bits, used)) = scan_nan_payload(&rest[4..]) {
                return Some((f64::from_bits(bits), 4 + used));
            }
        }
        return Some((f64::from_bits(QUIET_NAN_BITS), 3));
    }
    None
}

/// Read a parenthesized hexadecimal NaN payload, already past the `(`.
///
/// A malformed payload is not an error for the caller; the plain `nan`
/// token still stands and only its 3 bytes are consumed.
fn scan_nan_payload(rest: &[u8]) -> Option<(u64, usize)> {
    let mut accumulated: u64 = 0;
    let mut digits = 0usize;
    let mut pos = 0;
    while let Some(&b) = rest.get(pos) {
        if b == b')' {
            if digits == 0 {
                return None;
            }
            let payload = accumulated & MANTISSA_MASK;
            let bits = if payload != 0 {
                EXPONENT_MASK | payload
            } else {
                QUIET_NAN_BITS
            };
            return Some((bits, pos + 1));
        }
        if is_space(b) {
            pos += 1;
            continue;
        }
        let d = digit_value(b);
        if d >= 16 {
            return None;
        }
        accumulated = (accumulated << 4) | u64::from(d);
        digits += 1;
        pos += 1;
    }
    None
}
