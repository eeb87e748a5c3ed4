//! Decimal to floating-point conversion.
//!
//! The entry points here scan a numeral off the front of the input and
//! convert it to the nearest representable value, reporting how many bytes
//! were consumed and which syntactic elements appeared.

use crate::error::ErrorKind;
use crate::outcome::ParseOutcome;

mod algorithm;
mod bignum;
mod math;
mod num;
mod scan;
mod tables;

use scan::Scan;

/// Options controlling how a floating-point numeral is recognized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloatOptions {
    decimal_point: u8,
    special_tokens: bool,
}

impl Default for FloatOptions {
    fn default() -> Self {
        FloatOptions {
            decimal_point: b'.',
            special_tokens: true,
        }
    }
}

impl FloatOptions {
    /// Options with the default decimal point and special tokens enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte separating the integer and fraction parts. Defaults to `b'.'`.
    pub fn decimal_point(mut self, byte: u8) -> Self {
        self.decimal_point = byte;
        self
    }

    /// Whether `inf`, `infinity` and `nan` tokens are recognized.
    /// Defaults to `true`.
    pub fn special_tokens(mut self, enabled: bool) -> Self {
        self.special_tokens = enabled;
        self
    }
}

/// Parse a double from the start of `input`.
///
/// The result is the representable value nearest the decimal numeral, with
/// ties broken to even. A numeral beyond the finite range yields
/// [`ErrorKind::Overflow`] alongside an infinity, or a signed zero when it
/// underflows to nothing.
pub fn parse_f64(input: &[u8]) -> ParseOutcome<f64> {
    parse_f64_with(input, &FloatOptions::default())
}

/// Parse a double using explicit [`FloatOptions`].
pub fn parse_f64_with(input: &[u8], options: &FloatOptions) -> ParseOutcome<f64> {
    match scan::scan(input, options.decimal_point, options.special_tokens) {
        Scan::Number(num) => {
            let (magnitude, error) = algorithm::convert(&num);
            let value = if num.negative { -magnitude } else { magnitude };
            match error {
                None => ParseOutcome::ok(value, num.len, num.flags),
                Some(kind) => ParseOutcome::fail(value, num.len, num.flags, kind),
            }
        }
        Scan::Special {
            value,
            negative,
            len,
            flags,
        } => {
            let value = if negative { -value } else { value };
            ParseOutcome::ok(value, len, flags)
        }
        Scan::Zero {
            negative,
            len,
            flags,
        } => {
            let value = if negative { -0.0 } else { 0.0 };
            ParseOutcome::ok(value, len, flags)
        }
        Scan::Invalid { flags } => {
            ParseOutcome::fail(0.0, 0, flags, ErrorKind::InvalidInput)
        }
    }
}

/// Parse a single-precision float from the start of `input`.
pub fn parse_f32(input: &[u8]) -> ParseOutcome<f32> {
    parse_f32_with(input, &FloatOptions::default())
}

/// Parse a single-precision float using explicit [`FloatOptions`].
///
/// The numeral is converted through double precision first, then narrowed.
/// Finite values past the single-precision range saturate at
/// [`f32::MAX`] or collapse to zero, reporting [`ErrorKind::Overflow`].
pub fn parse_f32_with(input: &[u8], options: &FloatOptions) -> ParseOutcome<f32> {
    let wide = parse_f64_with(input, options);
    let narrow = wide.value as f32;
    if !wide.value.is_finite() {
        return ParseOutcome {
            value: narrow,
            len: wide.len,
            flags: wide.flags,
            error: wide.error,
        };
    }
    if narrow.is_infinite() {
        let clamped = if wide.value < 0.0 { -f32::MAX } else { f32::MAX };
        return ParseOutcome::fail(clamped, wide.len, wide.flags, ErrorKind::Overflow);
    }
    if narrow == 0.0 && wide.value != 0.0 {
        return ParseOutcome::fail(narrow, wide.len, wide.flags, ErrorKind::Overflow);
    }
    ParseOutcome {
        value: narrow,
        len: wide.len,
        flags: wide.flags,
        error: wide.error,
    }
}
