//! Numeric text conversion with explicit consumption reporting.
//!
//! Standard library parsers reject any input that is not exactly one
//! numeral. The parsers here instead read a numeral off the *front* of a
//! byte slice and report how far they got, which is what a hand-written
//! lexer or a config-file reader actually needs:
//!
//! ```
//! let r = numscan::parse_i32(b"-42 apples", 0);
//! assert!(r.is_ok());
//! assert_eq!(r.value, -42);
//! assert_eq!(r.len, 3);
//! ```
//!
//! Every parser returns a [`ParseOutcome`] carrying the value, the number
//! of bytes consumed, a [`ParseFlags`] bitset describing the grammar
//! elements that appeared, and an optional [`ErrorKind`]. Failed parses
//! still carry a best-effort value: zero for invalid input, a saturated
//! extreme for out-of-range magnitudes.
//!
//! # Integers
//!
//! Integer parsers take an explicit base between 2 and 36, or auto-detect
//! conventional prefixes when the base is 0:
//!
//! ```
//! use numscan::ParseFlags;
//!
//! let r = numscan::parse_u32(b"0xFF", 0);
//! assert_eq!(r.value, 255);
//! assert!(r.flags.contains(ParseFlags::HEX_PREFIX));
//!
//! let r = numscan::parse_u32(b"0755", 0);
//! assert_eq!(r.value, 0o755);
//! assert!(r.flags.contains(ParseFlags::OCTAL_PREFIX));
//! ```
//!
//! # Floating point
//!
//! [`parse_f64`] converts the decimal numeral to the *nearest*
//! representable double, with ties broken to even. Short numerals take an
//! exact fast path; everything else is refined against the exact decimal
//! value with big-integer arithmetic until the result is within half a
//! unit in the last place.
//!
//! ```
//! let r = numscan::parse_f64(b"6.02214076e23");
//! assert_eq!(r.value, 6.02214076e23);
//! assert_eq!(r.len, 13);
//! ```
//!
//! [`FloatOptions`] selects a different decimal-point byte or disables the
//! `inf`/`nan` tokens for stricter grammars.

#![doc(html_root_url = "https://docs.rs/numscan/0.1.0")]
#![deny(missing_docs)]
#![allow(
    clippy::comparison_chain,
    clippy::excessive_precision,
    clippy::unreadable_literal
)]

mod boolean;
mod error;
mod float;
mod int;
mod outcome;
mod table;

pub use crate::boolean::parse_bool;
pub use crate::error::ErrorKind;
pub use crate::float::{parse_f32, parse_f32_with, parse_f64, parse_f64_with, FloatOptions};
pub use crate::int::{
    parse_i16, parse_i32, parse_i64, parse_i8, parse_u16, parse_u32, parse_u64, parse_u8,
};
pub use crate::outcome::{ParseFlags, ParseOutcome};
