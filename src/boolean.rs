//! Boolean literal recognition.

use crate::error::ErrorKind;
use crate::outcome::{ParseFlags, ParseOutcome};
use crate::table::is_space;

// Ordered: the first matching literal wins.
const LITERALS: [(&[u8], bool); 6] = [
    (b"true", true),
    (b"false", false),
    (b"yes", true),
    (b"no", false),
    (b"1", true),
    (b"0", false),
];

/// Parse a boolean literal.
///
/// Skips leading whitespace, then matches the input case-insensitively
/// against `true`, `false`, `yes`, `no`, `1` and `0`. A match immediately
/// followed by another alphanumeric character is rejected, so `"truex"` is
/// not `true`. The consumed length covers only the matched literal.
pub fn parse_bool(input: &[u8]) -> ParseOutcome<bool> {
    let mut flags = ParseFlags::empty();
    let mut pos = 0;

    while pos < input.len() && is_space(input[pos]) {
        pos += 1;
    }
    if pos != 0 {
        flags.insert(ParseFlags::SPACES);
    }

    let rest = &input[pos..];
    for (literal, value) in LITERALS {
        if rest.len() < literal.len() || !rest[..literal.len()].eq_ignore_ascii_case(literal) {
            continue;
        }
        match rest.get(literal.len()) {
            Some(byte) if byte.is_ascii_alphanumeric() => continue,
            _ => return ParseOutcome::ok(value, pos + literal.len(), flags),
        }
    }

    ParseOutcome::fail(false, 0, flags, ErrorKind::InvalidInput)
}
