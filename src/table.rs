//! Character classification tables.

/// Marker for bytes that are not a digit in any supported base.
pub(crate) const NON_DIGIT: u8 = 0xFF;

// Value of each byte when read as a digit: `0-9` map to 0..=9 and letters of
// either case map to 10..=35. Everything else is NON_DIGIT.
const __: u8 = NON_DIGIT;
static DIGIT_VALUES: [u8; 256] = [
    //   0   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 0
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, __, __, __, __, __, __, // 3
    __, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, // 4
    25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, __, __, __, __, __, // 5
    __, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, // 6
    25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, __, __, __, __, __, // 7
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

/// Digit value of a byte, or NON_DIGIT.
#[inline]
pub(crate) fn digit_value(byte: u8) -> u8 {
    DIGIT_VALUES[byte as usize]
}

/// ASCII whitespace, including vertical tab.
#[inline]
pub(crate) fn is_space(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | 0x0B | 0x0C | b'\r' | b' ')
}
