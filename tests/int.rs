use numscan::{
    parse_i16, parse_i64, parse_i8, parse_u16, parse_u32, parse_u64, parse_u8, ErrorKind,
    ParseFlags,
};

#[test]
fn explicit_bases() {
    assert_eq!(parse_u64(b"1010", 2).value, 10);
    assert_eq!(parse_u64(b"777", 8).value, 0o777);
    assert_eq!(parse_u64(b"deadBEEF", 16).value, 0xDEADBEEF);
    assert_eq!(parse_u64(b"zz", 36).value, 35 * 36 + 35);
}

#[test]
fn auto_detection() {
    let r = parse_u64(b"0x10", 0);
    assert_eq!(r.value, 16);
    assert_eq!(r.len, 4);
    assert!(r.flags.contains(ParseFlags::HEX_PREFIX));

    let r = parse_u64(b"010", 0);
    assert_eq!(r.value, 8);
    assert!(r.flags.contains(ParseFlags::OCTAL_PREFIX));

    // A zero followed by a non-octal digit is plain decimal.
    let r = parse_u64(b"08", 0);
    assert_eq!(r.value, 8);
    assert!(!r.flags.contains(ParseFlags::OCTAL_PREFIX));

    let r = parse_u64(b"0", 0);
    assert_eq!(r.value, 0);
    assert_eq!(r.len, 1);
    assert!(r.is_ok());

    // An out-of-range base behaves like 0.
    assert_eq!(parse_u64(b"0x10", 1).value, 16);
    assert_eq!(parse_u64(b"0x10", 99).value, 16);
}

#[test]
fn prefix_is_not_a_numeral_by_itself() {
    for text in [&b"0x"[..], b"0X", b"0xg"] {
        let r = parse_u64(text, 0);
        assert_eq!(r.error, Some(ErrorKind::InvalidInput));
        assert_eq!(r.len, 0);
    }
}

#[test]
fn stops_at_the_first_foreign_byte() {
    let r = parse_u32(b"123,456", 10);
    assert_eq!(r.value, 123);
    assert_eq!(r.len, 3);

    // In base 10 a hex letter is a foreign byte.
    let r = parse_u32(b"12ab", 10);
    assert_eq!(r.value, 12);
    assert_eq!(r.len, 2);
}

#[test]
fn whitespace_and_sign() {
    let r = parse_i64(b"\t -17", 10);
    assert_eq!(r.value, -17);
    assert_eq!(r.len, 5);
    assert!(r.flags.contains(ParseFlags::SPACES));
    assert!(r.flags.contains(ParseFlags::SIGN));

    // Space is also tolerated between the sign and the digits.
    let r = parse_i64(b"- 8", 10);
    assert_eq!(r.value, -8);
    assert_eq!(r.len, 3);
}

#[test]
fn negative_unsigned() {
    // A negative numeral cannot be represented; the value saturates at
    // zero but the numeral is still consumed.
    let r = parse_u64(b"-17", 10);
    assert_eq!(r.value, 0);
    assert_eq!(r.len, 3);
    assert_eq!(r.error, Some(ErrorKind::Overflow));

    // Negative zero is representable.
    let r = parse_u64(b"-0", 10);
    assert_eq!(r.value, 0);
    assert!(r.is_ok());
}

#[test]
fn signed_range() {
    let r = parse_i64(b"9223372036854775807", 10);
    assert_eq!(r.value, i64::MAX);
    assert!(r.is_ok());

    let r = parse_i64(b"-9223372036854775808", 10);
    assert_eq!(r.value, i64::MIN);
    assert!(r.is_ok());

    let r = parse_i64(b"9223372036854775808", 10);
    assert_eq!(r.value, i64::MAX);
    assert_eq!(r.error, Some(ErrorKind::Overflow));

    let r = parse_i64(b"-9223372036854775809", 10);
    assert_eq!(r.value, i64::MIN);
    assert_eq!(r.error, Some(ErrorKind::Overflow));
}

#[test]
fn unsigned_saturation() {
    let r = parse_u64(b"18446744073709551615", 10);
    assert_eq!(r.value, u64::MAX);
    assert!(r.is_ok());

    let r = parse_u64(b"18446744073709551616", 10);
    assert_eq!(r.value, u64::MAX);
    assert_eq!(r.error, Some(ErrorKind::Overflow));
    assert_eq!(r.len, 20);
}

#[test]
fn narrow_widths_clamp() {
    assert_eq!(parse_u8(b"255", 10).value, 255);
    let r = parse_u8(b"256", 10);
    assert_eq!(r.value, u8::MAX);
    assert_eq!(r.error, Some(ErrorKind::Overflow));
    assert_eq!(r.len, 3);

    let r = parse_i8(b"-129", 10);
    assert_eq!(r.value, i8::MIN);
    assert_eq!(r.error, Some(ErrorKind::Overflow));
    assert_eq!(parse_i8(b"-128", 10).value, i8::MIN);

    assert_eq!(parse_u16(b"65535", 10).value, u16::MAX);
    let r = parse_i16(b"40000", 10);
    assert_eq!(r.value, i16::MAX);
    assert_eq!(r.error, Some(ErrorKind::Overflow));
}

#[test]
fn invalid_input_consumes_nothing() {
    for text in [&b""[..], b"   ", b"+", b"-", b"abc", b".5"] {
        let r = parse_i64(text, 10);
        assert_eq!(r.error, Some(ErrorKind::InvalidInput), "{:?}", text);
        assert_eq!(r.len, 0);
        assert_eq!(r.value, 0);
    }
}
