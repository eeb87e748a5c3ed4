//! Exactly-rounded decimal to binary conversion.
//!
//! The conversion runs in three stages. A fast path handles short
//! significands whose scaling fits exact double arithmetic. Everything else
//! starts from a staged power-of-ten approximation, then a big-integer
//! comparison against the exact decimal value measures the error in ULPs
//! and nudges the approximation until it is within half an ULP, with ties
//! broken to even.
//!
//! Values whose scaled exponent drops near the denormal range are kept
//! multiplied by 2^106 throughout refinement, so every intermediate stays
//! normal; the scale comes off at the very end.

use std::cmp::Ordering;

use crate::error::ErrorKind;

use super::bignum::Bigint;
use super::math::{Limb, Math, POW10_SMALL};
use super::num::{
    biased_exponent, exp_field, ulp, EXPONENT_BIAS, EXPONENT_MASK, HIDDEN_BIT, MANTISSA_MASK,
    MANTISSA_SIZE, MAX_FINITE_BITS, MIN_EXPONENT, PRECISION,
};
use super::scan::ScannedFloat;
use super::tables::{BIGTENS, TENS, TINYTENS};

/// Largest power of ten exactly representable in a double.
const TEN_PMAX: i64 = 22;

/// Digit count always exact in a double significand.
const DBL_DIG: i64 = 15;

/// Biased exponent at or below which a scaled value maps to a denormal.
const SCALED_DENORMAL_EXP: i32 = 2 * PRECISION; // 106

/// Refinement converges in one or two passes; the cap only guards against
/// a cycle between two neighbouring representations.
const MAX_ITERATIONS: usize = 32;

/// Convert a scanned numeral to the nearest double magnitude.
///
/// The sign is left to the caller. The error slot reports range failures,
/// paired with `+inf` for overflow and `+0` or the nearest denormal
/// neighbour for underflow.
pub(super) fn convert(num: &ScannedFloat<'_>) -> (f64, Option<ErrorKind>) {
    let nd = num.nd as i64;
    let k = nd.min(16);

    // Seed from the first 16 digits.
    let mut rv = f64::from(num.y);
    if k > 9 {
        rv = TENS[(k - 9) as usize] * rv + f64::from(num.z);
    }
    let mut e1 = num.exp10 + (nd - k);

    // Fast path: the significand is exact and a single multiply or divide
    // by an exact power of ten rounds correctly in one operation.
    if nd <= DBL_DIG {
        if e1 == 0 {
            return (rv, None);
        }
        if e1 > 0 {
            if e1 <= TEN_PMAX {
                return (rv * TENS[e1 as usize], None);
            }
            let i = DBL_DIG - nd;
            if e1 <= TEN_PMAX + i {
                // Scale spare digit positions into the significand first,
                // both factors stay exact.
                e1 -= i;
                rv *= TENS[i as usize];
                return (rv * TENS[e1 as usize], None);
            }
        } else if -e1 <= TEN_PMAX {
            return (rv / TENS[-e1 as usize], None);
        }
    }

    // Staged approximation: fold the decimal exponent into rv sixteen
    // digits at a time, then by doubling powers.
    let mut scale: i32 = 0;
    if e1 > 0 {
        let i = (e1 & 15) as usize;
        if i != 0 {
            rv *= TENS[i];
        }
        e1 &= !15;
        if e1 != 0 {
            if e1 > 308 {
                return (f64::INFINITY, Some(ErrorKind::Overflow));
            }
            e1 >>= 4;
            let mut j = 0;
            while e1 > 1 {
                if e1 & 1 != 0 {
                    rv *= BIGTENS[j];
                }
                j += 1;
                e1 >>= 1;
            }
            // The last multiply may land past the largest finite double.
            // Pull the exponent down first so the product stays finite,
            // then restore it or saturate.
            let bits = rv.to_bits() - exp_field(PRECISION as u64);
            rv = f64::from_bits(bits) * BIGTENS[j];
            let z = rv.to_bits() & EXPONENT_MASK;
            if z > exp_field((EXPONENT_BIAS + 1024 - PRECISION) as u64) {
                return (f64::INFINITY, Some(ErrorKind::Overflow));
            }
            if z > exp_field((EXPONENT_BIAS + 1023 - PRECISION) as u64) {
                // Saturate and let refinement shave it back if the exact
                // value is finite.
                rv = f64::MAX;
            } else {
                rv = f64::from_bits(rv.to_bits() + exp_field(PRECISION as u64));
            }
        }
    } else if e1 < 0 {
        let mut e1 = -e1;
        let i = (e1 & 15) as usize;
        if i != 0 {
            rv /= TENS[i];
        }
        e1 >>= 4;
        if e1 != 0 {
            if e1 >= 1 << BIGTENS.len() {
                return (0.0, Some(ErrorKind::Overflow));
            }
            if e1 & 0x10 != 0 {
                // The result may be denormal; carry a 2^106 scale through
                // refinement (the last TINYTENS entry embeds it).
                scale = SCALED_DENORMAL_EXP;
            }
            let mut j = 0;
            while e1 > 0 {
                if e1 & 1 != 0 {
                    rv *= TINYTENS[j];
                }
                j += 1;
                e1 >>= 1;
            }
            if scale != 0 {
                // Bits below the denormal precision of the unscaled value
                // are garbage from the divisions above; zero them so the
                // refinement error measurement starts clean.
                let j = SCALED_DENORMAL_EXP + 1 - biased_exponent(rv.to_bits());
                if j > 0 {
                    let bits = if j >= PRECISION {
                        exp_field((PRECISION + 2) as u64)
                    } else {
                        rv.to_bits() & (!0u64 << j)
                    };
                    rv = f64::from_bits(bits);
                }
            }
            if rv == 0.0 {
                return (0.0, Some(ErrorKind::Overflow));
            }
        }
    }

    refine(rv, num, scale)
}

/// Measure rv against the exact decimal value and adjust until the error
/// is below half an ULP.
fn refine(mut rv: f64, num: &ScannedFloat<'_>, scale: i32) -> (f64, Option<ErrorKind>) {
    let bd0 = fold_digits(num);
    let e = num.exp10;
    let mut error = None;

    for _ in 0..MAX_ITERATIONS {
        // Line up bb = rv, bd = the decimal digits and bs = half an ULP of
        // rv on a common scale of powers of two and five.
        let mut bd = bd0.clone();
        let (mut bb, bbe, bbbits) = d2b(rv);
        let mut bs = Bigint::from_u32(1);

        let (mut bb2, bb5, mut bd2, bd5) = if e >= 0 { (0, 0, e, e) } else { (-e, -e, 0, 0) };
        if bbe >= 0 {
            bb2 += i64::from(bbe);
        } else {
            bd2 -= i64::from(bbe);
        }
        let mut bs2 = bb2;
        let j = i64::from(bbe) - i64::from(scale);
        let i = j + bbbits as i64 - 1;
        let j = if i < i64::from(MIN_EXPONENT) {
            // Denormal target, the half-ULP unit is fixed at the bottom
            // of the exponent range.
            j + i64::from(PRECISION) - i64::from(MIN_EXPONENT)
        } else {
            i64::from(PRECISION) + 1 - bbbits as i64
        };
        bb2 += j;
        bd2 += j;
        bd2 += i64::from(scale);

        let common = bb2.min(bd2).min(bs2);
        if common > 0 {
            bb2 -= common;
            bd2 -= common;
            bs2 -= common;
        }
        if bb5 > 0 {
            bs.imul_pow5(bb5 as u32);
            bb.imul_big(&bs);
        }
        if bb2 > 0 {
            bb.ishl(bb2 as usize);
        }
        if bd5 > 0 {
            bd.imul_pow5(bd5 as u32);
        }
        if bd2 > 0 {
            bd.ishl(bd2 as usize);
        }
        if bs2 > 0 {
            bs.ishl(bs2 as usize);
        }

        let (mut delta, order) = bb.difference(&bd);
        let dsign = order == Ordering::Less;

        match delta.compare(&bs) {
            Ordering::Less => {
                // Error below half an ULP. Accept, unless rv sits exactly
                // on a power of two and the true value is below it, where
                // the ULP on the lower side is half as big.
                if dsign
                    || rv.to_bits() & MANTISSA_MASK != 0
                    || rv.to_bits() & EXPONENT_MASK
                        <= exp_field((SCALED_DENORMAL_EXP + 1) as u64)
                {
                    break;
                }
                if delta.is_zero() {
                    break;
                }
                delta.ishl(1);
                if delta.compare(&bs) == Ordering::Greater {
                    rv = drop_down(rv, scale, &mut error);
                }
                break;
            }
            Ordering::Equal => {
                // Exactly half-way, round to even.
                if dsign {
                    if at_upper_boundary(rv, scale) {
                        // All-ones significand, the even neighbour above
                        // has the next exponent.
                        rv = f64::from_bits(
                            (rv.to_bits() & EXPONENT_MASK) + exp_field(1),
                        );
                        break;
                    }
                } else if rv.to_bits() & MANTISSA_MASK == 0 {
                    rv = drop_down(rv, scale, &mut error);
                    break;
                }
                if rv.to_bits() & 1 == 0 {
                    break;
                }
                if dsign {
                    rv += ulp(rv);
                } else {
                    rv -= ulp(rv);
                    if rv == 0.0 {
                        return (0.0, Some(ErrorKind::Overflow));
                    }
                }
                break;
            }
            Ordering::Greater => {
                // Off by at least half an ULP; estimate the error in ULPs
                // and take another pass.
                let mut aadj = delta.ratio(&bs);
                let mut aadj1;
                if aadj <= 2.0 {
                    if dsign {
                        aadj = 1.0;
                        aadj1 = 1.0;
                    } else if rv.to_bits() & MANTISSA_MASK != 0 {
                        if rv.to_bits() == 1 {
                            // Below half the smallest denormal.
                            return (0.0, Some(ErrorKind::Overflow));
                        }
                        aadj = 1.0;
                        aadj1 = -1.0;
                    } else {
                        // On a power of two; the step below is half-sized.
                        if aadj < 1.0 {
                            aadj = 0.5;
                        } else {
                            aadj *= 0.5;
                        }
                        aadj1 = -aadj;
                    }
                } else {
                    aadj *= 0.5;
                    aadj1 = if dsign { aadj } else { -aadj };
                }

                let y = rv.to_bits() & EXPONENT_MASK;
                if y == exp_field(2046) {
                    // At the top exponent the adjustment may overflow;
                    // step on a rescaled copy.
                    let rv0 = rv;
                    let bits = rv.to_bits() - exp_field(PRECISION as u64);
                    rv = f64::from_bits(bits);
                    rv += aadj1 * ulp(rv);
                    if rv.to_bits() & EXPONENT_MASK
                        >= exp_field((EXPONENT_BIAS + 1024 - PRECISION) as u64)
                    {
                        if rv0.to_bits() == MAX_FINITE_BITS {
                            return (f64::INFINITY, Some(ErrorKind::Overflow));
                        }
                        rv = f64::MAX;
                        continue;
                    }
                    rv = f64::from_bits(rv.to_bits() + exp_field(PRECISION as u64));
                } else {
                    if scale != 0 && y <= exp_field(SCALED_DENORMAL_EXP as u64) {
                        // The scaled value is denormal, steps under one
                        // ULP of the unscaled value would be lost. Round
                        // the step to whole ULPs and rescale it.
                        if aadj <= f64::from(0x7fffffffu32) {
                            let mut whole = aadj as i32;
                            if whole <= 0 {
                                whole = 1;
                            }
                            aadj = f64::from(whole);
                            aadj1 = if dsign { aadj } else { -aadj };
                        }
                        aadj1 = f64::from_bits(
                            aadj1
                                .to_bits()
                                .wrapping_add(exp_field((SCALED_DENORMAL_EXP + 1) as u64) - y),
                        );
                    }
                    rv += aadj1 * ulp(rv);
                }

                // If the exponent did not move and the adjustment was not
                // near a half-ULP boundary, the next pass cannot change
                // the rounding.
                let z = rv.to_bits() & EXPONENT_MASK;
                if scale == 0 && y == z {
                    let whole = aadj as i32;
                    aadj -= f64::from(whole);
                    if dsign || rv.to_bits() & MANTISSA_MASK != 0 {
                        if !(0.4999999..=0.5000001).contains(&aadj) {
                            break;
                        }
                    } else if aadj < 0.4999999 / 2.0 {
                        break;
                    }
                }
            }
        }
    }

    if scale != 0 {
        rv *= f64::from_bits(exp_field((EXPONENT_BIAS - SCALED_DENORMAL_EXP) as u64));
        if rv == 0.0 {
            error = Some(ErrorKind::Overflow);
        }
    }
    (rv, error)
}

/// Decrement rv to the value just below its power of two, all significand
/// bits set at the next lower exponent.
fn drop_down(rv: f64, scale: i32, error: &mut Option<ErrorKind>) -> f64 {
    let bits = rv.to_bits();
    if scale != 0 {
        let exponent = bits & EXPONENT_MASK;
        if exponent <= exp_field((SCALED_DENORMAL_EXP + 1) as u64) {
            if exponent > exp_field((PRECISION + 2) as u64) {
                // Scaled denormal rounds even to itself.
                return rv;
            }
            // Below the smallest denormal.
            *error = Some(ErrorKind::Overflow);
            return f64::from_bits(exp_field((PRECISION + 2) as u64));
        }
    }
    f64::from_bits(((bits & EXPONENT_MASK) - exp_field(1)) | MANTISSA_MASK)
}

/// Check for an all-ones significand, whose upper neighbour lives at the
/// next binary exponent.
fn at_upper_boundary(rv: f64, scale: i32) -> bool {
    let bits = rv.to_bits();
    let biased = biased_exponent(bits);
    if scale != 0 && biased <= SCALED_DENORMAL_EXP {
        // In the scaled denormal range only the bits above the denormal
        // precision are populated.
        biased >= PRECISION + 2
            && bits & MANTISSA_MASK
                == MANTISSA_MASK & (!0u64 << (SCALED_DENORMAL_EXP + 1 - biased))
    } else {
        bits & MANTISSA_MASK == MANTISSA_MASK
    }
}

/// Fold the significant digits into a big integer, nine digits at a time.
fn fold_digits(num: &ScannedFloat<'_>) -> Bigint {
    let mut b = Bigint::default();
    let mut pending: Limb = 0;
    let mut count = 0usize;
    for &d in num.integer.iter().chain(num.fraction) {
        pending = pending * 10 + Limb::from(d - b'0');
        count += 1;
        if count == 9 {
            b.imul_small(POW10_SMALL[9]);
            b.iadd_small(pending);
            pending = 0;
            count = 0;
        }
    }
    if count != 0 {
        b.imul_small(POW10_SMALL[count]);
        b.iadd_small(pending);
    }
    b
}

/// Split a positive double into significand and binary exponent, returning
/// the significand as a big integer along with its bit length.
fn d2b(x: f64) -> (Bigint, i32, usize) {
    let bits = x.to_bits();
    let biased = biased_exponent(bits);
    let (significand, exponent) = if biased == 0 {
        (bits & MANTISSA_MASK, MIN_EXPONENT - MANTISSA_SIZE)
    } else {
        (
            (bits & MANTISSA_MASK) | HIDDEN_BIT,
            biased - (EXPONENT_BIAS + MANTISSA_SIZE),
        )
    };
    let b = Bigint::from_u64(significand);
    let length = b.bit_length();
    (b, exponent, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make<'a>(digits: &'a str, exp10: i64) -> ScannedFloat<'a> {
        let digits = digits.as_bytes();
        let mut y = 0u32;
        let mut z = 0u32;
        for (i, &b) in digits.iter().take(16).enumerate() {
            let d = u32::from(b - b'0');
            if i < 9 {
                y = y * 10 + d;
            } else {
                z = z * 10 + d;
            }
        }
        ScannedFloat {
            negative: false,
            integer: digits,
            fraction: b"",
            nd: digits.len(),
            exp10,
            y,
            z,
            len: digits.len(),
            flags: crate::outcome::ParseFlags::empty(),
        }
    }

    #[test]
    fn fast_path() {
        assert_eq!(convert(&make("123", 2)), (12300.0, None));
        assert_eq!(convert(&make("5", -1)), (0.5, None));
        assert_eq!(convert(&make("1", 22)), (1e22, None));
        assert_eq!(convert(&make("1", -22)), (1e-22, None));
        // Shifting spare digits keeps both factors exact.
        assert_eq!(convert(&make("123", 24)), (1.23e26, None));
    }

    #[test]
    fn refinement_corrects_the_seed() {
        // Worst cases for a naive staged approximation.
        let (v, err) = convert(&make("22250738585072014", -324));
        assert_eq!(v, 2.2250738585072014e-308);
        assert_eq!(err, None);

        let (v, err) = convert(&make("17976931348623157", 292));
        assert_eq!(v.to_bits(), MAX_FINITE_BITS);
        assert_eq!(err, None);

        // One step above 1.0, the 17th digit decides the last bit.
        let (v, err) = convert(&make("10000000000000002", -16));
        assert_eq!(v.to_bits(), 1.0f64.to_bits() + 1);
        assert_eq!(err, None);
    }

    #[test]
    fn long_significands_round_to_even() {
        // 1 + 2^-53 exactly: ties to 1.0.
        let half_ulp = "100000000000000011102230246251565404236316680908203125";
        let (v, err) = convert(&make(half_ulp, -53));
        assert_eq!(err, None);
        assert_eq!(v, 1.0);
    }

    #[test]
    fn overflow_and_underflow() {
        assert_eq!(
            convert(&make("1", 309)),
            (f64::INFINITY, Some(ErrorKind::Overflow))
        );
        assert_eq!(convert(&make("1", -400)), (0.0, Some(ErrorKind::Overflow)));
        // Largest double times ten overflows after refinement too.
        let (v, err) = convert(&make("17976931348623157", 293));
        assert_eq!(v, f64::INFINITY);
        assert_eq!(err, Some(ErrorKind::Overflow));
    }

    #[test]
    fn denormals() {
        // Smallest denormal.
        let (v, err) = convert(&make("5", -324));
        assert_eq!(v.to_bits(), 1);
        assert_eq!(err, None);

        // Half of it rounds to even, which is zero.
        let (v, err) = convert(&make("247032822920623272", -341));
        assert_eq!(v, 0.0);
        let _ = err;
    }

    #[test]
    fn digit_folding() {
        let num = make("12345678901234567891", 0);
        assert_eq!(
            fold_digits(&num).data,
            Bigint::from_u64(12345678901234567891).data
        );

        // 2^64 exceeds a single fold.
        let num = make("18446744073709551616", 0);
        let mut expected = Bigint::from_u64(u64::MAX);
        expected.iadd_small(1);
        assert_eq!(fold_digits(&num).data, expected.data);
    }

    #[test]
    fn double_decomposition() {
        let (b, e, bits) = d2b(1.0);
        assert_eq!(b.data, vec![0, 0x100000]);
        assert_eq!(e, -52);
        assert_eq!(bits, 53);

        let (b, e, bits) = d2b(f64::from_bits(1));
        assert_eq!(b.data, vec![1]);
        assert_eq!(e, -1074);
        assert_eq!(bits, 1);
    }
}
