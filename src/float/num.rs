//! Bit-level helpers for IEEE-754 doubles.

/// Bitmask for the exponent field.
pub(crate) const EXPONENT_MASK: u64 = 0x7FF0000000000000;
/// Bitmask for the mantissa (fraction), excluding the hidden bit.
pub(crate) const MANTISSA_MASK: u64 = 0x000FFFFFFFFFFFFF;
/// The hidden bit, an implicit 1 above the stored fraction.
pub(crate) const HIDDEN_BIT: u64 = 0x0010000000000000;
/// Size of the stored mantissa, in bits.
pub(crate) const MANTISSA_SIZE: i32 = 52;
/// Full precision of the significand, hidden bit included.
pub(crate) const PRECISION: i32 = 53;
/// Bias of the exponent field.
pub(crate) const EXPONENT_BIAS: i32 = 1023;
/// Smallest unbiased exponent of a normal double.
pub(crate) const MIN_EXPONENT: i32 = -1022;
/// Largest finite double as bits.
pub(crate) const MAX_FINITE_BITS: u64 = 0x7FEFFFFFFFFFFFFF;
/// The default quiet NaN as bits.
pub(crate) const QUIET_NAN_BITS: u64 = 0x7FF8000000000000;

/// A biased exponent of `n` as a bit pattern with zero mantissa.
#[inline]
pub(crate) const fn exp_field(biased: u64) -> u64 {
    biased << MANTISSA_SIZE
}

/// Biased exponent field of a bit pattern.
#[inline]
pub(crate) fn biased_exponent(bits: u64) -> i32 {
    ((bits & EXPONENT_MASK) >> MANTISSA_SIZE) as i32
}

/// One unit in the last place of a positive `x`.
///
/// Valid only while `x` is far enough above the denormal range that the
/// exponent field cannot underflow; the refinement loop keeps its values
/// scaled accordingly.
#[inline]
pub(crate) fn ulp(x: f64) -> f64 {
    let exponent = x.to_bits() & EXPONENT_MASK;
    debug_assert!(exponent > exp_field(MANTISSA_SIZE as u64));
    f64::from_bits(exponent - exp_field(MANTISSA_SIZE as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_fields() {
        assert_eq!(biased_exponent(1.0f64.to_bits()), EXPONENT_BIAS);
        assert_eq!(biased_exponent(f64::MAX.to_bits()), 2046);
        assert_eq!(exp_field(2047), EXPONENT_MASK);
        assert_eq!(f64::from_bits(MAX_FINITE_BITS), f64::MAX);
    }

    #[test]
    fn ulp_of_one() {
        assert_eq!(ulp(1.0), f64::EPSILON);
        assert_eq!(ulp(2.0), 2.0 * f64::EPSILON);
    }
}
