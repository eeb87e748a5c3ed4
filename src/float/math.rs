//! Building-blocks for arbitrary-precision math.
//!
//! These algorithms assume little-endian order for the large integer
//! buffers, so for a `vec![0, 1, 2, 3]`, `3` is the most significant limb,
//! and `0` is the least significant limb.

use std::cmp;

// ALIASES
// -------

//  Type for a single limb of the big integer.
//
//  A limb is analogous to a digit in base10, except it stores a 32-bit
//  number instead. 32-bit limbs with 64-bit wide arithmetic keep every
//  platform on the same code path; the operands in this crate never grow
//  large enough for a wider limb to pay off.
pub(crate) type Limb = u32;

type Wide = u64;

/// Powers of five that fit in a single limb.
pub(crate) const POW5_SMALL: [Limb; 14] = [
    1, 5, 25, 125, 625, 3125, 15625, 78125, 390625, 1953125, 9765625, 48828125, 244140625,
    1220703125,
];

/// Powers of ten that fit in a single limb.
pub(crate) const POW10_SMALL: [Limb; 10] = [
    1, 10, 100, 1000, 10000, 100000, 1000000, 10000000, 100000000, 1000000000,
];

// HI64
// ----

/// Check if any of the remaining bits are non-zero.
#[inline]
fn nonzero(x: &[Limb], rindex: usize) -> bool {
    let len = x.len();
    x[..len - rindex].iter().rev().any(|&limb| limb != 0)
}

/// Shift 64-bit integer to high 64-bits.
#[inline]
fn u64_to_hi64_1(r0: u64) -> (u64, bool) {
    debug_assert!(r0 != 0);
    let ls = r0.leading_zeros();
    (r0 << ls, false)
}

/// Shift 2 64-bit integers to high 64-bits.
#[inline]
fn u64_to_hi64_2(r0: u64, r1: u64) -> (u64, bool) {
    debug_assert!(r0 != 0);
    let ls = r0.leading_zeros();
    let rs = 64 - ls;
    let v = match ls {
        0 => r0,
        _ => r0 << ls | r1 >> rs,
    };
    let n = r1 << ls != 0;
    (v, n)
}

/// Extract the high 64 bits from a little-endian slice, and whether any of
/// the truncated lower bits were non-zero.
fn hi64(x: &[Limb]) -> (u64, bool) {
    match x.len() {
        0 => (0, false),
        1 => u64_to_hi64_1(u64::from(x[0])),
        2 => u64_to_hi64_1(u64::from(x[1]) << 32 | u64::from(x[0])),
        len => {
            let r0 = u64::from(x[len - 1]);
            let r1 = u64::from(x[len - 2]) << 32 | u64::from(x[len - 3]);
            let (v, n) = u64_to_hi64_2(r0, r1);
            (v, n || nonzero(x, 3))
        }
    }
}

// SCALAR
// ------

// Scalar-to-scalar operations, building-blocks for arbitrary-precision
// operations.

mod scalar {
    use super::*;

    // ADDITION

    /// Add two small integers and return the resulting value and if overflow happens.
    #[inline]
    pub fn add(x: Limb, y: Limb) -> (Limb, bool) {
        x.overflowing_add(y)
    }

    /// AddAssign two small integers and return if overflow happens.
    #[inline]
    pub fn iadd(x: &mut Limb, y: Limb) -> bool {
        let t = add(*x, y);
        *x = t.0;
        t.1
    }

    // SUBTRACTION

    /// Subtract two small integers and return the resulting value and if overflow happens.
    #[inline]
    pub fn sub(x: Limb, y: Limb) -> (Limb, bool) {
        x.overflowing_sub(y)
    }

    /// SubAssign two small integers and return if overflow happens.
    #[inline]
    pub fn isub(x: &mut Limb, y: Limb) -> bool {
        let t = sub(*x, y);
        *x = t.0;
        t.1
    }

    // MULTIPLICATION

    /// Multiply two small integers (with carry).
    ///
    /// Returns the (low, high) components.
    #[inline]
    pub fn mul(x: Limb, y: Limb, carry: Limb) -> (Limb, Limb) {
        // Cannot overflow: the wide type is twice as wide, and
        // `Wide::MAX - Limb::MAX * Limb::MAX >= Limb::MAX`.
        let z: Wide = Wide::from(x) * Wide::from(y) + Wide::from(carry);
        (z as Limb, (z >> 32) as Limb)
    }

    /// MulAssign two small integers, returning the overflow contribution.
    #[inline]
    pub fn imul(x: &mut Limb, y: Limb, carry: Limb) -> Limb {
        let t = mul(*x, y, carry);
        *x = t.0;
        t.1
    }
} // scalar

// SMALL
// -----

// Large-to-small operations, to modify a big integer from a native scalar.

mod small {
    use super::*;

    // ADDITION

    /// Implied AddAssign implementation for adding a small integer to bigint.
    ///
    /// Allows us to choose a start-index in x to store, to allow incrementing
    /// from a non-zero start.
    #[inline]
    pub fn iadd_impl(x: &mut Vec<Limb>, y: Limb, xstart: usize) {
        if x.len() <= xstart {
            x.push(y);
        } else {
            // Initial add
            let mut carry = scalar::iadd(&mut x[xstart], y);

            // Increment until overflow stops occurring.
            let mut size = xstart + 1;
            while carry && size < x.len() {
                carry = scalar::iadd(&mut x[size], 1);
                size += 1;
            }

            // If we overflowed the buffer entirely, need to add 1 to the end
            // of the buffer.
            if carry {
                x.push(1);
            }
        }
    }

    /// AddAssign small integer to bigint.
    #[inline]
    pub fn iadd(x: &mut Vec<Limb>, y: Limb) {
        iadd_impl(x, y, 0);
    }

    // SUBTRACTION

    /// SubAssign small integer to bigint.
    /// Does not do overflowing subtraction.
    #[inline]
    pub fn isub_impl(x: &mut Vec<Limb>, y: Limb, xstart: usize) {
        debug_assert!(x.len() > xstart && (x[xstart] >= y || x.len() > xstart + 1));

        // Initial subtraction
        let mut carry = scalar::isub(&mut x[xstart], y);

        // Increment until overflow stops occurring.
        let mut size = xstart + 1;
        while carry && size < x.len() {
            carry = scalar::isub(&mut x[size], 1);
            size += 1;
        }
        normalize(x);
    }

    // MULTIPLICATION

    /// MulAssign small integer to bigint.
    #[inline]
    pub fn imul(x: &mut Vec<Limb>, y: Limb) {
        // Multiply iteratively over all elements, adding the carry each time.
        let mut carry: Limb = 0;
        for xi in x.iter_mut() {
            carry = scalar::imul(xi, y, carry);
        }

        // Overflow of value, add to end.
        if carry != 0 {
            x.push(carry);
        }
    }

    /// Mul small integer to bigint.
    #[inline]
    pub fn mul(x: &[Limb], y: Limb) -> Vec<Limb> {
        let mut z = x.to_vec();
        imul(&mut z, y);
        z
    }

    /// MulAssign by a power of five.
    ///
    /// Iterative multiplication by the largest single-limb power. The
    /// operands here stay far below the sizes where exponentiation by
    /// squaring or a large-powers table would win.
    pub fn imul_pow5(x: &mut Vec<Limb>, n: u32) {
        if n == 0 {
            return;
        }

        // Multiply by the largest small power until n < step.
        let step = POW5_SMALL.len() - 1;
        let power = POW5_SMALL[step];
        let mut n = n as usize;
        while n >= step {
            imul(x, power);
            n -= step;
        }

        // Multiply by the remainder.
        imul(x, POW5_SMALL[n]);
    }

    // BIT LENGTH

    /// Get number of leading zero bits in the storage.
    #[inline]
    pub fn leading_zeros(x: &[Limb]) -> usize {
        match x.last() {
            Some(limb) => limb.leading_zeros() as usize,
            None => 0,
        }
    }

    /// Calculate the bit-length of the big-integer.
    #[inline]
    pub fn bit_length(x: &[Limb]) -> usize {
        32 * x.len() - leading_zeros(x)
    }

    // SHL

    /// Shift-left bits inside a buffer.
    ///
    /// Assumes `n < 32`, IE, internally shifting bits.
    #[inline]
    pub fn ishl_bits(x: &mut Vec<Limb>, n: usize) {
        debug_assert!(n < 32);
        if n == 0 {
            return;
        }

        // Internally, for each item, we shift left by n, and add the
        // previous limb's right-shifted overflow bits.
        let rshift = 32 - n;
        let lshift = n;
        let mut prev: Limb = 0;
        for xi in x.iter_mut() {
            let tmp = *xi;
            *xi <<= lshift;
            *xi |= prev >> rshift;
            prev = tmp;
        }

        // Always push the carry, even if it creates a non-normal result.
        let carry = prev >> rshift;
        if carry != 0 {
            x.push(carry);
        }
    }

    /// Shift-left `n` limbs inside a buffer.
    #[inline]
    pub fn ishl_limbs(x: &mut Vec<Limb>, n: usize) {
        debug_assert!(n != 0);
        if !x.is_empty() {
            let len = x.len();
            x.resize(len + n, 0);
            x.rotate_right(n);
        }
    }

    /// Shift-left buffer by n bits.
    #[inline]
    pub fn ishl(x: &mut Vec<Limb>, n: usize) {
        let rem = n % 32;
        let div = n / 32;
        ishl_bits(x, rem);
        if div != 0 {
            ishl_limbs(x, div);
        }
    }

    // NORMALIZE

    /// Normalize the container by popping any leading zeros.
    #[inline]
    pub fn normalize(x: &mut Vec<Limb>) {
        while x.last() == Some(&0) {
            x.pop();
        }
    }
} // small

// LARGE
// -----

// Large-to-large operations, to modify a big integer from another.

mod large {
    use super::*;

    // RELATIVE OPERATORS

    /// Compare `x` to `y`, in little-endian order.
    #[inline]
    pub fn compare(x: &[Limb], y: &[Limb]) -> cmp::Ordering {
        if x.len() != y.len() {
            x.len().cmp(&y.len())
        } else {
            let iter = x.iter().rev().zip(y.iter().rev());
            for (&xi, &yi) in iter {
                if xi != yi {
                    return xi.cmp(&yi);
                }
            }
            cmp::Ordering::Equal
        }
    }

    /// Check if x is greater than or equal to y.
    #[inline]
    pub fn greater_equal(x: &[Limb], y: &[Limb]) -> bool {
        compare(x, y) != cmp::Ordering::Less
    }

    // ADDITION

    /// Implied AddAssign implementation for bigints.
    ///
    /// Allows us to choose a start-index in x to store, so we can avoid
    /// padding the buffer with zeros when not needed, optimized for vectors.
    pub fn iadd_impl(x: &mut Vec<Limb>, y: &[Limb], xstart: usize) {
        // The effective x buffer is from `xstart..x.len()`, so we need to treat
        // that as the current range. If the effective y buffer is longer, need
        // to resize to that, + the start index.
        if y.len() > x.len() - xstart {
            x.resize(y.len() + xstart, 0);
        }

        // Iteratively add elements from y to x.
        let mut carry = false;
        for (xi, yi) in x[xstart..].iter_mut().zip(y.iter()) {
            // Only one op of the two can overflow, since we added at max
            // Limb::MAX + Limb::MAX. Add the previous carry, and store the
            // current carry for the next.
            let mut tmp = scalar::iadd(xi, *yi);
            if carry {
                tmp |= scalar::iadd(xi, 1);
            }
            carry = tmp;
        }

        // Overflow from the previous bit.
        if carry {
            small::iadd_impl(x, 1, y.len() + xstart);
        }
    }

    // SUBTRACTION

    /// SubAssign bigint to bigint.
    pub fn isub(x: &mut Vec<Limb>, y: &[Limb]) {
        // Basic underflow checks.
        debug_assert!(greater_equal(x, y));

        // Iteratively subtract elements from y from x.
        let mut carry = false;
        for (xi, yi) in x.iter_mut().zip(y.iter()) {
            let mut tmp = scalar::isub(xi, *yi);
            if carry {
                tmp |= scalar::isub(xi, 1);
            }
            carry = tmp;
        }

        if carry {
            small::isub_impl(x, 1, y.len());
        } else {
            small::normalize(x);
        }
    }

    // MULTIPLICATION

    /// Grade-school multiplication algorithm.
    ///
    /// Slow, naive algorithm, using limb-bit bases and just shifting left for
    /// each iteration. This works in O(n*m) time, which is fine for the
    /// operand sizes the refinement loop produces.
    fn long_mul(x: &[Limb], y: &[Limb]) -> Vec<Limb> {
        // Using the immutable value, multiply by all the scalars in y, using
        // the algorithm defined above. Use a single buffer to avoid
        // frequent reallocations. Handle the first case to avoid a redundant
        // addition, since we know y.len() >= 1.
        let mut z = small::mul(x, y[0]);
        z.resize(x.len() + y.len(), 0);

        // Handle the iterative cases.
        for (i, &yi) in y[1..].iter().enumerate() {
            let zi = small::mul(x, yi);
            iadd_impl(&mut z, &zi, i + 1);
        }

        small::normalize(&mut z);

        z
    }

    /// MulAssign bigint to bigint.
    #[inline]
    pub fn imul(x: &mut Vec<Limb>, y: &[Limb]) {
        if y.len() == 1 {
            small::imul(x, y[0]);
        } else {
            *x = long_mul(x, y);
        }
    }
} // large

// TRAITS
// ------

/// Traits for shared operations for big integers.
///
/// None of these are implemented using normal traits, since these
/// are very expensive operations, and we want to deliberately
/// and explicitly use these functions.
pub(crate) trait Math: Clone + Sized + Default {
    // DATA

    /// Get access to the underlying data
    fn data(&self) -> &Vec<Limb>;

    /// Get access to the underlying data
    fn data_mut(&mut self) -> &mut Vec<Limb>;

    // RELATIVE OPERATIONS

    /// Compare the magnitude of self to y.
    #[inline]
    fn compare(&self, y: &Self) -> cmp::Ordering {
        large::compare(self.data(), y.data())
    }

    // PROPERTIES

    /// Check if the value is zero. Normalized storage holds zero as an
    /// empty buffer.
    #[inline]
    fn is_zero(&self) -> bool {
        self.data().is_empty()
    }

    /// Get the high 64-bits from the bigint and if there are remaining bits.
    #[inline]
    fn hi64(&self) -> (u64, bool) {
        hi64(self.data())
    }

    /// Calculate the bit-length of the big-integer.
    #[inline]
    fn bit_length(&self) -> usize {
        small::bit_length(self.data())
    }

    // INTEGER CONVERSIONS

    /// Create new big integer from u32.
    #[inline]
    fn from_u32(x: u32) -> Self {
        let mut v = Self::default();
        if x != 0 {
            v.data_mut().push(x);
        }
        v
    }

    /// Create new big integer from u64.
    #[inline]
    fn from_u64(x: u64) -> Self {
        let mut v = Self::default();
        v.data_mut().push(x as Limb);
        v.data_mut().push((x >> 32) as Limb);
        v.normalize();
        v
    }

    // NORMALIZE

    /// Normalize the integer, so any leading zero values are removed.
    #[inline]
    fn normalize(&mut self) {
        small::normalize(self.data_mut());
    }

    // ADDITION

    /// AddAssign small integer.
    #[inline]
    fn iadd_small(&mut self, y: Limb) {
        small::iadd(self.data_mut(), y);
    }

    // MULTIPLICATION

    /// MulAssign small integer.
    #[inline]
    fn imul_small(&mut self, y: Limb) {
        small::imul(self.data_mut(), y);
    }

    /// MulAssign by a power of 5.
    #[inline]
    fn imul_pow5(&mut self, n: u32) {
        small::imul_pow5(self.data_mut(), n);
    }

    /// MulAssign bigint.
    #[inline]
    fn imul_big(&mut self, y: &Self) {
        large::imul(self.data_mut(), y.data());
    }

    // SHIFTS

    /// Shift-left the entire buffer n bits.
    #[inline]
    fn ishl(&mut self, n: usize) {
        small::ishl(self.data_mut(), n);
    }

    // DIFFERENCE

    /// Absolute difference of self and y, along with the ordering of self
    /// relative to y. Equal magnitudes produce a zero result.
    fn difference(&self, y: &Self) -> (Self, cmp::Ordering) {
        match self.compare(y) {
            cmp::Ordering::Greater => {
                let mut diff = self.clone();
                large::isub(diff.data_mut(), y.data());
                (diff, cmp::Ordering::Greater)
            }
            cmp::Ordering::Less => {
                let mut diff = y.clone();
                large::isub(diff.data_mut(), self.data());
                (diff, cmp::Ordering::Less)
            }
            cmp::Ordering::Equal => (Self::default(), cmp::Ordering::Equal),
        }
    }

    // RATIO

    /// Approximate self/y as a double.
    ///
    /// Only accurate enough to estimate an adjustment step measured in
    /// ULPs, never used for final results. y must be non-zero.
    fn ratio(&self, y: &Self) -> f64 {
        let (num, _) = self.hi64();
        let (den, _) = y.hi64();
        let shift = self.bit_length() as i32 - y.bit_length() as i32;
        num as f64 / den as f64 * 2f64.powi(shift)
    }
}

// TESTS
// -----

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Bigint {
        data: Vec<Limb>,
    }

    impl Math for Bigint {
        #[inline]
        fn data(&self) -> &Vec<Limb> {
            &self.data
        }

        #[inline]
        fn data_mut(&mut self) -> &mut Vec<Limb> {
            &mut self.data
        }
    }

    #[test]
    fn compare_test() {
        // Simple
        let x = Bigint { data: vec![1] };
        let y = Bigint { data: vec![2] };
        assert_eq!(x.compare(&y), cmp::Ordering::Less);
        assert_eq!(x.compare(&x), cmp::Ordering::Equal);
        assert_eq!(y.compare(&x), cmp::Ordering::Greater);

        // Check asymmetric
        let x = Bigint { data: vec![5, 1] };
        let y = Bigint { data: vec![2] };
        assert_eq!(x.compare(&y), cmp::Ordering::Greater);

        // Check when we use reverse ordering properly.
        let x = Bigint { data: vec![5, 1, 9] };
        let y = Bigint { data: vec![6, 2, 8] };
        assert_eq!(x.compare(&y), cmp::Ordering::Greater);

        // Complex scenario, check it properly uses reverse ordering.
        let x = Bigint { data: vec![0, 1, 9] };
        let y = Bigint { data: vec![4294967295, 0, 9] };
        assert_eq!(x.compare(&y), cmp::Ordering::Greater);
        assert_eq!(y.compare(&x), cmp::Ordering::Less);
    }

    #[test]
    fn hi64_test() {
        assert_eq!(Bigint::from_u64(0xA).hi64(), (0xA000000000000000, false));
        assert_eq!(Bigint::from_u64(0xAB).hi64(), (0xAB00000000000000, false));
        assert_eq!(
            Bigint::from_u64(0xAB00000000).hi64(),
            (0xAB00000000000000, false)
        );
        assert_eq!(
            Bigint::from_u64(0xA23456789A).hi64(),
            (0xA23456789A000000, false)
        );

        // Truncated bits are reported.
        let x = Bigint {
            data: vec![1, 0, 0, 1],
        };
        assert_eq!(x.hi64(), (0x8000000000000000, true));
    }

    #[test]
    fn bit_length_test() {
        let x = Bigint {
            data: vec![0, 0, 0, 1],
        };
        assert_eq!(x.bit_length(), 97);

        let x = Bigint {
            data: vec![0, 0, 0, 3],
        };
        assert_eq!(x.bit_length(), 98);

        let x = Bigint { data: vec![1 << 31] };
        assert_eq!(x.bit_length(), 32);
    }

    #[test]
    fn iadd_small_test() {
        // Overflow check (single)
        let mut x = Bigint {
            data: vec![4294967295],
        };
        x.iadd_small(5);
        assert_eq!(x.data, vec![4, 1]);

        // No overflow, single value
        let mut x = Bigint { data: vec![5] };
        x.iadd_small(7);
        assert_eq!(x.data, vec![12]);

        // Single carry, internal overflow
        let mut x = Bigint::from_u64(0x80000000FFFFFFFF);
        x.iadd_small(7);
        assert_eq!(x.data, vec![6, 0x80000001]);

        // Double carry, overflow
        let mut x = Bigint::from_u64(0xFFFFFFFFFFFFFFFF);
        x.iadd_small(7);
        assert_eq!(x.data, vec![6, 0, 1]);
    }

    #[test]
    fn imul_small_test() {
        // No overflow check, 1-int.
        let mut x = Bigint { data: vec![5] };
        x.imul_small(7);
        assert_eq!(x.data, vec![35]);

        // No overflow check, 2-ints.
        let mut x = Bigint::from_u64(0x4000000040000);
        x.imul_small(5);
        assert_eq!(x.data, vec![0x00140000, 0x140000]);

        // Overflow, 1 carry.
        let mut x = Bigint { data: vec![0x33333334] };
        x.imul_small(5);
        assert_eq!(x.data, vec![4, 1]);

        // Overflow, 1 carry, internal.
        let mut x = Bigint::from_u64(0x133333334);
        x.imul_small(5);
        assert_eq!(x.data, vec![4, 6]);

        // Overflow, 2 carries.
        let mut x = Bigint::from_u64(0x3333333333333334);
        x.imul_small(5);
        assert_eq!(x.data, vec![4, 0, 1]);
    }

    #[test]
    fn shl_test() {
        // Pattern generated via `''.join(["1" +"0"*i for i in range(20)])`
        let mut big = Bigint {
            data: vec![0xD2210408],
        };
        big.ishl(5);
        assert_eq!(big.data, vec![0x44208100, 0x1A]);
        big.ishl(32);
        assert_eq!(big.data, vec![0, 0x44208100, 0x1A]);
        big.ishl(27);
        assert_eq!(big.data, vec![0, 0, 0xD2210408]);

        // 96-bits of previous pattern
        let mut big = Bigint {
            data: vec![0x20020010, 0x8040100, 0xD2210408],
        };
        big.ishl(5);
        assert_eq!(big.data, vec![0x400200, 0x802004, 0x44208101, 0x1A]);
        big.ishl(32);
        assert_eq!(big.data, vec![0, 0x400200, 0x802004, 0x44208101, 0x1A]);
        big.ishl(27);
        assert_eq!(big.data, vec![0, 0, 0x20020010, 0x8040100, 0xD2210408]);
    }

    #[test]
    fn pow5_test() {
        let mut x = Bigint { data: vec![1] };
        x.imul_pow5(4);
        assert_eq!(x.data, vec![625]);

        // 5^14 = 6103515625, the first power past a single limb.
        let mut x = Bigint { data: vec![1] };
        x.imul_pow5(14);
        assert_eq!(x.data, vec![0x6BCC41E9, 0x1]);

        // 5^27 = 5^13 * 5^13 * 5.
        let mut x = Bigint { data: vec![1] };
        x.imul_pow5(27);
        let mut y = Bigint { data: vec![POW5_SMALL[13]] };
        y.imul_small(POW5_SMALL[13]);
        y.imul_small(5);
        assert_eq!(x.data, y.data);
    }

    #[test]
    fn imul_big_test() {
        // (2^64 - 1)^2 = 2^128 - 2^65 + 1
        let mut x = Bigint::from_u64(u64::MAX);
        let y = x.clone();
        x.imul_big(&y);
        assert_eq!(x.data, vec![1, 0, 0xFFFFFFFE, 0xFFFFFFFF]);
    }

    #[test]
    fn difference_test() {
        let x = Bigint::from_u64(0x100000000);
        let y = Bigint::from_u64(1);

        let (diff, ord) = x.difference(&y);
        assert_eq!(ord, cmp::Ordering::Greater);
        assert_eq!(diff.data, vec![0xFFFFFFFF]);

        let (diff, ord) = y.difference(&x);
        assert_eq!(ord, cmp::Ordering::Less);
        assert_eq!(diff.data, vec![0xFFFFFFFF]);

        let (diff, ord) = x.difference(&x);
        assert_eq!(ord, cmp::Ordering::Equal);
        assert!(diff.is_zero());
    }

    #[test]
    fn ratio_test() {
        let x = Bigint::from_u64(10);
        let y = Bigint::from_u64(5);
        assert_eq!(x.ratio(&y), 2.0);

        let x = Bigint::from_u64(1 << 40);
        let y = Bigint::from_u64(1);
        assert_eq!(x.ratio(&y), (1u64 << 40) as f64);

        let x = Bigint::from_u64(3);
        let y = Bigint::from_u64(2);
        assert_eq!(x.ratio(&y), 1.5);
    }
}
