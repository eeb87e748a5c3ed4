//! Power-of-ten tables for staged exponent scaling.

/// Precalculated values of 10^i for i in range [0, 22].
/// Each value can be **exactly** represented as a double.
pub(crate) const TENS: [f64; 23] = [
    1.0,
    10.0,
    100.0,
    1000.0,
    10000.0,
    100000.0,
    1000000.0,
    10000000.0,
    100000000.0,
    1000000000.0,
    10000000000.0,
    100000000000.0,
    1000000000000.0,
    10000000000000.0,
    100000000000000.0,
    1000000000000000.0,
    10000000000000000.0,
    100000000000000000.0,
    1000000000000000000.0,
    10000000000000000000.0,
    100000000000000000000.0,
    1000000000000000000000.0,
    10000000000000000000000.0,
];

/// 10^(2^(4+i)), for climbing large positive exponents in binary jumps.
pub(crate) const BIGTENS: [f64; 5] = [1e16, 1e32, 1e64, 1e128, 1e256];

/// Negative counterparts of [`BIGTENS`]. The last entry carries an extra
/// 2^106 factor so intermediates scaled by it stay normalized near the
/// denormal range; the scale is removed after refinement.
pub(crate) const TINYTENS: [f64; 5] = [
    1e-16,
    1e-32,
    1e-64,
    1e-128,
    9007199254740992.0 * 9007199254740992e-256,
];
