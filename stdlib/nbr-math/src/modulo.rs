//! Floored modulo.
//!
//! The result takes the sign of the divisor, unlike the truncating `%`
//! operator whose result takes the sign of the dividend.

/// Integer modulo with the sign of `b`.
///
/// `integer_modulo(-7, 3) == 2`, `integer_modulo(7, -3) == -2`.
///
/// # Panics
///
/// Panics if `b == 0`. Callers guard against a zero divisor.
#[inline]
#[must_use]
pub fn integer_modulo(a: i64, b: i64) -> i64 {
    // wrapping_rem: i64::MIN % -1 is 0, not an overflow
    let r = a.wrapping_rem(b);
    if r != 0 && ((a < 0) != (b < 0)) {
        r + b
    } else {
        r
    }
}

/// Floating point modulo with the sign of `b`.
///
/// A zero divisor gives NaN.
#[inline]
#[must_use]
pub fn float_modulo(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && ((a < 0.0) != (b < 0.0)) {
        r + b
    } else {
        r
    }
}
