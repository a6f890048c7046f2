//! Round half to even ("banker's rounding") at a decimal position.
//!
//! `ndigits` counts decimal places to keep; negative values round to tens,
//! hundreds and so on. Ties go to the even neighbour at that position,
//! independently of the floating point environment.

use std::cmp::Ordering;

/// Largest power of ten that is still finite as an `f64`.
const MAX_F64_EXP: u64 = 308;

/// 10^20 exceeds twice the magnitude of any `i64`, so every value rounds to
/// zero from there on.
const MAX_I64_EXP: u64 = 20;

/// Round `value` to `ndigits` decimal places, ties to even.
///
/// `bankers_round_f64(2.5, 0) == 2.0`, `bankers_round_f64(3.5, 0) == 4.0`.
/// NaN and infinities are returned unchanged, as are values that cannot be
/// scaled without overflowing.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn bankers_round_f64(value: f64, ndigits: i64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let exp = ndigits.unsigned_abs().min(MAX_F64_EXP) as i32;
    if ndigits >= 0 {
        let factor = 10f64.powi(exp);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        scaled.round_ties_even() / factor
    } else {
        // divide rather than multiply by 10^-n to keep the scale factor exact
        let factor = 10f64.powi(exp);
        (value / factor).round_ties_even() * factor
    }
}

/// Round `value` to a multiple of `10^-ndigits`, ties to even.
///
/// Non-negative `ndigits` leaves integers unchanged. A result outside the
/// `i64` range wraps.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bankers_round_i64(value: i64, ndigits: i64) -> i64 {
    if ndigits >= 0 {
        return value;
    }
    let m = 10i128.pow(ndigits.unsigned_abs().min(MAX_I64_EXP) as u32);
    let v = i128::from(value);
    let q = v.div_euclid(m);
    let r = v.rem_euclid(m);
    let q = match (2 * r).cmp(&m) {
        Ordering::Less => q,
        Ordering::Greater => q + 1,
        Ordering::Equal if q % 2 == 0 => q,
        Ordering::Equal => q + 1,
    };
    (q * m) as i64
}
