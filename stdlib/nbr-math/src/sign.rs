//! Sign functions for integers, floats and complex numbers.

use nbr_types::Complex128;

/// -1, 0 or 1.
#[inline]
#[must_use]
pub fn isign(x: i64) -> i64 {
    x.signum()
}

/// -1.0, 0.0 or 1.0.
///
/// Anything that is neither zero nor negative maps to 1.0, NaN included.
#[inline]
#[must_use]
pub fn fsign(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Sign of a complex number as a real-valued complex.
///
/// Follows the real part when it is nonzero, otherwise the imaginary part.
#[inline]
#[must_use]
pub fn csgn(x: Complex128) -> Complex128 {
    let s = if x.re == 0.0 { fsign(x.im) } else { fsign(x.re) };
    Complex128::new(s, 0.0)
}

/// Unit complex number in the direction of `x`, or exactly zero for zero.
#[inline]
#[must_use]
pub fn csign(x: Complex128) -> Complex128 {
    if x.is_zero() {
        Complex128::ZERO
    } else {
        x / x.norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isign() {
        assert_eq!(isign(-42), -1);
        assert_eq!(isign(0), 0);
        assert_eq!(isign(i64::MAX), 1);
        assert_eq!(isign(i64::MIN), -1);
    }

    #[test]
    fn test_fsign() {
        assert_eq!(fsign(-0.5), -1.0);
        assert_eq!(fsign(0.0), 0.0);
        assert_eq!(fsign(-0.0), 0.0);
        assert_eq!(fsign(3.0), 1.0);
        assert_eq!(fsign(f64::NEG_INFINITY), -1.0);
        assert_eq!(fsign(f64::NAN), 1.0);
    }

    #[test]
    fn test_csgn_tie_break() {
        assert_eq!(csgn(Complex128::new(-2.0, 5.0)), Complex128::new(-1.0, 0.0));
        assert_eq!(csgn(Complex128::new(0.0, -5.0)), Complex128::new(-1.0, 0.0));
        assert_eq!(csgn(Complex128::new(0.0, 5.0)), Complex128::new(1.0, 0.0));
        assert_eq!(csgn(Complex128::ZERO), Complex128::ZERO);
    }

    #[test]
    fn test_csign_zero() {
        let s = csign(Complex128::ZERO);
        assert_eq!(s, Complex128::ZERO);
        assert!(!s.re.is_nan() && !s.im.is_nan());
    }

    #[test]
    fn test_csign_unit() {
        let s = csign(Complex128::new(3.0, 4.0));
        assert!((s.norm() - 1.0).abs() < 1e-15);
        assert!((s.re - 0.6).abs() < 1e-15);
        assert!((s.im - 0.8).abs() < 1e-15);
    }
}
