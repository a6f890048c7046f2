//! Integer number theory: factorial, gcd and lcm.

/// `n!` in 64 bits.
///
/// Overflow wraps; callers keep `n <= 20`. Negative `n` gives 1.
#[must_use]
pub fn factorial(n: i64) -> i64 {
    (2..=n).fold(1i64, i64::wrapping_mul)
}

/// Greatest common divisor by Euclid's algorithm.
///
/// Always non-negative, and `gcd(0, 0) == 0`. `gcd(i64::MIN, 0)` does not fit
/// and wraps to `i64::MIN`.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn gcd(a: i64, b: i64) -> i64 {
    let mut x = a.unsigned_abs();
    let mut y = b.unsigned_abs();
    while y != 0 {
        let t = y;
        y = x % y;
        x = t;
    }
    x as i64
}

/// Least common multiple, 0 if either argument is 0.
#[must_use]
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        0
    } else {
        (a / gcd(a, b)).wrapping_mul(b).wrapping_abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(5), 120);
        assert_eq!(factorial(20), 2_432_902_008_176_640_000);
        assert_eq!(factorial(-3), 1);
    }

    #[test]
    fn test_factorial_wraps() {
        assert_eq!(factorial(21), 2_432_902_008_176_640_000i64.wrapping_mul(21));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(12, -18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, -7), 7);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(i64::MIN, 6), 2);
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(-4, 6), 12);
        assert_eq!(lcm(4, -6), 12);
        assert_eq!(lcm(0, 6), 0);
        assert_eq!(lcm(6, 0), 0);
        assert_eq!(lcm(21, 6), 42);
    }
}
