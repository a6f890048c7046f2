//! C-compatible complex numbers.
//!
//! Layout matches C99 `float complex` / `double complex`: real part first,
//! imaginary part second, no padding. Both are plain-old-data so a typed
//! scalar's backing bytes can be reinterpreted as one directly.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A complex number with components of type `T`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Complex<T> {
    /// Real part.
    pub re: T,
    /// Imaginary part.
    pub im: T,
}

/// Two `f32` components, eight bytes.
pub type Complex64 = Complex<f32>;

/// Two `f64` components, sixteen bytes.
pub type Complex128 = Complex<f64>;

impl<T> Complex<T> {
    /// Build from real and imaginary parts.
    #[inline]
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

// Safety: repr(C) pair of the same float type, no padding, any bit pattern valid.
unsafe impl bytemuck::Zeroable for Complex64 {}
unsafe impl bytemuck::Pod for Complex64 {}
unsafe impl bytemuck::Zeroable for Complex128 {}
unsafe impl bytemuck::Pod for Complex128 {}

macro_rules! impl_complex_float {
    ($t:ty) => {
        impl Complex<$t> {
            /// The additive identity.
            pub const ZERO: Self = Self::new(0.0, 0.0);

            /// Magnitude `|z|`, computed without intermediate overflow.
            #[inline]
            #[must_use]
            pub fn norm(self) -> $t {
                self.re.hypot(self.im)
            }

            /// Whether both parts compare equal to zero.
            #[inline]
            #[must_use]
            pub fn is_zero(self) -> bool {
                self.re == 0.0 && self.im == 0.0
            }

            /// Complex conjugate.
            #[inline]
            #[must_use]
            pub fn conj(self) -> Self {
                Self::new(self.re, -self.im)
            }

            /// Divide both parts by a real scalar.
            #[inline]
            #[must_use]
            pub fn unscale(self, k: $t) -> Self {
                Self::new(self.re / k, self.im / k)
            }
        }

        impl Add for Complex<$t> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self::new(self.re + rhs.re, self.im + rhs.im)
            }
        }

        impl Sub for Complex<$t> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self::new(self.re - rhs.re, self.im - rhs.im)
            }
        }

        impl Mul for Complex<$t> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self::new(
                    self.re * rhs.re - self.im * rhs.im,
                    self.re * rhs.im + self.im * rhs.re,
                )
            }
        }

        impl Div<$t> for Complex<$t> {
            type Output = Self;

            #[inline]
            fn div(self, rhs: $t) -> Self {
                self.unscale(rhs)
            }
        }

        impl Neg for Complex<$t> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self::new(-self.re, -self.im)
            }
        }

        impl From<$t> for Complex<$t> {
            #[inline]
            fn from(re: $t) -> Self {
                Self::new(re, 0.0)
            }
        }
    };
}

impl_complex_float!(f32);
impl_complex_float!(f64);

impl From<Complex64> for Complex128 {
    #[inline]
    fn from(z: Complex64) -> Self {
        Self::new(f64::from(z.re), f64::from(z.im))
    }
}

impl<T: fmt::Display + PartialOrd + Default + Copy + Neg<Output = T>> fmt::Display for Complex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < T::default() {
            write!(f, "({}-{}j)", self.re, -self.im)
        } else {
            write!(f, "({}+{}j)", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<Complex64>(), 8);
        assert_eq!(std::mem::size_of::<Complex128>(), 16);
        assert_eq!(std::mem::align_of::<Complex128>(), 8);
    }

    #[test]
    fn test_pod_cast() {
        let z = Complex128::new(1.5, -2.0);
        let bytes = bytemuck::bytes_of(&z);
        assert_eq!(&bytes[..8], &1.5f64.to_ne_bytes());
        let back: Complex128 = bytemuck::pod_read_unaligned(bytes);
        assert_eq!(back, z);
    }

    #[test]
    fn test_arithmetic() {
        let a = Complex128::new(1.0, 2.0);
        let b = Complex128::new(3.0, -1.0);
        assert_eq!(a + b, Complex128::new(4.0, 1.0));
        assert_eq!(a - b, Complex128::new(-2.0, 3.0));
        assert_eq!(a * b, Complex128::new(5.0, 5.0));
        assert_eq!(Complex128::new(3.0, 4.0).norm(), 5.0);
        assert_eq!(Complex128::new(4.0, 2.0) / 2.0, Complex128::new(2.0, 1.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Complex128::new(1.0, -2.0).to_string(), "(1-2j)");
        assert_eq!(Complex64::new(0.5, 3.0).to_string(), "(0.5+3j)");
    }
}
