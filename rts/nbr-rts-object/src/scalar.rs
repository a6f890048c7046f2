//! Managed scalar handles.
//!
//! A [`ManagedScalar`] is a reference-counted, immutable boxed number. The
//! host distinguishes two flavours:
//!
//! - **Builtin** numbers (`bool`, `int`, `float`, `complex`). Their tag is the
//!   platform default width.
//! - **Typed** zero-dimensional scalars with an exact fixed-width tag.
//!
//! Both keep their value in a 16-byte backing block laid out as the native
//! type, which is what lets a conversion reinterpret the memory directly.

use std::fmt;
use std::sync::{Arc, OnceLock};

use bytemuck::{AnyBitPattern, NoUninit};
use nbr_types::{Complex128, Complex64, Dtype, FfiSafe};
use serde::{Deserialize, Serialize};

/// Size of the backing block, large enough for `Complex128`.
const BLOCK_SIZE: usize = 16;

/// A native value tagged with its kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarValue {
    /// Boolean.
    Bool(bool),
    /// 8-bit integer.
    Int8(i8),
    /// 16-bit integer.
    Int16(i16),
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    Int64(i64),
    /// Single precision float.
    Float32(f32),
    /// Double precision float.
    Float64(f64),
    /// Single precision complex.
    Complex64(Complex64),
    /// Double precision complex.
    Complex128(Complex128),
}

impl ScalarValue {
    /// Kind of the carried value.
    #[must_use]
    pub const fn dtype(&self) -> Dtype {
        match self {
            Self::Bool(_) => Dtype::Bool,
            Self::Int8(_) => Dtype::Int8,
            Self::Int16(_) => Dtype::Int16,
            Self::Int32(_) => Dtype::Int32,
            Self::Int64(_) => Dtype::Int64,
            Self::Float32(_) => Dtype::Float32,
            Self::Float64(_) => Dtype::Float64,
            Self::Complex64(_) => Dtype::Complex64,
            Self::Complex128(_) => Dtype::Complex128,
        }
    }

    fn write_block(self, block: &mut [u8; BLOCK_SIZE]) {
        fn put<T: NoUninit>(block: &mut [u8; BLOCK_SIZE], v: &T) {
            let bytes = bytemuck::bytes_of(v);
            block[..bytes.len()].copy_from_slice(bytes);
        }
        match self {
            Self::Bool(v) => put(block, &v),
            Self::Int8(v) => put(block, &v),
            Self::Int16(v) => put(block, &v),
            Self::Int32(v) => put(block, &v),
            Self::Int64(v) => put(block, &v),
            Self::Float32(v) => put(block, &v),
            Self::Float64(v) => put(block, &v),
            Self::Complex64(v) => put(block, &v),
            Self::Complex128(v) => put(block, &v),
        }
    }

    fn read_block(dtype: Dtype, block: &[u8; BLOCK_SIZE]) -> Self {
        fn get<T: AnyBitPattern>(block: &[u8; BLOCK_SIZE]) -> T {
            bytemuck::pod_read_unaligned(&block[..std::mem::size_of::<T>()])
        }
        match dtype {
            Dtype::Bool => Self::Bool(block[0] != 0),
            Dtype::Int8 => Self::Int8(get(block)),
            Dtype::Int16 => Self::Int16(get(block)),
            Dtype::Int32 => Self::Int32(get(block)),
            Dtype::Int64 => Self::Int64(get(block)),
            Dtype::Float32 => Self::Float32(get(block)),
            Dtype::Float64 => Self::Float64(get(block)),
            Dtype::Complex64 => Self::Complex64(get(block)),
            Dtype::Complex128 => Self::Complex128(get(block)),
        }
    }
}

/// How the host sees a scalar object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flavor {
    /// The host's own builtin number; tag is the default width.
    Builtin,
    /// A zero-dimensional fixed-width scalar; tag is exact.
    Typed,
}

#[derive(Debug)]
struct ScalarObject {
    dtype: Dtype,
    flavor: Flavor,
    block: [u8; BLOCK_SIZE],
}

/// Reference-counted handle to an immutable scalar object.
#[derive(Clone)]
pub struct ManagedScalar(Arc<ScalarObject>);

static TRUE: OnceLock<ManagedScalar> = OnceLock::new();
static FALSE: OnceLock<ManagedScalar> = OnceLock::new();

impl ManagedScalar {
    fn from_parts(dtype: Dtype, flavor: Flavor, value: ScalarValue) -> Self {
        let mut block = [0u8; BLOCK_SIZE];
        value.write_block(&mut block);
        Self(Arc::new(ScalarObject {
            dtype,
            flavor,
            block,
        }))
    }

    /// One of the two process-wide boolean singletons.
    ///
    /// Only the reference count changes; nothing is allocated after the
    /// first call for each value.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        let cell = if value { &TRUE } else { &FALSE };
        cell.get_or_init(|| Self::from_parts(Dtype::Bool, Flavor::Builtin, ScalarValue::Bool(value)))
            .clone()
    }

    /// A builtin integer.
    #[must_use]
    pub fn builtin_int(value: i64) -> Self {
        Self::from_parts(Dtype::DEFAULT_INT, Flavor::Builtin, ScalarValue::Int64(value))
    }

    /// A builtin float.
    #[must_use]
    pub fn builtin_float(value: f64) -> Self {
        Self::from_parts(Dtype::DEFAULT_FLOAT, Flavor::Builtin, ScalarValue::Float64(value))
    }

    /// A builtin complex number.
    #[must_use]
    pub fn builtin_complex(value: Complex128) -> Self {
        Self::from_parts(
            Dtype::DEFAULT_COMPLEX,
            Flavor::Builtin,
            ScalarValue::Complex128(value),
        )
    }

    /// A typed scalar tagged with the exact kind of `value`.
    #[must_use]
    pub fn typed(value: ScalarValue) -> Self {
        Self::from_parts(value.dtype(), Flavor::Typed, value)
    }

    /// A typed scalar built directly from a native value.
    #[must_use]
    pub fn typed_from<T: FfiSafe + NoUninit>(value: T) -> Self {
        let mut block = [0u8; BLOCK_SIZE];
        let bytes = bytemuck::bytes_of(&value);
        block[..bytes.len()].copy_from_slice(bytes);
        Self(Arc::new(ScalarObject {
            dtype: T::DTYPE,
            flavor: Flavor::Typed,
            block,
        }))
    }

    /// Type tag.
    #[inline]
    #[must_use]
    pub fn dtype(&self) -> Dtype {
        self.0.dtype
    }

    /// Builtin or typed.
    #[inline]
    #[must_use]
    pub fn flavor(&self) -> Flavor {
        self.0.flavor
    }

    /// Decoded value.
    #[must_use]
    pub fn value(&self) -> ScalarValue {
        ScalarValue::read_block(self.0.dtype, &self.0.block)
    }

    /// Truth value: zero, `false` and `0+0j` are false, everything else true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self.value() {
            ScalarValue::Bool(v) => v,
            ScalarValue::Int8(v) => v != 0,
            ScalarValue::Int16(v) => v != 0,
            ScalarValue::Int32(v) => v != 0,
            ScalarValue::Int64(v) => v != 0,
            ScalarValue::Float32(v) => v != 0.0,
            ScalarValue::Float64(v) => v != 0.0,
            ScalarValue::Complex64(v) => !v.is_zero(),
            ScalarValue::Complex128(v) => !v.is_zero(),
        }
    }

    /// Integer value as 64 bits.
    ///
    /// Meaningful for bool and integer kinds; floats truncate toward zero
    /// and complex values use their real part.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i64(&self) -> i64 {
        match self.value() {
            ScalarValue::Bool(v) => i64::from(v),
            ScalarValue::Int8(v) => i64::from(v),
            ScalarValue::Int16(v) => i64::from(v),
            ScalarValue::Int32(v) => i64::from(v),
            ScalarValue::Int64(v) => v,
            ScalarValue::Float32(v) => v as i64,
            ScalarValue::Float64(v) => v as i64,
            ScalarValue::Complex64(v) => v.re as i64,
            ScalarValue::Complex128(v) => v.re as i64,
        }
    }

    /// Real value as a double.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        self.real_as_f64()
    }

    /// Real component as a double; the value itself for real kinds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn real_as_f64(&self) -> f64 {
        match self.value() {
            ScalarValue::Bool(v) => f64::from(u8::from(v)),
            ScalarValue::Int8(v) => f64::from(v),
            ScalarValue::Int16(v) => f64::from(v),
            ScalarValue::Int32(v) => f64::from(v),
            ScalarValue::Int64(v) => v as f64,
            ScalarValue::Float32(v) => f64::from(v),
            ScalarValue::Float64(v) => v,
            ScalarValue::Complex64(v) => f64::from(v.re),
            ScalarValue::Complex128(v) => v.re,
        }
    }

    /// Imaginary component as a double; zero for real kinds.
    #[must_use]
    pub fn imag_as_f64(&self) -> f64 {
        match self.value() {
            ScalarValue::Complex64(v) => f64::from(v.im),
            ScalarValue::Complex128(v) => v.im,
            _ => 0.0,
        }
    }

    /// Backing bytes of the value, `itemsize` long.
    #[must_use]
    pub fn backing_bytes(&self) -> &[u8] {
        &self.0.block[..self.0.dtype.itemsize()]
    }

    /// Reinterpret the backing block as `T` without looking at the tag.
    ///
    /// The caller is expected to have checked that the tag matches `T`;
    /// otherwise the result is whatever those bytes mean as `T`.
    #[must_use]
    pub fn as_ctype<T: FfiSafe + AnyBitPattern>(&self) -> T {
        bytemuck::pod_read_unaligned(&self.0.block[..std::mem::size_of::<T>()])
    }

    /// Whether two handles refer to the same object.
    #[inline]
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Number of live references to this object.
    #[inline]
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl fmt::Debug for ManagedScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedScalar")
            .field("dtype", &self.0.dtype)
            .field("flavor", &self.0.flavor)
            .field("value", &self.value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_singletons() {
        let a = ManagedScalar::boolean(true);
        let b = ManagedScalar::boolean(true);
        let c = ManagedScalar::boolean(false);
        assert!(ManagedScalar::ptr_eq(&a, &b));
        assert!(!ManagedScalar::ptr_eq(&a, &c));
        assert!(a.is_truthy());
        assert!(!c.is_truthy());
        assert_eq!(a.dtype(), Dtype::Bool);
    }

    #[test]
    fn test_builtin_tags_are_default_width() {
        assert_eq!(ManagedScalar::builtin_int(3).dtype(), Dtype::Int64);
        assert_eq!(ManagedScalar::builtin_float(3.0).dtype(), Dtype::Float64);
        assert_eq!(
            ManagedScalar::builtin_complex(Complex128::new(1.0, 2.0)).dtype(),
            Dtype::Complex128
        );
        assert_eq!(ManagedScalar::builtin_int(3).flavor(), Flavor::Builtin);
    }

    #[test]
    fn test_typed_value_roundtrip() {
        let s = ManagedScalar::typed(ScalarValue::Int16(-1234));
        assert_eq!(s.dtype(), Dtype::Int16);
        assert_eq!(s.flavor(), Flavor::Typed);
        assert_eq!(s.value(), ScalarValue::Int16(-1234));
        assert_eq!(s.as_i64(), -1234);
        assert_eq!(s.backing_bytes(), &(-1234i16).to_ne_bytes());
    }

    #[test]
    fn test_typed_complex_reinterpret() {
        let z = Complex64::new(1.25, -0.5);
        let s = ManagedScalar::typed_from(z);
        assert_eq!(s.dtype(), Dtype::Complex64);
        assert_eq!(s.as_ctype::<Complex64>(), z);
        assert_eq!(s.real_as_f64(), 1.25);
        assert_eq!(s.imag_as_f64(), -0.5);
    }

    #[test]
    fn test_real_accessors_on_real_kinds() {
        let s = ManagedScalar::builtin_float(2.5);
        assert_eq!(s.real_as_f64(), 2.5);
        assert_eq!(s.imag_as_f64(), 0.0);
        assert_eq!(s.as_i64(), 2);
        assert_eq!(ManagedScalar::boolean(true).as_f64(), 1.0);
    }

    #[test]
    fn test_truthiness() {
        assert!(!ManagedScalar::builtin_int(0).is_truthy());
        assert!(ManagedScalar::builtin_int(-7).is_truthy());
        assert!(!ManagedScalar::builtin_float(0.0).is_truthy());
        assert!(ManagedScalar::builtin_float(f64::NAN).is_truthy());
        assert!(ManagedScalar::builtin_complex(Complex128::new(0.0, 1.0)).is_truthy());
    }

    #[test]
    fn test_ref_count() {
        let s = ManagedScalar::builtin_int(1);
        assert_eq!(s.ref_count(), 1);
        let t = s.clone();
        assert_eq!(s.ref_count(), 2);
        drop(t);
        assert_eq!(s.ref_count(), 1);
    }
}
