//! Typed conversion entry points.
//!
//! [`NativeScalar`] is implemented once per supported native type and
//! carries both directions of the conversion. Extraction never checks the
//! tag; callers validate with the matching predicate first, or use
//! [`try_scalar_to_native`].

use nbr_rts_object::{Flavor, ManagedScalar};
use nbr_types::{Complex128, Complex64, FfiSafe};

use crate::classify;
use crate::{ConvertError, ConvertResult};

/// A native value that can be read out of, and boxed into, a managed scalar.
pub trait NativeScalar: FfiSafe {
    /// Extract the native value.
    ///
    /// Undefined for scalars that fail [`NativeScalar::matches`]: the result
    /// is some value of `Self`, never a panic.
    fn from_managed(obj: &ManagedScalar) -> Self;

    /// Box the value. `Flavor::Builtin` produces a default-width builtin
    /// number, `Flavor::Typed` an exact-width typed scalar.
    fn to_managed(self, flavor: Flavor) -> ManagedScalar;

    /// Whether `obj` may be extracted as `Self`.
    fn matches(obj: &ManagedScalar) -> bool;
}

impl NativeScalar for bool {
    #[inline]
    fn from_managed(obj: &ManagedScalar) -> Self {
        obj.is_truthy()
    }

    /// Always one of the two boolean singletons, whatever the flavour.
    #[inline]
    fn to_managed(self, _flavor: Flavor) -> ManagedScalar {
        ManagedScalar::boolean(self)
    }

    fn matches(obj: &ManagedScalar) -> bool {
        classify::is_bool(obj)
    }
}

impl NativeScalar for i64 {
    #[inline]
    fn from_managed(obj: &ManagedScalar) -> Self {
        obj.as_i64()
    }

    #[inline]
    fn to_managed(self, flavor: Flavor) -> ManagedScalar {
        match flavor {
            Flavor::Builtin => ManagedScalar::builtin_int(self),
            Flavor::Typed => ManagedScalar::typed_from(self),
        }
    }

    fn matches(obj: &ManagedScalar) -> bool {
        classify::is_int64(obj)
    }
}

macro_rules! narrow_int {
    ($t:ty, $pred:path) => {
        impl NativeScalar for $t {
            /// Reads the integer as 64 bits and truncates to the target width.
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_managed(obj: &ManagedScalar) -> Self {
                obj.as_i64() as $t
            }

            #[inline]
            fn to_managed(self, flavor: Flavor) -> ManagedScalar {
                match flavor {
                    Flavor::Builtin => ManagedScalar::builtin_int(i64::from(self)),
                    Flavor::Typed => ManagedScalar::typed_from(self),
                }
            }

            fn matches(obj: &ManagedScalar) -> bool {
                $pred(obj)
            }
        }
    };
}

narrow_int!(i8, classify::is_int8);
narrow_int!(i16, classify::is_int16);
narrow_int!(i32, classify::is_int32);

impl NativeScalar for f64 {
    #[inline]
    fn from_managed(obj: &ManagedScalar) -> Self {
        obj.as_f64()
    }

    #[inline]
    fn to_managed(self, flavor: Flavor) -> ManagedScalar {
        match flavor {
            Flavor::Builtin => ManagedScalar::builtin_float(self),
            Flavor::Typed => ManagedScalar::typed_from(self),
        }
    }

    fn matches(obj: &ManagedScalar) -> bool {
        classify::is_double(obj)
    }
}

impl NativeScalar for f32 {
    /// Narrowing from double rounds to nearest.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn from_managed(obj: &ManagedScalar) -> Self {
        obj.as_f64() as f32
    }

    #[inline]
    fn to_managed(self, flavor: Flavor) -> ManagedScalar {
        match flavor {
            Flavor::Builtin => ManagedScalar::builtin_float(f64::from(self)),
            Flavor::Typed => ManagedScalar::typed_from(self),
        }
    }

    fn matches(obj: &ManagedScalar) -> bool {
        classify::is_float(obj)
    }
}

impl NativeScalar for Complex64 {
    /// A typed `complex64` is reinterpreted from its backing bytes; anything
    /// else is rebuilt from its real and imaginary accessors.
    #[allow(clippy::cast_possible_truncation)]
    fn from_managed(obj: &ManagedScalar) -> Self {
        if obj.flavor() == Flavor::Typed && obj.dtype() == Self::DTYPE {
            obj.as_ctype::<Self>()
        } else {
            Self::new(obj.real_as_f64() as f32, obj.imag_as_f64() as f32)
        }
    }

    fn to_managed(self, flavor: Flavor) -> ManagedScalar {
        match flavor {
            Flavor::Builtin => ManagedScalar::builtin_complex(Complex128::from(self)),
            Flavor::Typed => ManagedScalar::typed_from(self),
        }
    }

    fn matches(obj: &ManagedScalar) -> bool {
        classify::is_complex64(obj)
    }
}

impl NativeScalar for Complex128 {
    /// A typed `complex128` is reinterpreted from its backing bytes; anything
    /// else is rebuilt from its real and imaginary accessors.
    fn from_managed(obj: &ManagedScalar) -> Self {
        if obj.flavor() == Flavor::Typed && obj.dtype() == Self::DTYPE {
            obj.as_ctype::<Self>()
        } else {
            Self::new(obj.real_as_f64(), obj.imag_as_f64())
        }
    }

    fn to_managed(self, flavor: Flavor) -> ManagedScalar {
        match flavor {
            Flavor::Builtin => ManagedScalar::builtin_complex(self),
            Flavor::Typed => ManagedScalar::typed_from(self),
        }
    }

    fn matches(obj: &ManagedScalar) -> bool {
        classify::is_complex128(obj)
    }
}

/// Extract a native value from a managed scalar without checking its tag.
#[inline]
#[must_use]
pub fn scalar_to_native<T: NativeScalar>(obj: &ManagedScalar) -> T {
    T::from_managed(obj)
}

/// Box a native value as a new managed scalar.
#[inline]
#[must_use]
pub fn native_to_scalar<T: NativeScalar>(value: T, flavor: Flavor) -> ManagedScalar {
    value.to_managed(flavor)
}

/// Extract a native value after checking the matching predicate.
///
/// # Errors
///
/// Returns [`ConvertError::TagMismatch`] if `obj` is not a `T`.
pub fn try_scalar_to_native<T: NativeScalar>(obj: &ManagedScalar) -> ConvertResult<T> {
    if T::matches(obj) {
        Ok(T::from_managed(obj))
    } else {
        tracing::debug!(expected = %T::DTYPE, found = %obj.dtype(), "scalar tag mismatch");
        Err(ConvertError::TagMismatch {
            expected: T::DTYPE,
            found: obj.dtype(),
            flavor: obj.flavor(),
        })
    }
}
