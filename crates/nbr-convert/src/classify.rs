//! Scalar classification.
//!
//! Instead of probing a managed scalar with one predicate after another,
//! [`classify`] reads its tag and flavour once and returns a closed
//! [`ScalarClass`]. The `is_*` predicates are thin `match`es over that
//! value; none of them converts or allocates.

use nbr_rts_object::{Flavor, ManagedScalar};
use nbr_types::Dtype;

/// What a managed scalar is, as far as conversion is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScalarClass {
    /// Builtin or typed boolean.
    Bool = 0,
    /// Typed 8-bit integer.
    Int8 = 1,
    /// Typed 16-bit integer.
    Int16 = 2,
    /// Typed 32-bit integer.
    Int32 = 3,
    /// Typed 64-bit integer.
    Int64 = 4,
    /// Typed single precision float.
    Float32 = 5,
    /// Typed double precision float.
    Float64 = 6,
    /// Typed single precision complex.
    Complex64 = 7,
    /// Typed double precision complex.
    Complex128 = 8,
    /// Builtin integer.
    NativeInt = 9,
    /// Builtin float.
    NativeFloat = 10,
    /// Builtin complex.
    NativeComplex = 11,
}

impl ScalarClass {
    /// The element kind a value of this class converts to losslessly.
    ///
    /// Builtin classes map to the platform default width.
    #[must_use]
    pub const fn dtype(self) -> Dtype {
        match self {
            Self::Bool => Dtype::Bool,
            Self::Int8 => Dtype::Int8,
            Self::Int16 => Dtype::Int16,
            Self::Int32 => Dtype::Int32,
            Self::Int64 => Dtype::Int64,
            Self::Float32 => Dtype::Float32,
            Self::Float64 => Dtype::Float64,
            Self::Complex64 => Dtype::Complex64,
            Self::Complex128 => Dtype::Complex128,
            Self::NativeInt => Dtype::DEFAULT_INT,
            Self::NativeFloat => Dtype::DEFAULT_FLOAT,
            Self::NativeComplex => Dtype::DEFAULT_COMPLEX,
        }
    }

    /// Whether this is one of the builtin classes.
    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(self, Self::NativeInt | Self::NativeFloat | Self::NativeComplex)
    }
}

/// Classify a managed scalar by tag and flavour.
#[must_use]
pub fn classify(obj: &ManagedScalar) -> ScalarClass {
    match (obj.flavor(), obj.dtype()) {
        (_, Dtype::Bool) => ScalarClass::Bool,
        (Flavor::Builtin, Dtype::Int8 | Dtype::Int16 | Dtype::Int32 | Dtype::Int64) => {
            ScalarClass::NativeInt
        }
        (Flavor::Builtin, Dtype::Float32 | Dtype::Float64) => ScalarClass::NativeFloat,
        (Flavor::Builtin, Dtype::Complex64 | Dtype::Complex128) => ScalarClass::NativeComplex,
        (Flavor::Typed, Dtype::Int8) => ScalarClass::Int8,
        (Flavor::Typed, Dtype::Int16) => ScalarClass::Int16,
        (Flavor::Typed, Dtype::Int32) => ScalarClass::Int32,
        (Flavor::Typed, Dtype::Int64) => ScalarClass::Int64,
        (Flavor::Typed, Dtype::Float32) => ScalarClass::Float32,
        (Flavor::Typed, Dtype::Float64) => ScalarClass::Float64,
        (Flavor::Typed, Dtype::Complex64) => ScalarClass::Complex64,
        (Flavor::Typed, Dtype::Complex128) => ScalarClass::Complex128,
    }
}

/// Whether `obj` can be extracted as `tag`.
///
/// Dispatch table over the predicates below.
#[must_use]
pub fn matches_tag(tag: Dtype, obj: &ManagedScalar) -> bool {
    match tag {
        Dtype::Bool => is_bool(obj),
        Dtype::Int8 => is_int8(obj),
        Dtype::Int16 => is_int16(obj),
        Dtype::Int32 => is_int32(obj),
        Dtype::Int64 => is_int64(obj),
        Dtype::Float32 => is_float(obj),
        Dtype::Float64 => is_double(obj),
        Dtype::Complex64 => is_complex64(obj),
        Dtype::Complex128 => is_complex128(obj),
    }
}

/// Boolean.
#[must_use]
pub fn is_bool(obj: &ManagedScalar) -> bool {
    classify(obj) == ScalarClass::Bool
}

/// Typed 8-bit integer.
#[must_use]
pub fn is_int8(obj: &ManagedScalar) -> bool {
    classify(obj) == ScalarClass::Int8
}

/// Typed 16-bit integer.
#[must_use]
pub fn is_int16(obj: &ManagedScalar) -> bool {
    classify(obj) == ScalarClass::Int16
}

/// Typed 32-bit integer.
#[must_use]
pub fn is_int32(obj: &ManagedScalar) -> bool {
    classify(obj) == ScalarClass::Int32
}

/// Typed 64-bit integer, or a builtin integer (default width 64).
#[must_use]
pub fn is_int64(obj: &ManagedScalar) -> bool {
    let class = classify(obj);
    class != ScalarClass::Bool && class.dtype() == Dtype::Int64
}

/// Typed single precision float.
#[must_use]
pub fn is_float(obj: &ManagedScalar) -> bool {
    classify(obj) == ScalarClass::Float32
}

/// Typed double, or a builtin float.
#[must_use]
pub fn is_double(obj: &ManagedScalar) -> bool {
    classify(obj).dtype() == Dtype::Float64
}

/// Typed single precision complex.
#[must_use]
pub fn is_complex64(obj: &ManagedScalar) -> bool {
    classify(obj) == ScalarClass::Complex64
}

/// Typed double precision complex, or a builtin complex.
#[must_use]
pub fn is_complex128(obj: &ManagedScalar) -> bool {
    classify(obj).dtype() == Dtype::Complex128
}

/// Builtin integer (not a boolean).
#[must_use]
pub fn is_native_int(obj: &ManagedScalar) -> bool {
    classify(obj) == ScalarClass::NativeInt
}

/// Builtin float.
#[must_use]
pub fn is_native_float(obj: &ManagedScalar) -> bool {
    classify(obj) == ScalarClass::NativeFloat
}

/// Builtin complex.
#[must_use]
pub fn is_native_complex(obj: &ManagedScalar) -> bool {
    classify(obj) == ScalarClass::NativeComplex
}
