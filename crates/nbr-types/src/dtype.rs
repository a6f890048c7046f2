//! Element type tags.
//!
//! `Dtype` is the closed set of numeric kinds that can cross the boundary.
//! The discriminants are the host runtime's type numbers, so a tag read out
//! of a managed object can be matched directly without a lookup table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DtypeError;

/// Numeric element kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i32)]
pub enum Dtype {
    /// Boolean, one byte.
    Bool = 0,
    /// Signed 8-bit integer.
    Int8 = 1,
    /// Signed 16-bit integer.
    Int16 = 3,
    /// Signed 32-bit integer.
    Int32 = 5,
    /// Signed 64-bit integer.
    Int64 = 7,
    /// IEEE 754 single precision.
    Float32 = 11,
    /// IEEE 754 double precision.
    Float64 = 12,
    /// Complex number made of two `f32`.
    Complex64 = 14,
    /// Complex number made of two `f64`.
    Complex128 = 15,
}

impl Dtype {
    /// Every supported kind, ordered by discriminant.
    pub const ALL: [Self; 9] = [
        Self::Bool,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Float32,
        Self::Float64,
        Self::Complex64,
        Self::Complex128,
    ];

    /// Tag the host gives its builtin integers.
    pub const DEFAULT_INT: Self = Self::Int64;

    /// Tag the host gives its builtin floats.
    pub const DEFAULT_FLOAT: Self = Self::Float64;

    /// Tag the host gives its builtin complex numbers.
    pub const DEFAULT_COMPLEX: Self = Self::Complex128;

    /// Host type number of this kind.
    #[inline]
    #[must_use]
    pub const fn typenum(self) -> i32 {
        self as i32
    }

    /// Look up a kind by host type number.
    ///
    /// # Errors
    ///
    /// Returns [`DtypeError::UnknownTypenum`] for numbers outside the nine
    /// supported kinds.
    pub const fn from_typenum(typenum: i32) -> Result<Self, DtypeError> {
        match typenum {
            0 => Ok(Self::Bool),
            1 => Ok(Self::Int8),
            3 => Ok(Self::Int16),
            5 => Ok(Self::Int32),
            7 => Ok(Self::Int64),
            11 => Ok(Self::Float32),
            12 => Ok(Self::Float64),
            14 => Ok(Self::Complex64),
            15 => Ok(Self::Complex128),
            other => Err(DtypeError::UnknownTypenum(other)),
        }
    }

    /// Size of one element in bytes.
    #[inline]
    #[must_use]
    pub const fn itemsize(self) -> usize {
        match self {
            Self::Bool | Self::Int8 => 1,
            Self::Int16 => 2,
            Self::Int32 | Self::Float32 => 4,
            Self::Int64 | Self::Float64 | Self::Complex64 => 8,
            Self::Complex128 => 16,
        }
    }

    /// Required alignment of one element in bytes.
    #[inline]
    #[must_use]
    pub const fn alignment(self) -> usize {
        match self {
            Self::Complex64 => 4,
            Self::Complex128 => 8,
            other => other.itemsize(),
        }
    }

    /// Whether this is one of the signed integer kinds.
    #[inline]
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Whether this is a real floating point kind.
    #[inline]
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Whether this is a complex kind.
    #[inline]
    #[must_use]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// The platform default-width tag in the same family.
    ///
    /// Used when a value is handed to the host as a builtin number rather
    /// than as a fixed-width scalar.
    #[must_use]
    pub const fn default_width(self) -> Self {
        match self {
            Self::Bool => Self::Bool,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 => Self::DEFAULT_INT,
            Self::Float32 | Self::Float64 => Self::DEFAULT_FLOAT,
            Self::Complex64 | Self::Complex128 => Self::DEFAULT_COMPLEX,
        }
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for Dtype {
    type Error = DtypeError;

    fn try_from(typenum: i32) -> Result<Self, Self::Error> {
        Self::from_typenum(typenum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typenum_lookup_is_inverse() {
        for dtype in Dtype::ALL {
            assert_eq!(Dtype::from_typenum(dtype.typenum()).unwrap(), dtype);
        }
    }

    #[test]
    fn test_unknown_typenum() {
        assert!(matches!(
            Dtype::from_typenum(2),
            Err(DtypeError::UnknownTypenum(2))
        ));
        assert!(Dtype::try_from(-1).is_err());
    }

    #[test]
    fn test_itemsize() {
        assert_eq!(Dtype::Bool.itemsize(), 1);
        assert_eq!(Dtype::Int16.itemsize(), 2);
        assert_eq!(Dtype::Float32.itemsize(), 4);
        assert_eq!(Dtype::Complex64.itemsize(), 8);
        assert_eq!(Dtype::Complex128.itemsize(), 16);
        assert_eq!(Dtype::Complex128.alignment(), 8);
    }

    #[test]
    fn test_default_width() {
        assert_eq!(Dtype::Int8.default_width(), Dtype::Int64);
        assert_eq!(Dtype::Float32.default_width(), Dtype::Float64);
        assert_eq!(Dtype::Complex64.default_width(), Dtype::Complex128);
        assert_eq!(Dtype::Bool.default_width(), Dtype::Bool);
    }

    #[test]
    fn test_serde_name() {
        let json = serde_json::to_string(&Dtype::Complex64).unwrap();
        assert_eq!(json, "\"Complex64\"");
        let back: Dtype = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Dtype::Complex64);
    }
}
