//! # numbridge shared types
//!
//! Vocabulary shared by every numbridge crate: the closed set of element
//! kinds ([`Dtype`]), the C-compatible complex types, and the [`FfiSafe`]
//! marker for values that cross between generated native code and the
//! managed runtime.
//!
//! ## Element kinds
//!
//! | Dtype        | Rust type    | C type            |
//! |--------------|--------------|-------------------|
//! | `Bool`       | `bool`       | `bool`            |
//! | `Int8`       | `i8`         | `int8_t`          |
//! | `Int16`      | `i16`        | `int16_t`         |
//! | `Int32`      | `i32`        | `int32_t`         |
//! | `Int64`      | `i64`        | `int64_t`         |
//! | `Float32`    | `f32`        | `float`           |
//! | `Float64`    | `f64`        | `double`          |
//! | `Complex64`  | `Complex64`  | `float complex`   |
//! | `Complex128` | `Complex128` | `double complex`  |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod complex;
pub mod dtype;

pub use complex::{Complex, Complex128, Complex64};
pub use dtype::Dtype;

use thiserror::Error;

/// Errors from decoding element kinds.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DtypeError {
    /// The host type number does not name one of the supported kinds.
    #[error("unsupported element type number: {0}")]
    UnknownTypenum(i32),
}

/// Marker trait for element types that can be safely passed across the
/// boundary by value or through a raw buffer.
///
/// # Safety
///
/// Implementors must:
/// - be `Copy` with no drop glue
/// - have the C ABI layout named by `C_TYPE_NAME`
/// - have `size_of::<Self>() == DTYPE.itemsize()`
pub unsafe trait FfiSafe: Copy + 'static {
    /// The C-equivalent type name (for documentation and diagnostics).
    const C_TYPE_NAME: &'static str;

    /// The element kind this type represents.
    const DTYPE: Dtype;
}

macro_rules! ffi_safe {
    ($($t:ty => $c:literal, $d:ident;)*) => {
        $(
            unsafe impl FfiSafe for $t {
                const C_TYPE_NAME: &'static str = $c;
                const DTYPE: Dtype = Dtype::$d;
            }
        )*
    };
}

ffi_safe! {
    bool => "bool", Bool;
    i8 => "int8_t", Int8;
    i16 => "int16_t", Int16;
    i32 => "int32_t", Int32;
    i64 => "int64_t", Int64;
    f32 => "float", Float32;
    f64 => "double", Float64;
    Complex64 => "float complex", Complex64;
    Complex128 => "double complex", Complex128;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_matches_itemsize<T: FfiSafe>() {
        assert_eq!(std::mem::size_of::<T>(), T::DTYPE.itemsize(), "{}", T::C_TYPE_NAME);
    }

    #[test]
    fn test_ffi_safe_sizes() {
        assert_matches_itemsize::<bool>();
        assert_matches_itemsize::<i8>();
        assert_matches_itemsize::<i16>();
        assert_matches_itemsize::<i32>();
        assert_matches_itemsize::<i64>();
        assert_matches_itemsize::<f32>();
        assert_matches_itemsize::<f64>();
        assert_matches_itemsize::<Complex64>();
        assert_matches_itemsize::<Complex128>();
    }

    #[test]
    fn test_ffi_safe_type_names() {
        assert_eq!(f32::C_TYPE_NAME, "float");
        assert_eq!(f64::C_TYPE_NAME, "double");
        assert_eq!(i32::C_TYPE_NAME, "int32_t");
        assert_eq!(Complex128::C_TYPE_NAME, "double complex");
    }
}
