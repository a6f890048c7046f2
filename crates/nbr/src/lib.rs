//! # numbridge
//!
//! Moves numeric values and array views across the boundary between
//! generated native code and a reference-counted managed runtime.
//!
//! ## Components
//!
//! | Module      | Purpose                                                  |
//! |-------------|----------------------------------------------------------|
//! | [`convert`] | Scalars between native numbers and managed handles       |
//! | [`ndarray`] | Stride descriptors and zero-copy wrapping of buffers     |
//! | [`math`]    | Exact modulo, sign, rounding and integer functions       |
//! | [`object`]  | Managed scalar, array and capsule handles                |
//! | [`types`]   | Element tags and C-compatible complex numbers            |
//!
//! The three components do not call one another; a generated caller picks
//! which one to use at each call site.
//!
//! ```rust,ignore
//! use nbr::prelude::*;
//!
//! let obj = native_to_scalar(3.5f64, Flavor::Builtin);
//! assert_eq!(scalar_to_native::<f64>(&obj), 3.5);
//! assert_eq!(integer_modulo(-7, 3), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use nbr_convert as convert;
pub use nbr_math as math;
pub use nbr_ndarray as ndarray;
pub use nbr_rts_object as object;
pub use nbr_types as types;

/// The items generated code uses most.
pub mod prelude {
    pub use nbr_convert::{
        classify, construct, extract, native_to_scalar, scalar_to_native, try_scalar_to_native,
        NativeScalar, ScalarClass,
    };
    pub use nbr_math::{
        bankers_round_f64, bankers_round_i64, csgn, csign, factorial, float_modulo, fsign, gcd,
        integer_modulo, isign, lcm,
    };
    pub use nbr_ndarray::{describe, describe_into, wrap, wrap_buffer, wrap_checked, NativeBuffer, Order};
    pub use nbr_rts_object::{Flavor, ManagedArray, ManagedScalar, ScalarValue};
    pub use nbr_types::{Complex128, Complex64, Dtype};
}
