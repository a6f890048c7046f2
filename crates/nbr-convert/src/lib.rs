//! # numbridge scalar conversion
//!
//! Converts values between native fixed-width numbers and managed scalar
//! handles for the nine supported kinds.
//!
//! ## Overview
//!
//! - **Typed API**: [`scalar_to_native`] / [`native_to_scalar`] over the
//!   [`NativeScalar`] trait.
//! - **Tagged API**: [`extract`] / [`construct`] for callers that carry the
//!   kind as a run-time [`Dtype`](nbr_types::Dtype).
//! - **Classification**: [`classify`] and the `is_*` predicates.
//!
//! ## Contract
//!
//! Extraction does not validate. Calling `scalar_to_native::<T>` on a
//! scalar for which `T::matches` is false yields an unspecified value of
//! `T`. Generated callers check the predicate first; the `try_*` variants
//! do that check and report a [`ConvertError`].
//!
//! ```rust,ignore
//! use nbr_convert::{native_to_scalar, scalar_to_native, Flavor};
//!
//! let obj = native_to_scalar(42i32, Flavor::Typed);
//! assert_eq!(scalar_to_native::<i32>(&obj), 42);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classify;
pub mod native;
pub mod tagged;

pub use classify::{
    classify, is_bool, is_complex128, is_complex64, is_double, is_float, is_int16, is_int32,
    is_int64, is_int8, is_native_complex, is_native_float, is_native_int, matches_tag,
    ScalarClass,
};
pub use native::{native_to_scalar, scalar_to_native, try_scalar_to_native, NativeScalar};
pub use nbr_rts_object::{Flavor, ManagedScalar, ScalarValue};
pub use tagged::{construct, extract, try_extract};

use nbr_types::Dtype;
use thiserror::Error;

/// Errors from the checked conversion paths.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// The scalar is not of the requested kind.
    #[error("expected a {expected} scalar, found {flavor:?} {found}")]
    TagMismatch {
        /// Requested kind.
        expected: Dtype,
        /// Tag of the scalar.
        found: Dtype,
        /// Flavour of the scalar.
        flavor: Flavor,
    },
}

/// Result type for checked conversions.
pub type ConvertResult<T> = Result<T, ConvertError>;
