//! # numbridge managed object model
//!
//! The managed side of the boundary: reference-counted scalar handles,
//! array handles, and capsules that tie foreign memory to a handle's
//! lifetime. The conversion and array-bridging crates only ever use the
//! accessor surface exposed here, which is the same surface a host runtime
//! offers through its C API.
//!
//! ## Lifetimes
//!
//! ```text
//!   ManagedArray (view) ──base──> ManagedArray (owner, OWNDATA)
//!
//!   ManagedArray (wrapped) ──base──> Capsule ──release──> foreign block
//! ```
//!
//! Handles are `Arc`s; dropping the last one runs the object's destructor,
//! which is where owned data and capsule release functions are reclaimed.
//! Nothing here synchronizes access to the data itself.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

pub mod alloc;
pub mod array;
pub mod capsule;
pub mod flags;
pub mod scalar;

pub use alloc::{alloc_buffer, alloc_stats, free_buffer, AllocError, AllocResult, AllocStats, ALLOC_ALIGN};
pub use array::{Base, ManagedArray};
pub use capsule::{Capsule, ReleaseFn};
pub use flags::ArrayFlags;
pub use scalar::{Flavor, ManagedScalar, ScalarValue};

pub use nbr_types::{Complex128, Complex64, Dtype};
