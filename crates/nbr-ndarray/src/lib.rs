//! # numbridge array views
//!
//! Bridges native numeric buffers and managed array handles.
//!
//! ## Overview
//!
//! - [`describe`] / [`describe_into`]: the shape and element strides a
//!   native kernel should use for an existing managed array.
//! - [`wrap`] / [`wrap_buffer`]: a managed array over a native buffer,
//!   without copying, optionally taking ownership of the block.
//! - [`NativeBuffer`]: a raw block together with its [`Ownership`] state.
//!
//! ## Ownership
//!
//! A buffer that is [`Ownership::Owned`] gets a capsule attached as the
//! array's base. The capsule runs the buffer's [`Destructor`] once, when
//! the last reference to the array (and to any view of it) is dropped. A
//! [`Ownership::Borrowed`] buffer is never freed by this crate.
//!
//! ```rust,ignore
//! use nbr_ndarray::{describe, NativeBuffer, Order, wrap_checked};
//! use nbr_types::Dtype;
//!
//! let buffer = NativeBuffer::allocate(Dtype::Float64, 12)?;
//! let array = wrap_checked(buffer, &[3, 4], Order::RowMajor)?;
//! assert_eq!(describe(&array).strides, vec![4, 1]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_wrap)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod buffer;
pub mod describe;
pub mod wrap;

pub use buffer::{Destructor, NativeBuffer, Ownership};
pub use describe::{describe, describe_into, Descriptor};
pub use wrap::{wrap, wrap_buffer, wrap_checked, Order};

use nbr_rts_object::AllocError;
use thiserror::Error;

/// Errors from the checked array-view paths.
#[derive(Debug, Error)]
pub enum NdError {
    /// The buffer does not hold exactly the number of elements the shape needs.
    #[error("shape needs {expected} elements, buffer holds {actual}")]
    SizeMismatch {
        /// Product of the shape.
        expected: usize,
        /// Element count of the buffer.
        actual: usize,
    },

    /// A null buffer pointer was supplied.
    #[error("null buffer pointer")]
    NullPointer,

    /// The bridge allocator failed.
    #[error("allocation failed: {0}")]
    Alloc(#[from] AllocError),
}

/// Result type for array-view operations.
pub type NdResult<T> = Result<T, NdError>;
