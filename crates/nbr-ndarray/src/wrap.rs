//! Zero-copy managed arrays over native buffers.

use std::ptr::NonNull;

use nbr_rts_object::{ArrayFlags, Base, Capsule, ManagedArray};
use nbr_types::Dtype;
use serde::{Deserialize, Serialize};

use crate::buffer::{Destructor, NativeBuffer, Ownership};
use crate::{NdError, NdResult};

/// Diagnostic name of capsules holding transferred buffers.
const CAPSULE_NAME: &str = "nbr.native_buffer";

/// Memory layout of a buffer being wrapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    /// Last index varies fastest.
    #[default]
    RowMajor,
    /// First index varies fastest.
    ColumnMajor,
}

impl Order {
    fn flags(self, ndim: usize) -> ArrayFlags {
        let contiguity = match (ndim, self) {
            (1, _) => ArrayFlags::C_CONTIGUOUS | ArrayFlags::F_CONTIGUOUS,
            (_, Self::RowMajor) => ArrayFlags::C_CONTIGUOUS,
            (_, Self::ColumnMajor) => ArrayFlags::F_CONTIGUOUS,
        };
        contiguity | ArrayFlags::WRITEABLE
    }
}

/// Wrap `ptr` as a writable `shape` array of `dtype` without copying.
///
/// With `transfer_ownership` the block is handed to a capsule that frees it
/// through the bridge allocator when the last reference to the array, or to
/// any view of it, is dropped.
///
/// # Safety
///
/// `ptr` must be valid for reads and writes of `product(shape)` elements of
/// `dtype`. Without ownership transfer it must stay valid while the array is
/// alive. With it, the block must come from
/// [`alloc_buffer(dtype, product(shape))`](nbr_rts_object::alloc_buffer) and
/// nothing else may free it.
#[must_use]
pub unsafe fn wrap(
    ptr: NonNull<u8>,
    dtype: Dtype,
    shape: &[usize],
    order: Order,
    transfer_ownership: bool,
) -> ManagedArray {
    let count = shape.iter().product();
    let ownership = if transfer_ownership {
        // Safety: the block came from alloc_buffer(dtype, count) per the contract
        Ownership::Owned(unsafe { Destructor::dealloc(dtype, count) })
    } else {
        Ownership::Borrowed
    };
    let buffer = NativeBuffer::from_parts(ptr, dtype, count, ownership);
    // Safety: forwarded from the caller
    unsafe { wrap_buffer(buffer, shape, order) }
}

/// Wrap `buffer` as a writable `shape` array without copying.
///
/// An owned buffer's destructor moves into a capsule attached as the
/// array's base. A borrowed buffer gets no base.
///
/// # Safety
///
/// `shape` must address no more than `buffer.len()` elements. Use
/// [`wrap_checked`] to have that verified.
#[must_use]
pub unsafe fn wrap_buffer(buffer: NativeBuffer, shape: &[usize], order: Order) -> ManagedArray {
    let dtype = buffer.dtype();
    let flags = order.flags(shape.len());
    let (ptr, ownership) = buffer.into_raw();

    tracing::debug!(
        ?shape,
        %dtype,
        ?order,
        owned = ownership.is_owned(),
        "wrapping native buffer"
    );

    let base = match ownership {
        Ownership::Owned(destructor) => Some(Base::Capsule(Capsule::named(
            ptr,
            CAPSULE_NAME,
            destructor.into_release(),
        ))),
        Ownership::Borrowed => None,
    };

    // Safety: the buffer covers `shape` per the caller; the capsule, if any,
    // keeps it alive for as long as the array
    unsafe { ManagedArray::from_raw_parts(dtype, ptr, shape, None, flags, base) }
}

/// [`wrap_buffer`] after checking that `shape` needs exactly `buffer.len()`
/// elements.
///
/// # Errors
///
/// Returns [`NdError::SizeMismatch`] if it does not. The buffer is dropped,
/// which runs its destructor if it is owned.
pub fn wrap_checked(buffer: NativeBuffer, shape: &[usize], order: Order) -> NdResult<ManagedArray> {
    let expected: usize = shape.iter().product();
    if expected != buffer.len() {
        return Err(NdError::SizeMismatch {
            expected,
            actual: buffer.len(),
        });
    }
    // Safety: sizes checked above
    Ok(unsafe { wrap_buffer(buffer, shape, order) })
}
