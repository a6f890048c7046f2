//! Native memory blocks and their ownership state.
//!
//! A [`NativeBuffer`] is a raw block of `len` elements of one [`Dtype`].
//! Whether this layer may free it is explicit in its [`Ownership`]:
//! borrowed blocks are never touched, owned blocks carry the
//! [`Destructor`] that releases them.

use std::fmt;
use std::ptr::NonNull;

use nbr_rts_object::{alloc_buffer, free_buffer, ReleaseFn};
use nbr_types::Dtype;

use crate::{NdError, NdResult};

/// Releases a native block. Runs at most once.
pub struct Destructor(ReleaseFn);

impl Destructor {
    /// Wrap an arbitrary release function.
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce(NonNull<u8>) + Send + 'static,
    {
        Self(Box::new(release))
    }

    /// Return a block of `count` elements of `dtype` to the bridge allocator.
    ///
    /// # Safety
    ///
    /// The destructor may only be run on a block obtained from
    /// [`alloc_buffer`](nbr_rts_object::alloc_buffer) with the same `dtype`
    /// and `count`.
    #[must_use]
    pub unsafe fn dealloc(dtype: Dtype, count: usize) -> Self {
        // Safety: guaranteed by the caller of `dealloc`
        Self::new(move |ptr| unsafe { free_buffer(ptr, dtype, count) })
    }

    /// Release `ptr` now.
    pub fn run(self, ptr: NonNull<u8>) {
        (self.0)(ptr);
    }

    pub(crate) fn into_release(self) -> ReleaseFn {
        self.0
    }
}

impl fmt::Debug for Destructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Destructor")
    }
}

/// Who is responsible for freeing a [`NativeBuffer`].
#[derive(Debug)]
pub enum Ownership {
    /// Someone else keeps the block alive and frees it.
    Borrowed,
    /// The holder frees the block with this destructor.
    Owned(Destructor),
}

impl Ownership {
    /// Whether the block will be freed by its holder.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }
}

/// A raw block of native elements.
///
/// Dropping an owned buffer that was never wrapped runs its destructor.
#[derive(Debug)]
pub struct NativeBuffer {
    ptr: NonNull<u8>,
    len: usize,
    dtype: Dtype,
    ownership: Ownership,
}

impl NativeBuffer {
    /// A block owned by someone else.
    ///
    /// # Errors
    ///
    /// Returns [`NdError::NullPointer`] if `ptr` is null.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` elements of `dtype`
    /// for as long as any array wrapping it is alive.
    pub unsafe fn borrowed(ptr: *mut u8, dtype: Dtype, len: usize) -> NdResult<Self> {
        let ptr = NonNull::new(ptr).ok_or(NdError::NullPointer)?;
        Ok(Self::from_parts(ptr, dtype, len, Ownership::Borrowed))
    }

    /// A block released by `destructor` when its holder is done with it.
    ///
    /// # Errors
    ///
    /// Returns [`NdError::NullPointer`] if `ptr` is null. The destructor is
    /// dropped without running.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` elements of `dtype`
    /// until `destructor` runs, and nothing else may free it.
    pub unsafe fn owned(
        ptr: *mut u8,
        dtype: Dtype,
        len: usize,
        destructor: Destructor,
    ) -> NdResult<Self> {
        let ptr = NonNull::new(ptr).ok_or(NdError::NullPointer)?;
        Ok(Self::from_parts(ptr, dtype, len, Ownership::Owned(destructor)))
    }

    /// A fresh zeroed block from the bridge allocator, owned.
    ///
    /// # Errors
    ///
    /// Returns [`NdError::Alloc`] if allocation fails.
    pub fn allocate(dtype: Dtype, len: usize) -> NdResult<Self> {
        let ptr = alloc_buffer(dtype, len)?;
        // Safety: the block just came from alloc_buffer(dtype, len)
        let destructor = unsafe { Destructor::dealloc(dtype, len) };
        Ok(Self::from_parts(ptr, dtype, len, Ownership::Owned(destructor)))
    }

    pub(crate) fn from_parts(ptr: NonNull<u8>, dtype: Dtype, len: usize, ownership: Ownership) -> Self {
        Self {
            ptr,
            len,
            dtype,
            ownership,
        }
    }

    /// Start of the block.
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> NonNull<u8> {
        self.ptr
    }

    /// Number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the block holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element tag.
    #[inline]
    #[must_use]
    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    /// Size of the block in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.len * self.dtype.itemsize()
    }

    /// Current ownership state.
    #[must_use]
    pub fn ownership(&self) -> &Ownership {
        &self.ownership
    }

    /// Split into pointer and ownership, leaving nothing to drop.
    pub(crate) fn into_raw(mut self) -> (NonNull<u8>, Ownership) {
        let ownership = std::mem::replace(&mut self.ownership, Ownership::Borrowed);
        (self.ptr, ownership)
    }
}

impl Drop for NativeBuffer {
    fn drop(&mut self) {
        if let Ownership::Owned(destructor) =
            std::mem::replace(&mut self.ownership, Ownership::Borrowed)
        {
            tracing::trace!(dtype = %self.dtype, len = self.len, "releasing unwrapped buffer");
            destructor.run(self.ptr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting() -> (Arc<AtomicUsize>, Destructor) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let destructor = Destructor::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, destructor)
    }

    #[test]
    fn test_null_pointer_rejected() {
        let err = unsafe { NativeBuffer::borrowed(std::ptr::null_mut(), Dtype::Int32, 4) };
        assert!(matches!(err, Err(NdError::NullPointer)));

        let (count, destructor) = counting();
        let err = unsafe { NativeBuffer::owned(std::ptr::null_mut(), Dtype::Int32, 4, destructor) };
        assert!(matches!(err, Err(NdError::NullPointer)));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_borrowed_is_not_freed() {
        let mut data = [1i32, 2, 3, 4];
        let buffer =
            unsafe { NativeBuffer::borrowed(data.as_mut_ptr().cast(), Dtype::Int32, data.len()) }
                .unwrap();
        assert!(!buffer.ownership().is_owned());
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.byte_len(), 16);
        drop(buffer);
        assert_eq!(data, [1, 2, 3, 4]);
    }

    #[test]
    fn test_unwrapped_owned_buffer_runs_destructor() {
        let mut data = [0.0f64; 3];
        let (count, destructor) = counting();
        let buffer = unsafe {
            NativeBuffer::owned(data.as_mut_ptr().cast(), Dtype::Float64, 3, destructor)
        }
        .unwrap();
        assert!(buffer.ownership().is_owned());
        drop(buffer);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_into_raw_disarms_drop() {
        let mut data = [0u8; 2];
        let (count, destructor) = counting();
        let buffer =
            unsafe { NativeBuffer::owned(data.as_mut_ptr(), Dtype::Int8, 2, destructor) }.unwrap();
        let (ptr, ownership) = buffer.into_raw();
        assert_eq!(count.load(Ordering::SeqCst), 0);
        match ownership {
            Ownership::Owned(d) => d.run(ptr),
            Ownership::Borrowed => panic!("ownership lost"),
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_allocate_is_zeroed() {
        let buffer = NativeBuffer::allocate(Dtype::Int64, 8).unwrap();
        assert_eq!(buffer.dtype(), Dtype::Int64);
        let bytes = unsafe { std::slice::from_raw_parts(buffer.as_ptr().as_ptr(), buffer.byte_len()) };
        assert!(bytes.iter().all(|&b| b == 0));
    }
}
