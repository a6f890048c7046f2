//! Block allocator for buffers that cross the boundary.
//!
//! Generated code obtains element buffers here when it intends to hand
//! them to the runtime with ownership. The matching [`free_buffer`] is what
//! an owning capsule calls on release, so both sides must agree on the
//! layout: `count * dtype.itemsize()` bytes aligned to [`ALLOC_ALIGN`].

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

use nbr_types::Dtype;
use thiserror::Error;

/// Alignment of every block handed out, enough for any element kind and
/// for 128-bit SIMD loads.
pub const ALLOC_ALIGN: usize = 16;

/// Errors from the block allocator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AllocError {
    /// The system allocator returned null.
    #[error("out of memory allocating {requested} bytes")]
    OutOfMemory {
        /// Requested allocation size.
        requested: usize,
    },
    /// Size overflowed or the layout was otherwise invalid.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// Result type for allocation operations.
pub type AllocResult<T> = Result<T, AllocError>;

/// Snapshot of allocator activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Bytes currently allocated.
    pub bytes_allocated: usize,
    /// Blocks currently allocated.
    pub live_blocks: usize,
    /// Total allocations performed.
    pub allocation_count: usize,
    /// Total deallocations performed.
    pub deallocation_count: usize,
}

struct GlobalStats {
    bytes_allocated: AtomicUsize,
    live_blocks: AtomicUsize,
    allocation_count: AtomicUsize,
    deallocation_count: AtomicUsize,
}

static STATS: GlobalStats = GlobalStats {
    bytes_allocated: AtomicUsize::new(0),
    live_blocks: AtomicUsize::new(0),
    allocation_count: AtomicUsize::new(0),
    deallocation_count: AtomicUsize::new(0),
};

impl GlobalStats {
    fn record_alloc(&self, size: usize) {
        self.bytes_allocated.fetch_add(size, Ordering::Relaxed);
        self.live_blocks.fetch_add(1, Ordering::Relaxed);
        self.allocation_count.fetch_add(1, Ordering::Relaxed);
    }

    fn record_dealloc(&self, size: usize) {
        self.bytes_allocated.fetch_sub(size, Ordering::Relaxed);
        self.live_blocks.fetch_sub(1, Ordering::Relaxed);
        self.deallocation_count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Current allocator statistics for this process.
#[must_use]
pub fn alloc_stats() -> AllocStats {
    AllocStats {
        bytes_allocated: STATS.bytes_allocated.load(Ordering::Relaxed),
        live_blocks: STATS.live_blocks.load(Ordering::Relaxed),
        allocation_count: STATS.allocation_count.load(Ordering::Relaxed),
        deallocation_count: STATS.deallocation_count.load(Ordering::Relaxed),
    }
}

/// Layout of a block holding `count` elements of `dtype`.
///
/// # Errors
///
/// Returns [`AllocError::InvalidLayout`] if the byte size overflows.
pub fn buffer_layout(dtype: Dtype, count: usize) -> AllocResult<Layout> {
    let size = dtype
        .itemsize()
        .checked_mul(count)
        .ok_or_else(|| AllocError::InvalidLayout("size overflow".to_string()))?;
    Layout::from_size_align(size, ALLOC_ALIGN).map_err(|e| AllocError::InvalidLayout(e.to_string()))
}

/// Allocate a zeroed block for `count` elements of `dtype`.
///
/// A zero-element request returns a dangling, well-aligned pointer that
/// must still be passed to [`free_buffer`] with `count == 0`, which ignores it.
///
/// # Errors
///
/// Returns an error if the layout is invalid or the system is out of memory.
pub fn alloc_buffer(dtype: Dtype, count: usize) -> AllocResult<NonNull<u8>> {
    let layout = buffer_layout(dtype, count)?;
    if layout.size() == 0 {
        return NonNull::new(ALLOC_ALIGN as *mut u8)
            .ok_or_else(|| AllocError::InvalidLayout("null dangling pointer".to_string()));
    }

    // Safety: layout has non-zero size
    let raw = unsafe { std::alloc::alloc_zeroed(layout) };
    let ptr = NonNull::new(raw).ok_or(AllocError::OutOfMemory {
        requested: layout.size(),
    })?;
    STATS.record_alloc(layout.size());
    Ok(ptr)
}

/// Free a block obtained from [`alloc_buffer`].
///
/// # Safety
///
/// `ptr` must come from `alloc_buffer(dtype, count)` with the same `dtype`
/// and `count`, and must not be freed twice.
pub unsafe fn free_buffer(ptr: NonNull<u8>, dtype: Dtype, count: usize) {
    let Ok(layout) = buffer_layout(dtype, count) else {
        return;
    };
    if layout.size() == 0 {
        return;
    }
    STATS.record_dealloc(layout.size());
    // Safety: guaranteed by the caller
    unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) };
}
