//! Ownership transfer against the bridge allocator.
//!
//! Kept to a single test so nothing else in this binary touches the
//! process-wide allocation counters.

use nbr_ndarray::{describe, wrap, Order};
use nbr_rts_object::{alloc_buffer, alloc_stats, Base};
use nbr_types::Dtype;

#[test]
fn transferred_buffer_is_freed_exactly_once() {
    let before = alloc_stats();

    let ptr = alloc_buffer(Dtype::Float64, 12).unwrap();
    let arr = unsafe { wrap(ptr, Dtype::Float64, &[3, 4], Order::RowMajor, true) };
    let after_alloc = alloc_stats();
    assert_eq!(after_alloc.live_blocks, before.live_blocks + 1);
    assert_eq!(after_alloc.bytes_allocated, before.bytes_allocated + 96);

    let column = arr.slice_axis(1, 2, 3, 1);
    let transposed = arr.transpose();
    assert!(matches!(column.base(), Some(Base::Array(_))));
    assert_eq!(describe(&column).strides, vec![4, 1]);
    assert_eq!(describe(&transposed).strides, vec![1, 4]);

    drop(arr);
    drop(transposed);
    assert_eq!(alloc_stats().live_blocks, before.live_blocks + 1);

    drop(column);
    let after_free = alloc_stats();
    assert_eq!(after_free.live_blocks, before.live_blocks);
    assert_eq!(after_free.bytes_allocated, before.bytes_allocated);
    assert_eq!(after_free.deallocation_count, before.deallocation_count + 1);
}
