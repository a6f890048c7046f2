//! Managed array handles.
//!
//! A [`ManagedArray`] describes a strided view of a memory block: element
//! tag, shape, byte strides, layout flags and an optional base reference.
//! The base keeps whatever actually owns the memory alive, either a parent
//! array (for views) or a [`Capsule`] (for foreign blocks whose ownership
//! was transferred). An array without a base either owns its data outright
//! (`OWNDATA`) or borrows memory that someone else keeps alive.

use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

use nbr_types::{Dtype, FfiSafe};
use smallvec::SmallVec;

use crate::capsule::{Capsule, ReleaseFn};
use crate::flags::ArrayFlags;

/// Per-dimension storage; most arrays crossing the boundary have at most
/// four dimensions.
pub type Dims<T> = SmallVec<[T; 4]>;

/// What keeps an array's memory alive.
#[derive(Clone, Debug)]
pub enum Base {
    /// The array is a view into a parent array.
    Array(ManagedArray),
    /// The array wraps a foreign block owned by a capsule.
    Capsule(Capsule),
}

struct ArrayObject {
    dtype: Dtype,
    data: NonNull<u8>,
    shape: Dims<usize>,
    strides: Dims<isize>,
    base: Option<Base>,
    flags: ArrayFlags,
    own_data: Option<ReleaseFn>,
}

impl Drop for ArrayObject {
    fn drop(&mut self) {
        if let Some(release) = self.own_data.take() {
            release(self.data);
        }
    }
}

/// Reference-counted handle to an array object.
#[derive(Clone)]
pub struct ManagedArray(Arc<ArrayObject>);

/// Row-major byte strides for `shape`.
#[must_use]
pub fn c_strides(shape: &[usize], itemsize: usize) -> Dims<isize> {
    let mut strides: Dims<isize> = smallvec::smallvec![0; shape.len()];
    let mut acc = itemsize as isize;
    for (stride, &extent) in strides.iter_mut().zip(shape).rev() {
        *stride = acc;
        acc *= extent.max(1) as isize;
    }
    strides
}

/// Column-major byte strides for `shape`.
#[must_use]
pub fn f_strides(shape: &[usize], itemsize: usize) -> Dims<isize> {
    let mut strides: Dims<isize> = smallvec::smallvec![0; shape.len()];
    let mut acc = itemsize as isize;
    for (stride, &extent) in strides.iter_mut().zip(shape) {
        *stride = acc;
        acc *= extent.max(1) as isize;
    }
    strides
}

impl ManagedArray {
    /// Build an array object around existing memory.
    ///
    /// If `strides` is `None`, byte strides are derived from the requested
    /// layout: column-major when `flags` asks for column-major only,
    /// row-major otherwise. `flags` are stored as given, plus `ALIGNED` when
    /// the data pointer is aligned for `dtype`.
    ///
    /// # Safety
    ///
    /// `data` must be valid for every element addressed by `shape` and the
    /// strides for as long as the returned array (and any clone or view of
    /// it) is alive, unless `base` keeps it alive.
    ///
    /// # Panics
    ///
    /// Panics if `strides` is given with a different length than `shape`.
    #[must_use]
    pub unsafe fn from_raw_parts(
        dtype: Dtype,
        data: NonNull<u8>,
        shape: &[usize],
        strides: Option<&[isize]>,
        flags: ArrayFlags,
        base: Option<Base>,
    ) -> Self {
        let strides: Dims<isize> = match strides {
            Some(s) => {
                assert_eq!(s.len(), shape.len(), "shape and strides differ in length");
                s.iter().copied().collect()
            }
            None if flags.is_f_contiguous() && !flags.is_c_contiguous() => {
                f_strides(shape, dtype.itemsize())
            }
            None => c_strides(shape, dtype.itemsize()),
        };
        let mut flags = flags;
        if data.as_ptr() as usize % dtype.alignment() == 0 {
            flags |= ArrayFlags::ALIGNED;
        }
        Self(Arc::new(ArrayObject {
            dtype,
            data,
            shape: shape.iter().copied().collect(),
            strides,
            base,
            flags,
            own_data: None,
        }))
    }

    /// A row-major array that owns `data`.
    ///
    /// # Panics
    ///
    /// Panics if the product of `shape` differs from `data.len()`.
    #[must_use]
    pub fn from_vec<T: FfiSafe>(data: Vec<T>, shape: &[usize]) -> Self {
        assert_eq!(
            shape.iter().product::<usize>(),
            data.len(),
            "shape does not match element count"
        );
        let mut data = std::mem::ManuallyDrop::new(data);
        let (ptr, len, cap) = (data.as_mut_ptr(), data.len(), data.capacity());
        // Safety: Vec pointers are never null
        let data_ptr = unsafe { NonNull::new_unchecked(ptr.cast::<u8>()) };
        let flags = ArrayFlags::from_layout(shape, &c_strides(shape, T::DTYPE.itemsize()), T::DTYPE.itemsize())
            | ArrayFlags::WRITEABLE
            | ArrayFlags::ALIGNED
            | ArrayFlags::OWNDATA;
        Self(Arc::new(ArrayObject {
            dtype: T::DTYPE,
            data: data_ptr,
            shape: shape.iter().copied().collect(),
            strides: c_strides(shape, T::DTYPE.itemsize()),
            base: None,
            flags,
            own_data: Some(Box::new(move |p: NonNull<u8>| {
                // Safety: these are the parts of the Vec we took apart above
                drop(unsafe { Vec::from_raw_parts(p.as_ptr().cast::<T>(), len, cap) });
            })),
        }))
    }

    /// Element tag.
    #[inline]
    #[must_use]
    pub fn dtype(&self) -> Dtype {
        self.0.dtype
    }

    /// Bytes per element.
    #[inline]
    #[must_use]
    pub fn itemsize(&self) -> usize {
        self.0.dtype.itemsize()
    }

    /// Number of dimensions.
    #[inline]
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.0.shape.len()
    }

    /// Extent of every dimension.
    #[inline]
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.0.shape
    }

    /// Byte stride of every dimension.
    #[inline]
    #[must_use]
    pub fn strides(&self) -> &[isize] {
        &self.0.strides
    }

    /// Total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.shape.iter().product()
    }

    /// Whether the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pointer to the first element.
    #[inline]
    #[must_use]
    pub fn data_ptr(&self) -> NonNull<u8> {
        self.0.data
    }

    /// Layout flags.
    #[inline]
    #[must_use]
    pub fn flags(&self) -> ArrayFlags {
        self.0.flags
    }

    /// Base reference, if any.
    #[inline]
    #[must_use]
    pub fn base(&self) -> Option<&Base> {
        self.0.base.as_ref()
    }

    /// Whether two handles refer to the same array object.
    #[inline]
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Number of live handles to this array object.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// A view of this array with new geometry.
    ///
    /// The view's base is `self`; its contiguity flags are derived from the
    /// given layout and it is writable iff `self` is.
    ///
    /// # Safety
    ///
    /// Every element addressed by `byte_offset`, `shape` and `strides` must
    /// lie inside the memory of `self`.
    #[must_use]
    pub unsafe fn view(&self, byte_offset: isize, shape: &[usize], strides: &[isize]) -> Self {
        let mut flags = ArrayFlags::from_layout(shape, strides, self.itemsize());
        if self.flags().is_writeable() {
            flags |= ArrayFlags::WRITEABLE;
        }
        // Safety: the caller keeps the offset within our allocation
        let data = unsafe { NonNull::new_unchecked(self.0.data.as_ptr().offset(byte_offset)) };
        unsafe {
            Self::from_raw_parts(
                self.dtype(),
                data,
                shape,
                Some(strides),
                flags,
                Some(Base::Array(self.clone())),
            )
        }
    }

    /// The transposed view (all axes reversed).
    #[must_use]
    pub fn transpose(&self) -> Self {
        let shape: Dims<usize> = self.shape().iter().rev().copied().collect();
        let strides: Dims<isize> = self.strides().iter().rev().copied().collect();
        // Safety: a permutation of axes addresses exactly the same elements
        unsafe { self.view(0, &shape, &strides) }
    }

    /// The view `start..stop` with `step` along `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis` is out of range, `step` is zero, or
    /// `start <= stop <= shape[axis]` does not hold.
    #[must_use]
    pub fn slice_axis(&self, axis: usize, start: usize, stop: usize, step: usize) -> Self {
        assert!(axis < self.ndim(), "axis {axis} out of range");
        assert!(step > 0, "step must be positive");
        assert!(start <= stop && stop <= self.shape()[axis], "slice out of bounds");

        let mut shape: Dims<usize> = self.shape().iter().copied().collect();
        let mut strides: Dims<isize> = self.strides().iter().copied().collect();
        shape[axis] = (stop - start).div_ceil(step);
        let offset = if shape[axis] == 0 { 0 } else { start as isize * strides[axis] };
        strides[axis] *= step as isize;
        // Safety: bounds checked above
        unsafe { self.view(offset, &shape, &strides) }
    }

    /// Read one element.
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the element tag or `index` is out of
    /// bounds.
    #[must_use]
    pub fn get<T: FfiSafe>(&self, index: &[usize]) -> T {
        assert_eq!(T::DTYPE, self.dtype(), "element type mismatch");
        assert_eq!(index.len(), self.ndim(), "index rank mismatch");
        let mut offset = 0isize;
        for ((&i, &extent), &stride) in index.iter().zip(self.shape()).zip(self.strides()) {
            assert!(i < extent, "index {i} out of bounds for extent {extent}");
            offset += i as isize * stride;
        }
        // Safety: in bounds per the constructor contract
        unsafe { self.0.data.as_ptr().offset(offset).cast::<T>().read_unaligned() }
    }

    /// Copy every element out in row-major index order.
    ///
    /// # Panics
    ///
    /// Panics if `T` does not match the element tag.
    #[must_use]
    pub fn to_vec<T: FfiSafe>(&self) -> Vec<T> {
        let n = self.len();
        let mut out = Vec::with_capacity(n);
        let mut index: Dims<usize> = smallvec::smallvec![0; self.ndim()];
        for _ in 0..n {
            out.push(self.get::<T>(&index));
            for axis in (0..index.len()).rev() {
                index[axis] += 1;
                if index[axis] < self.shape()[axis] {
                    break;
                }
                index[axis] = 0;
            }
        }
        out
    }
}

impl fmt::Debug for ManagedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedArray")
            .field("dtype", &self.0.dtype)
            .field("data", &self.0.data)
            .field("shape", &self.0.shape)
            .field("strides", &self.0.strides)
            .field("flags", &self.0.flags)
            .field("has_base", &self.0.base.is_some())
            .finish()
    }
}
