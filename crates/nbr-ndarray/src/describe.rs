//! Shape and stride descriptors for native kernels.
//!
//! Native kernels index arrays in element units. The descriptor reports the
//! array's extents plus one stride per dimension, chosen as follows:
//!
//! - An array without a base, or a row-major contiguous one, gets canonical
//!   row-major strides accumulated from the trailing dimension, whatever its
//!   byte strides or column-major flag say.
//! - Any other array (a non-contiguous view, or a foreign block held by a
//!   capsule) gets its byte strides divided by the item size, read from the
//!   leading dimension.

use nbr_rts_object::ManagedArray;
use serde::{Deserialize, Serialize};

/// Extents and element strides of one array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Descriptor {
    /// Extent of every dimension.
    pub shape: Vec<i64>,
    /// Stride of every dimension, in elements.
    pub strides: Vec<i64>,
}

impl Descriptor {
    /// Number of dimensions.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    #[must_use]
    pub fn len(&self) -> i64 {
        self.shape.iter().product()
    }

    /// Whether any extent is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Descriptor for `array`.
#[must_use]
pub fn describe(array: &ManagedArray) -> Descriptor {
    let nd = array.ndim();
    let mut desc = Descriptor {
        shape: vec![0; nd],
        strides: vec![0; nd],
    };
    describe_into(array, &mut desc.shape, &mut desc.strides);
    desc
}

/// Write the descriptor of `array` into caller-owned storage.
///
/// Only the first `array.ndim()` entries of each slice are written.
///
/// # Panics
///
/// Panics if either slice is shorter than `array.ndim()`.
pub fn describe_into(array: &ManagedArray, shape: &mut [i64], strides: &mut [i64]) {
    let nd = array.ndim();
    let (shape, strides) = (&mut shape[..nd], &mut strides[..nd]);

    for (dst, &extent) in shape.iter_mut().zip(array.shape()) {
        *dst = extent as i64;
    }

    if array.base().is_none() || array.flags().is_c_contiguous() {
        let mut acc = 1i64;
        for (dst, &extent) in strides.iter_mut().zip(shape.iter()).rev() {
            *dst = acc;
            acc *= extent;
        }
    } else {
        let itemsize = array.itemsize() as isize;
        for (dst, &stride) in strides.iter_mut().zip(array.strides()) {
            *dst = (stride / itemsize) as i64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iota(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_owned_array() {
        let arr = ManagedArray::from_vec(iota(24), &[2, 3, 4]);
        let desc = describe(&arr);
        assert_eq!(desc.shape, vec![2, 3, 4]);
        assert_eq!(desc.strides, vec![12, 4, 1]);
        assert_eq!(desc.ndim(), 3);
        assert_eq!(desc.len(), 24);
    }

    #[test]
    fn test_zero_dimensional() {
        let arr = ManagedArray::from_vec(vec![7i32], &[]);
        let desc = describe(&arr);
        assert!(desc.shape.is_empty());
        assert!(desc.strides.is_empty());
        assert_eq!(desc.len(), 1);
    }

    #[test]
    fn test_zero_extent() {
        let arr = ManagedArray::from_vec(Vec::<i64>::new(), &[3, 0]);
        let desc = describe(&arr);
        assert_eq!(desc.shape, vec![3, 0]);
        assert_eq!(desc.strides, vec![0, 1]);
        assert!(desc.is_empty());
    }

    #[test]
    fn test_transposed_view_uses_byte_strides() {
        let arr = ManagedArray::from_vec(iota(6), &[2, 3]);
        let t = arr.transpose();
        assert!(!t.flags().is_c_contiguous());
        let desc = describe(&t);
        assert_eq!(desc.shape, vec![3, 2]);
        assert_eq!(desc.strides, vec![1, 3]);
    }

    #[test]
    fn test_strided_slice() {
        let arr = ManagedArray::from_vec(iota(16), &[8, 2]);
        let every_other_row = arr.slice_axis(0, 0, 8, 2);
        let desc = describe(&every_other_row);
        assert_eq!(desc.shape, vec![4, 2]);
        assert_eq!(desc.strides, vec![4, 1]);
    }

    #[test]
    fn test_contiguous_view_is_canonical() {
        let arr = ManagedArray::from_vec(iota(16), &[8, 2]);
        let rows = arr.slice_axis(0, 2, 6, 1);
        assert!(rows.flags().is_c_contiguous());
        let desc = describe(&rows);
        assert_eq!(desc.shape, vec![4, 2]);
        assert_eq!(desc.strides, vec![2, 1]);
    }

    #[test]
    fn test_column_slice() {
        let arr = ManagedArray::from_vec((0..12i32).collect(), &[3, 4]);
        let col = arr.slice_axis(1, 1, 2, 1);
        let desc = describe(&col);
        assert_eq!(desc.shape, vec![3, 1]);
        assert_eq!(desc.strides, vec![4, 1]);
    }

    #[test]
    fn test_column_major_views_use_element_strides() {
        // F-contiguous view with a base: not C-contiguous, so no canonical strides
        let arr = ManagedArray::from_vec(iota(12), &[3, 4]);
        let f = arr.transpose();
        assert!(f.flags().is_f_contiguous());
        assert!(!f.flags().is_c_contiguous());
        assert_eq!(describe(&f).strides, vec![1, 4]);

        // every other row of it: byte strides [16, 32]
        let stepped = f.slice_axis(0, 0, 4, 2);
        assert_eq!(stepped.strides(), &[16, 32]);
        let desc = describe(&stepped);
        assert_eq!(desc.shape, vec![2, 3]);
        assert_eq!(desc.strides, vec![2, 4]);

        // the strides address the same elements as the view itself
        let base = stepped.data_ptr().as_ptr().cast::<f64>();
        for i in 0..2 {
            for j in 0..3 {
                let offset = usize::try_from(i * desc.strides[0] + j * desc.strides[1]).unwrap();
                let native = unsafe { base.add(offset).read() };
                let (iu, ju) = (usize::try_from(i).unwrap(), usize::try_from(j).unwrap());
                assert_eq!(native, stepped.get::<f64>(&[iu, ju]));
            }
        }
    }

    #[test]
    fn test_describe_into_fixed_storage() {
        let arr = ManagedArray::from_vec(iota(6), &[2, 3]);
        let mut shape = [-1i64; 4];
        let mut strides = [-1i64; 4];
        describe_into(&arr, &mut shape, &mut strides);
        assert_eq!(shape, [2, 3, -1, -1]);
        assert_eq!(strides, [3, 1, -1, -1]);
    }

    #[test]
    #[should_panic]
    fn test_describe_into_short_storage() {
        let arr = ManagedArray::from_vec(iota(6), &[2, 3]);
        let mut shape = [0i64; 1];
        let mut strides = [0i64; 1];
        describe_into(&arr, &mut shape, &mut strides);
    }

    #[test]
    fn test_serde() {
        let desc = Descriptor {
            shape: vec![3, 4],
            strides: vec![4, 1],
        };
        let json = serde_json::to_string(&desc).unwrap();
        assert_eq!(json, r#"{"shape":[3,4],"strides":[4,1]}"#);
        let back: Descriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);
    }
}
