//! Array layout flags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Layout and access flags carried by every array object.
    ///
    /// Bit values follow the host runtime so that flags can be passed through
    /// unchanged.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ArrayFlags: u32 {
        /// Elements are laid out densely in row-major order.
        const C_CONTIGUOUS = 0x0001;
        /// Elements are laid out densely in column-major order.
        const F_CONTIGUOUS = 0x0002;
        /// The array frees its data itself when it dies.
        const OWNDATA = 0x0004;
        /// Data pointer is aligned for the element type.
        const ALIGNED = 0x0100;
        /// Data may be written through this array.
        const WRITEABLE = 0x0400;
    }
}

impl ArrayFlags {
    /// Row-major contiguous.
    #[must_use]
    pub const fn is_c_contiguous(self) -> bool {
        self.contains(Self::C_CONTIGUOUS)
    }

    /// Column-major contiguous.
    #[must_use]
    pub const fn is_f_contiguous(self) -> bool {
        self.contains(Self::F_CONTIGUOUS)
    }

    /// Writable.
    #[must_use]
    pub const fn is_writeable(self) -> bool {
        self.contains(Self::WRITEABLE)
    }

    /// Contiguity flags implied by an actual shape and byte-stride layout.
    ///
    /// An array with a zero extent, or with at most one non-unit extent, is
    /// both row- and column-major contiguous. Unit extents never break
    /// contiguity whatever their stride.
    #[must_use]
    pub fn from_layout(shape: &[usize], strides: &[isize], itemsize: usize) -> Self {
        let mut flags = Self::empty();
        if is_dense(shape.iter().zip(strides).rev(), itemsize) {
            flags |= Self::C_CONTIGUOUS;
        }
        if is_dense(shape.iter().zip(strides), itemsize) {
            flags |= Self::F_CONTIGUOUS;
        }
        flags
    }
}

fn is_dense<'a>(dims: impl Iterator<Item = (&'a usize, &'a isize)> + Clone, itemsize: usize) -> bool {
    if dims.clone().any(|(&extent, _)| extent == 0) {
        return true;
    }
    let mut expected = itemsize as isize;
    for (&extent, &stride) in dims {
        if extent != 1 {
            if stride != expected {
                return false;
            }
            expected *= extent as isize;
        }
    }
    true
}
