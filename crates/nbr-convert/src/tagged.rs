//! Tag-driven conversion.
//!
//! Generated callers that only know the element kind at run time go
//! through [`extract`] and [`construct`], which dispatch once on the tag
//! to the typed [`NativeScalar`] implementations.

use nbr_rts_object::{Flavor, ManagedScalar, ScalarValue};
use nbr_types::{Complex128, Complex64, Dtype};

use crate::classify::matches_tag;
use crate::native::NativeScalar;
use crate::{ConvertError, ConvertResult};

/// Extract the value of `obj` as the native kind named by `tag`.
///
/// The tag is not checked against `obj`; see [`try_extract`].
#[must_use]
pub fn extract(tag: Dtype, obj: &ManagedScalar) -> ScalarValue {
    match tag {
        Dtype::Bool => ScalarValue::Bool(bool::from_managed(obj)),
        Dtype::Int8 => ScalarValue::Int8(i8::from_managed(obj)),
        Dtype::Int16 => ScalarValue::Int16(i16::from_managed(obj)),
        Dtype::Int32 => ScalarValue::Int32(i32::from_managed(obj)),
        Dtype::Int64 => ScalarValue::Int64(i64::from_managed(obj)),
        Dtype::Float32 => ScalarValue::Float32(f32::from_managed(obj)),
        Dtype::Float64 => ScalarValue::Float64(f64::from_managed(obj)),
        Dtype::Complex64 => ScalarValue::Complex64(Complex64::from_managed(obj)),
        Dtype::Complex128 => ScalarValue::Complex128(Complex128::from_managed(obj)),
    }
}

/// Like [`extract`], but checks the tag first.
///
/// # Errors
///
/// Returns [`ConvertError::TagMismatch`] if `obj` is not a `tag`.
pub fn try_extract(tag: Dtype, obj: &ManagedScalar) -> ConvertResult<ScalarValue> {
    if matches_tag(tag, obj) {
        Ok(extract(tag, obj))
    } else {
        Err(ConvertError::TagMismatch {
            expected: tag,
            found: obj.dtype(),
            flavor: obj.flavor(),
        })
    }
}

/// Box a tagged native value.
#[must_use]
pub fn construct(value: ScalarValue, flavor: Flavor) -> ManagedScalar {
    match value {
        ScalarValue::Bool(v) => v.to_managed(flavor),
        ScalarValue::Int8(v) => v.to_managed(flavor),
        ScalarValue::Int16(v) => v.to_managed(flavor),
        ScalarValue::Int32(v) => v.to_managed(flavor),
        ScalarValue::Int64(v) => v.to_managed(flavor),
        ScalarValue::Float32(v) => v.to_managed(flavor),
        ScalarValue::Float64(v) => v.to_managed(flavor),
        ScalarValue::Complex64(v) => v.to_managed(flavor),
        ScalarValue::Complex128(v) => v.to_managed(flavor),
    }
}
