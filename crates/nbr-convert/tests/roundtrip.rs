//! Property tests for scalar conversion.
//!
//! Every value representable in the target width must survive boxing and
//! unboxing unchanged, in both flavours.

use nbr_convert::{
    classify, is_bool, native_to_scalar, scalar_to_native, Flavor, ManagedScalar, NativeScalar,
    ScalarClass,
};
use nbr_types::{Complex128, Complex64};
use proptest::prelude::*;

fn flavor() -> impl Strategy<Value = Flavor> {
    prop_oneof![Just(Flavor::Builtin), Just(Flavor::Typed)]
}

fn roundtrip<T: NativeScalar>(v: T, flavor: Flavor) -> T {
    scalar_to_native::<T>(&native_to_scalar(v, flavor))
}

proptest! {
    #[test]
    fn bool_roundtrip(v in any::<bool>(), f in flavor()) {
        prop_assert_eq!(roundtrip(v, f), v);
    }

    #[test]
    fn int8_roundtrip(v in any::<i8>(), f in flavor()) {
        prop_assert_eq!(roundtrip(v, f), v);
    }

    #[test]
    fn int16_roundtrip(v in any::<i16>(), f in flavor()) {
        prop_assert_eq!(roundtrip(v, f), v);
    }

    #[test]
    fn int32_roundtrip(v in any::<i32>(), f in flavor()) {
        prop_assert_eq!(roundtrip(v, f), v);
    }

    #[test]
    fn int64_roundtrip(v in any::<i64>(), f in flavor()) {
        prop_assert_eq!(roundtrip(v, f), v);
    }

    #[test]
    fn float32_roundtrip(v in proptest::num::f32::NORMAL | proptest::num::f32::ZERO, f in flavor()) {
        prop_assert_eq!(roundtrip(v, f).to_bits(), v.to_bits());
    }

    #[test]
    fn float64_roundtrip(v in proptest::num::f64::NORMAL | proptest::num::f64::ZERO, f in flavor()) {
        prop_assert_eq!(roundtrip(v, f).to_bits(), v.to_bits());
    }

    #[test]
    fn complex64_roundtrip(re in proptest::num::f32::NORMAL, im in proptest::num::f32::NORMAL, f in flavor()) {
        let z = Complex64::new(re, im);
        prop_assert_eq!(roundtrip(z, f), z);
    }

    #[test]
    fn complex128_roundtrip(re in proptest::num::f64::NORMAL, im in proptest::num::f64::NORMAL, f in flavor()) {
        let z = Complex128::new(re, im);
        prop_assert_eq!(roundtrip(z, f), z);
    }

    #[test]
    fn builtin_ints_classify_as_native(v in any::<i64>()) {
        let obj = ManagedScalar::builtin_int(v);
        prop_assert_eq!(classify(&obj), ScalarClass::NativeInt);
        prop_assert!(!is_bool(&obj));
    }
}

#[test]
fn boolean_construction_returns_singletons() {
    let first = native_to_scalar(false, Flavor::Builtin);
    let second = native_to_scalar(false, Flavor::Typed);
    assert!(ManagedScalar::ptr_eq(&first, &second));
    let yes = native_to_scalar(true, Flavor::Typed);
    assert!(ManagedScalar::ptr_eq(&yes, &ManagedScalar::boolean(true)));
    assert!(!ManagedScalar::ptr_eq(&first, &yes));
}
