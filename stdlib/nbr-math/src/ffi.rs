//! C ABI entry points for generated arithmetic code.
//!
//! Every function is `no_mangle` with the C calling convention so compiled
//! kernels can link against stable `nbr_` symbols. Complex arguments and
//! results cross as the `#[repr(C)]` [`Complex128`] struct.

use nbr_types::Complex128;

use crate::{angle, integer, modulo, round, sign};

/// Floored integer modulo. `b` must be nonzero.
#[no_mangle]
pub extern "C" fn nbr_modulo(a: i64, b: i64) -> i64 {
    modulo::integer_modulo(a, b)
}

/// Floored floating point modulo.
#[no_mangle]
pub extern "C" fn nbr_fmodulo(a: f64, b: f64) -> f64 {
    modulo::float_modulo(a, b)
}

/// Integer sign.
#[no_mangle]
pub extern "C" fn nbr_isign(x: i64) -> i64 {
    sign::isign(x)
}

/// Floating point sign.
#[no_mangle]
pub extern "C" fn nbr_fsign(x: f64) -> f64 {
    sign::fsign(x)
}

/// Complex sign as a real-valued complex.
#[no_mangle]
pub extern "C" fn nbr_csgn(x: Complex128) -> Complex128 {
    sign::csgn(x)
}

/// Complex unit direction.
#[no_mangle]
pub extern "C" fn nbr_csign(x: Complex128) -> Complex128 {
    sign::csign(x)
}

/// Round half to even at `ndigits` decimal places.
#[no_mangle]
pub extern "C" fn nbr_fbankers_round(value: f64, ndigits: i64) -> f64 {
    round::bankers_round_f64(value, ndigits)
}

/// Integer round half to even at `ndigits` decimal places.
#[no_mangle]
pub extern "C" fn nbr_ibankers_round(value: i64, ndigits: i64) -> i64 {
    round::bankers_round_i64(value, ndigits)
}

/// Factorial
#[no_mangle]
pub extern "C" fn nbr_factorial(n: i64) -> i64 {
    integer::factorial(n)
}

/// GCD
#[no_mangle]
pub extern "C" fn nbr_gcd(a: i64, b: i64) -> i64 {
    integer::gcd(a, b)
}

/// LCM
#[no_mangle]
pub extern "C" fn nbr_lcm(a: i64, b: i64) -> i64 {
    integer::lcm(a, b)
}

/// Degrees to radians.
#[no_mangle]
pub extern "C" fn nbr_radians(deg: f64) -> f64 {
    angle::radians(deg)
}

/// Radians to degrees.
#[no_mangle]
pub extern "C" fn nbr_degrees(rad: f64) -> f64 {
    angle::degrees(rad)
}
