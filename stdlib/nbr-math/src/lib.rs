//! # numbridge numeric semantics
//!
//! Standalone numeric functions called by generated arithmetic code. Results
//! are exact and do not depend on the hardware rounding mode.
//!
//! ## Overview
//!
//! - [`integer_modulo`] / [`float_modulo`]: modulo with the sign of the
//!   divisor.
//! - [`isign`], [`fsign`], [`csgn`], [`csign`]: sign functions.
//! - [`bankers_round_f64`] / [`bankers_round_i64`]: round half to even.
//! - [`factorial`], [`gcd`], [`lcm`].
//! - [`radians`] / [`degrees`].
//!
//! The [`ffi`] module exports each function with a C ABI under an `nbr_`
//! prefix.
//!
//! ## Preconditions
//!
//! Nothing here validates its input. A zero integer divisor and factorial
//! overflow are the caller's responsibility.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

pub mod angle;
pub mod ffi;
pub mod integer;
pub mod modulo;
pub mod round;
pub mod sign;

pub use angle::{degrees, radians};
pub use integer::{factorial, gcd, lcm};
pub use modulo::{float_modulo, integer_modulo};
pub use round::{bankers_round_f64, bankers_round_i64};
pub use sign::{csgn, csign, fsign, isign};
