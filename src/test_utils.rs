// SPDX-License-Identifier: MPL-2.0
//! Test helpers shared by the unit test modules.
//!
//! Float assertions come from the `approx` crate; `assert_eq!` is only used
//! where a value is produced without arithmetic.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

/// Tolerance for `f32` geometry that should be exact up to rounding.
pub const F32_EPSILON: f32 = 1e-6;

/// Tolerance for `f64` timing values that should be exact up to rounding.
pub const F64_EPSILON: f64 = 1e-10;
