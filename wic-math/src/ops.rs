// WIC - wic-math
// Module: Floating-point semantics
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly `min`, `max`, `ceil`, `floor`, `trunc` and `nearest`.
//!
//! All functions are pure and never trap. A NaN operand always yields the
//! quieted form of that operand (the left one when both are NaN), so the sign
//! and payload of the incoming NaN survive.
//!
//! Numerically equal operands of `min`/`max` are told apart by their raw bit
//! patterns compared as unsigned integers: `min` returns the operand with the
//! larger pattern and `max` the one with the smaller. For the only equal
//! pair with distinct patterns, `+0.0` and `-0.0`, this makes
//! `min(+0.0, -0.0) == -0.0` and `max(+0.0, -0.0) == +0.0` in either
//! argument order.

use crate::traits::WasmFloat;

/// Forces a NaN quiet; returns any other value unchanged.
#[inline]
pub fn quiet_nan<F: WasmFloat>(value: F) -> F {
    value.quiet()
}

/// WebAssembly `fN.min`.
#[inline]
pub fn float_min<F: WasmFloat>(left: F, right: F) -> F {
    if left.is_nan() {
        left.quiet()
    } else if right.is_nan() {
        right.quiet()
    } else if left < right {
        left
    } else if right < left {
        right
    } else if left.to_bits() < right.to_bits() {
        right
    } else {
        left
    }
}

/// WebAssembly `fN.max`.
#[inline]
pub fn float_max<F: WasmFloat>(left: F, right: F) -> F {
    if left.is_nan() {
        left.quiet()
    } else if right.is_nan() {
        right.quiet()
    } else if left > right {
        left
    } else if right > left {
        right
    } else if left.to_bits() > right.to_bits() {
        right
    } else {
        left
    }
}

/// WebAssembly `fN.ceil`.
#[inline]
pub fn float_ceil<F: WasmFloat>(value: F) -> F {
    if value.is_nan() { value.quiet() } else { value.ceil_raw() }
}

/// WebAssembly `fN.floor`.
#[inline]
pub fn float_floor<F: WasmFloat>(value: F) -> F {
    if value.is_nan() { value.quiet() } else { value.floor_raw() }
}

/// WebAssembly `fN.trunc`.
#[inline]
pub fn float_trunc<F: WasmFloat>(value: F) -> F {
    if value.is_nan() { value.quiet() } else { value.trunc_raw() }
}

/// WebAssembly `fN.nearest`: round to nearest, ties to even.
#[inline]
pub fn float_nearest<F: WasmFloat>(value: F) -> F {
    if value.is_nan() { value.quiet() } else { value.nearest_raw() }
}

macro_rules! width_ops {
    ($float:ty, $min:ident, $max:ident, $ceil:ident, $floor:ident, $trunc:ident, $nearest:ident) => {
        #[doc = concat!("`", stringify!($float), ".min`")]
        #[inline]
        pub fn $min(left: $float, right: $float) -> $float {
            float_min(left, right)
        }

        #[doc = concat!("`", stringify!($float), ".max`")]
        #[inline]
        pub fn $max(left: $float, right: $float) -> $float {
            float_max(left, right)
        }

        #[doc = concat!("`", stringify!($float), ".ceil`")]
        #[inline]
        pub fn $ceil(value: $float) -> $float {
            float_ceil(value)
        }

        #[doc = concat!("`", stringify!($float), ".floor`")]
        #[inline]
        pub fn $floor(value: $float) -> $float {
            float_floor(value)
        }

        #[doc = concat!("`", stringify!($float), ".trunc`")]
        #[inline]
        pub fn $trunc(value: $float) -> $float {
            float_trunc(value)
        }

        #[doc = concat!("`", stringify!($float), ".nearest`")]
        #[inline]
        pub fn $nearest(value: $float) -> $float {
            float_nearest(value)
        }
    };
}

width_ops!(f32, f32_min, f32_max, f32_ceil, f32_floor, f32_trunc, f32_nearest);
width_ops!(f64, f64_min, f64_max, f64_ceil, f64_floor, f64_trunc, f64_nearest);

#[cfg(test)]
mod tests {
    use super::*;

    const NAN_A_32: u32 = 0x7f80_0001; // signalling, payload 1
    const NAN_B_32: u32 = 0xffa0_0002; // signalling, negative, payload 0x200002

    #[test]
    fn test_min_max_signed_zero() {
        assert_eq!(f32_min(0.0, -0.0).to_bits(), (-0.0f32).to_bits());
        assert_eq!(f32_min(-0.0, 0.0).to_bits(), (-0.0f32).to_bits());
        assert_eq!(f32_max(0.0, -0.0).to_bits(), 0.0f32.to_bits());
        assert_eq!(f32_max(-0.0, 0.0).to_bits(), 0.0f32.to_bits());
        assert_eq!(f64_min(0.0, -0.0).to_bits(), (-0.0f64).to_bits());
        assert_eq!(f64_max(-0.0, 0.0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_min_max_ordinary_values() {
        assert_eq!(f32_min(1.5, -2.0), -2.0);
        assert_eq!(f32_max(1.5, -2.0), 1.5);
        assert_eq!(f64_min(f64::NEG_INFINITY, 0.0), f64::NEG_INFINITY);
        assert_eq!(f64_max(f64::INFINITY, 1e300), f64::INFINITY);
        assert_eq!(f64_min(7.0, 7.0), 7.0);
    }

    #[test]
    fn test_nan_from_each_operand_is_quieted() {
        let a = f32::from_bits(NAN_A_32);
        let b = f32::from_bits(NAN_B_32);

        assert_eq!(f32_min(a, 1.0).to_bits(), 0x7fc0_0001);
        assert_eq!(f32_min(1.0, b).to_bits(), 0xffe0_0002);
        assert_eq!(f32_max(b, 1.0).to_bits(), 0xffe0_0002);
        assert_eq!(f32_max(1.0, a).to_bits(), 0x7fc0_0001);
        // Both NaN: the left operand wins.
        assert_eq!(f32_min(a, b).to_bits(), 0x7fc0_0001);
        assert_eq!(f32_max(b, a).to_bits(), 0xffe0_0002);
    }

    #[test]
    fn test_nearest_ties_to_even() {
        assert_eq!(f32_nearest(2.5), 2.0);
        assert_eq!(f32_nearest(3.5), 4.0);
        assert_eq!(f64_nearest(2.5), 2.0);
        assert_eq!(f64_nearest(3.5), 4.0);
        assert_eq!(f64_nearest(-0.5).to_bits(), (-0.0f64).to_bits());
        assert_eq!(f32_nearest(-1.5), -2.0);
        assert_eq!(f64_nearest(4_503_599_627_370_497.0), 4_503_599_627_370_497.0);
    }

    #[test]
    fn test_rounding_directions() {
        assert_eq!(f32_ceil(-1.5), -1.0);
        assert_eq!(f32_floor(-1.5), -2.0);
        assert_eq!(f32_trunc(-1.5), -1.0);
        assert_eq!(f64_ceil(1.25), 2.0);
        assert_eq!(f64_floor(1.75), 1.0);
        assert_eq!(f64_trunc(1.75), 1.0);
        assert_eq!(f64_ceil(-0.5).to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn test_rounding_nan_keeps_sign() {
        let negative_nan = f64::from_bits(0xfff0_0000_0000_0001);
        for op in [f64_ceil, f64_floor, f64_trunc, f64_nearest] {
            let result = op(negative_nan);
            assert!(result.is_nan());
            assert!(result.is_sign_negative());
            assert_eq!(result.to_bits(), 0xfff8_0000_0000_0001);
        }
        let positive_nan = f32::from_bits(NAN_A_32);
        for op in [f32_ceil, f32_floor, f32_trunc, f32_nearest] {
            assert_eq!(op(positive_nan).to_bits(), 0x7fc0_0001);
        }
    }

    #[test]
    fn test_quiet_nan_is_identity_on_numbers() {
        assert_eq!(quiet_nan(1.0f32), 1.0);
        assert_eq!(quiet_nan(-0.0f64).to_bits(), (-0.0f64).to_bits());
    }
}
