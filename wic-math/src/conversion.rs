// WIC - wic-math
// Module: Trapping Numeric Conversion
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Float to integer conversion that traps instead of saturating.
//!
//! A NaN source raises [`TrapCause::InvalidFloatOperation`]. A source outside
//! the destination's range raises
//! [`TrapCause::IntegerDivideByZeroOrIntegerOverflow`], the same cause as an
//! integer overflow. In-range values are truncated toward zero.
//!
//! The bounds are the exact float edges of each (destination, source) pair.
//! The upper bound is always exclusive. The lower bound is exclusive when it
//! is itself a valid result (`-2^31` and `-2^63` are representable in both
//! widths) and inclusive when it is the first float below the range, as for
//! `-1.0` with unsigned destinations or `-2147483649.0` for `f64 -> i32`.

use wic_error::{raise, TrapCause, TrapResult};

use crate::traits::WasmFloat;

/// Truncating `as` conversion, only used on values already known in range.
pub trait TruncateTo<D>: WasmFloat {
    /// Truncates toward zero.
    fn truncate(self) -> D;
}

macro_rules! truncate_to {
    ($($src:ty => $($dst:ty),+);+ $(;)?) => {
        $($(
            impl TruncateTo<$dst> for $src {
                #[inline]
                fn truncate(self) -> $dst {
                    self as $dst
                }
            }
        )+)+
    };
}

truncate_to! {
    f32 => i32, u32, i64, u64;
    f64 => i32, u32, i64, u64;
}

/// Converts `value` to `D`, trapping on NaN or out-of-range input.
///
/// `max` is exclusive. `min` traps on equality only when `MIN_INCLUSIVE` is
/// set.
///
/// # Errors
///
/// Traps with [`TrapCause::InvalidFloatOperation`] for NaN and with
/// [`TrapCause::IntegerDivideByZeroOrIntegerOverflow`] when out of range.
#[inline]
pub fn float_to_int<D, S, const MIN_INCLUSIVE: bool>(value: S, min: S, max: S) -> TrapResult<D>
where
    S: TruncateTo<D>,
{
    if value.is_nan() {
        return raise(TrapCause::InvalidFloatOperation);
    }
    let below = if MIN_INCLUSIVE { value <= min } else { value < min };
    if below || value >= max {
        return raise(TrapCause::IntegerDivideByZeroOrIntegerOverflow);
    }
    Ok(value.truncate())
}

const TWO_POW_31: f64 = 2_147_483_648.0;
const TWO_POW_32: f64 = 4_294_967_296.0;
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// `i32.trunc_f32_s`
///
/// # Errors
///
/// See [`float_to_int`].
#[inline]
pub fn i32_trunc_f32_s(value: f32) -> TrapResult<i32> {
    float_to_int::<i32, f32, false>(value, -(TWO_POW_31 as f32), TWO_POW_31 as f32)
}

/// `i32.trunc_f64_s`
///
/// # Errors
///
/// See [`float_to_int`].
#[inline]
pub fn i32_trunc_f64_s(value: f64) -> TrapResult<i32> {
    float_to_int::<i32, f64, true>(value, -TWO_POW_31 - 1.0, TWO_POW_31)
}

/// `i64.trunc_f32_s`
///
/// # Errors
///
/// See [`float_to_int`].
#[inline]
pub fn i64_trunc_f32_s(value: f32) -> TrapResult<i64> {
    float_to_int::<i64, f32, false>(value, -(TWO_POW_63 as f32), TWO_POW_63 as f32)
}

/// `i64.trunc_f64_s`
///
/// # Errors
///
/// See [`float_to_int`].
#[inline]
pub fn i64_trunc_f64_s(value: f64) -> TrapResult<i64> {
    float_to_int::<i64, f64, false>(value, -TWO_POW_63, TWO_POW_63)
}

/// `i32.trunc_f32_u`
///
/// # Errors
///
/// See [`float_to_int`].
#[inline]
pub fn i32_trunc_f32_u(value: f32) -> TrapResult<u32> {
    float_to_int::<u32, f32, true>(value, -1.0, TWO_POW_32 as f32)
}

/// `i32.trunc_f64_u`
///
/// # Errors
///
/// See [`float_to_int`].
#[inline]
pub fn i32_trunc_f64_u(value: f64) -> TrapResult<u32> {
    float_to_int::<u32, f64, true>(value, -1.0, TWO_POW_32)
}

/// `i64.trunc_f32_u`
///
/// # Errors
///
/// See [`float_to_int`].
#[inline]
pub fn i64_trunc_f32_u(value: f32) -> TrapResult<u64> {
    float_to_int::<u64, f32, true>(value, -1.0, TWO_POW_64 as f32)
}

/// `i64.trunc_f64_u`
///
/// # Errors
///
/// See [`float_to_int`].
#[inline]
pub fn i64_trunc_f64_u(value: f64) -> TrapResult<u64> {
    float_to_int::<u64, f64, true>(value, -1.0, TWO_POW_64)
}
