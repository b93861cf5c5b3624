// WIC - wic-math
// Module: wic-math::traits
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The [`WasmFloat`] trait, implemented for `f32` and `f64` only.

use core::fmt::Debug;

use crate::float_bits::{FloatBits32, FloatBits64};

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A WebAssembly floating-point width.
///
/// Gives generic code the bit-level operations and the raw rounding
/// primitives it needs. NaN handling is *not* part of the rounding
/// primitives; see [`crate::ops`].
pub trait WasmFloat: Copy + PartialOrd + Debug + sealed::Sealed {
    /// Same-width unsigned integer holding the raw pattern.
    type Bits: Copy + Ord + Debug;

    /// Reinterprets the value as its raw pattern.
    fn to_bits(self) -> Self::Bits;

    /// Reinterprets a raw pattern as a value.
    fn from_bits(bits: Self::Bits) -> Self;

    /// Whether the value is a NaN.
    fn is_nan(self) -> bool;

    /// Sets the quiet bit, keeping sign and payload. Only meaningful on NaNs;
    /// non-NaN values are returned unchanged.
    fn quiet(self) -> Self;

    /// Rounds toward positive infinity.
    fn ceil_raw(self) -> Self;

    /// Rounds toward negative infinity.
    fn floor_raw(self) -> Self;

    /// Rounds toward zero.
    fn trunc_raw(self) -> Self;

    /// Rounds to the nearest integral value, ties to even.
    fn nearest_raw(self) -> Self;
}

impl WasmFloat for f32 {
    type Bits = u32;

    #[inline]
    fn to_bits(self) -> u32 {
        f32::to_bits(self)
    }

    #[inline]
    fn from_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }

    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    #[inline]
    fn quiet(self) -> Self {
        FloatBits32::from_float(self).quieted().value()
    }

    #[cfg(feature = "std")]
    #[inline]
    fn ceil_raw(self) -> Self {
        self.ceil()
    }

    #[cfg(not(feature = "std"))]
    #[inline]
    fn ceil_raw(self) -> Self {
        libm::ceilf(self)
    }

    #[cfg(feature = "std")]
    #[inline]
    fn floor_raw(self) -> Self {
        self.floor()
    }

    #[cfg(not(feature = "std"))]
    #[inline]
    fn floor_raw(self) -> Self {
        libm::floorf(self)
    }

    #[cfg(feature = "std")]
    #[inline]
    fn trunc_raw(self) -> Self {
        self.trunc()
    }

    #[cfg(not(feature = "std"))]
    #[inline]
    fn trunc_raw(self) -> Self {
        libm::truncf(self)
    }

    #[cfg(feature = "std")]
    #[inline]
    fn nearest_raw(self) -> Self {
        self.round_ties_even()
    }

    // rint honours the default rounding mode, which is ties-to-even.
    #[cfg(not(feature = "std"))]
    #[inline]
    fn nearest_raw(self) -> Self {
        libm::rintf(self)
    }
}

impl WasmFloat for f64 {
    type Bits = u64;

    #[inline]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }

    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    #[inline]
    fn quiet(self) -> Self {
        FloatBits64::from_float(self).quieted().value()
    }

    #[cfg(feature = "std")]
    #[inline]
    fn ceil_raw(self) -> Self {
        self.ceil()
    }

    #[cfg(not(feature = "std"))]
    #[inline]
    fn ceil_raw(self) -> Self {
        libm::ceil(self)
    }

    #[cfg(feature = "std")]
    #[inline]
    fn floor_raw(self) -> Self {
        self.floor()
    }

    #[cfg(not(feature = "std"))]
    #[inline]
    fn floor_raw(self) -> Self {
        libm::floor(self)
    }

    #[cfg(feature = "std")]
    #[inline]
    fn trunc_raw(self) -> Self {
        self.trunc()
    }

    #[cfg(not(feature = "std"))]
    #[inline]
    fn trunc_raw(self) -> Self {
        libm::trunc(self)
    }

    #[cfg(feature = "std")]
    #[inline]
    fn nearest_raw(self) -> Self {
        self.round_ties_even()
    }

    #[cfg(not(feature = "std"))]
    #[inline]
    fn nearest_raw(self) -> Self {
        libm::rint(self)
    }
}
