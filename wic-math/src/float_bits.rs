// WIC - wic-math
// Module: Float Bit Patterns
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Bit-level views of `f32` and `f64`.
//!
//! [`FloatBits32`] and [`FloatBits64`] hold the raw IEEE-754 pattern of a
//! float as a same-width unsigned integer. They give equality, ordering and
//! hashing on the pattern itself (so `+0.0 != -0.0` and a NaN equals itself)
//! and split the pattern into sign, exponent and significand fields. The
//! reinterpretation goes through `to_bits`/`from_bits`, never through
//! overlapping storage.

use core::hash::{Hash, Hasher};

macro_rules! float_bits {
    (
        $(#[$meta:meta])*
        $name:ident, $float:ty, $bits:ty,
        significand_bits: $sig:expr,
        exponent_bits: $exp:expr,
        canonical_nan: $nan:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
        #[repr(transparent)]
        pub struct $name(pub $bits);

        impl $name {
            /// Number of explicit significand bits.
            pub const SIGNIFICAND_BITS: u32 = $sig;
            /// Number of exponent bits.
            pub const EXPONENT_BITS: u32 = $exp;
            /// Mask selecting the sign bit.
            pub const SIGN_MASK: $bits = 1 << (Self::SIGNIFICAND_BITS + Self::EXPONENT_BITS);
            /// Mask selecting the exponent field.
            pub const EXPONENT_MASK: $bits =
                ((1 << Self::EXPONENT_BITS) - 1) << Self::SIGNIFICAND_BITS;
            /// Mask selecting the significand field.
            pub const SIGNIFICAND_MASK: $bits = (1 << Self::SIGNIFICAND_BITS) - 1;
            /// Most significant significand bit; set on every quiet NaN.
            pub const QUIET_BIT: $bits = 1 << (Self::SIGNIFICAND_BITS - 1);
            /// Canonical Not-a-Number pattern: positive sign, exponent all
            /// ones, only the quiet bit set in the significand.
            pub const NAN: Self = Self($nan);

            /// Creates the view from a float value.
            #[must_use]
            pub fn from_float(val: $float) -> Self {
                Self(val.to_bits())
            }

            /// Returns the float value represented by this pattern.
            #[must_use]
            pub fn value(self) -> $float {
                <$float>::from_bits(self.0)
            }

            /// Returns the underlying bits.
            #[must_use]
            pub const fn to_bits(self) -> $bits {
                self.0
            }

            /// Creates the view from raw bits.
            #[must_use]
            pub const fn from_bits(bits: $bits) -> Self {
                Self(bits)
            }

            /// Sign bit: `true` for negative values, including `-0.0` and
            /// NaNs with the sign bit set.
            #[must_use]
            pub const fn sign(self) -> bool {
                self.0 & Self::SIGN_MASK != 0
            }

            /// Biased exponent field.
            #[must_use]
            pub const fn exponent(self) -> $bits {
                (self.0 & Self::EXPONENT_MASK) >> Self::SIGNIFICAND_BITS
            }

            /// Significand field without the implicit leading bit.
            #[must_use]
            pub const fn significand(self) -> $bits {
                self.0 & Self::SIGNIFICAND_MASK
            }

            /// Whether the pattern encodes a NaN (quiet or signalling).
            #[must_use]
            pub const fn is_nan(self) -> bool {
                self.0 & Self::EXPONENT_MASK == Self::EXPONENT_MASK && self.significand() != 0
            }

            /// Whether the pattern encodes a quiet NaN.
            #[must_use]
            pub const fn is_quiet_nan(self) -> bool {
                self.is_nan() && self.0 & Self::QUIET_BIT != 0
            }

            /// Forces the quiet bit on a NaN, keeping sign and payload.
            ///
            /// Non-NaN patterns are returned unchanged.
            #[must_use]
            pub const fn quieted(self) -> Self {
                if self.is_nan() {
                    Self(self.0 | Self::QUIET_BIT)
                } else {
                    self
                }
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl From<$float> for $name {
            fn from(val: $float) -> Self {
                Self::from_float(val)
            }
        }

        impl From<$name> for $float {
            fn from(bits: $name) -> Self {
                bits.value()
            }
        }
    };
}

float_bits! {
    /// Wrapper for f32 that implements Hash, `PartialEq`, and Eq based on bit
    /// patterns.
    FloatBits32, f32, u32,
    significand_bits: 23,
    exponent_bits: 8,
    canonical_nan: 0x7fc0_0000
}

float_bits! {
    /// Wrapper for f64 that implements Hash, `PartialEq`, and Eq based on bit
    /// patterns.
    FloatBits64, f64, u64,
    significand_bits: 52,
    exponent_bits: 11,
    canonical_nan: 0x7ff8_0000_0000_0000
}
