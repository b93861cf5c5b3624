// Copyright (c) 2025 Ralf Anton Beier
// SPDX-License-Identifier: MIT
// Project: WIC
// Module: wic-math

//! Floating-point semantics and trapping numeric conversions for WIC.
//!
//! Provides the bit-exact WebAssembly behavior of `min`, `max`, `ceil`,
//! `floor`, `trunc` and `nearest` for both float widths, plus the eight
//! `iNN.trunc_fMM_{s,u}` conversions that trap instead of saturating.
//!
//! ```
//! use wic_math::{f32_min, i32_trunc_f64_s};
//!
//! assert_eq!(f32_min(0.0, -0.0).to_bits(), (-0.0f32).to_bits());
//! assert!(i32_trunc_f64_s(f64::NAN).is_err());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![deny(clippy::todo, clippy::unimplemented)]
#![warn(clippy::pedantic)]
// Allow specific lints necessary for low-level math/Wasm ops, matching Cargo.toml
#![allow(clippy::float_arithmetic, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

// Import std when available
#[cfg(feature = "std")]
extern crate std;

// Modules
pub mod conversion;
pub mod float_bits;
pub mod ops;
pub mod traits;

// Re-export key types and functions for easier access
pub use conversion::{
    float_to_int, i32_trunc_f32_s, i32_trunc_f32_u, i32_trunc_f64_s, i32_trunc_f64_u,
    i64_trunc_f32_s, i64_trunc_f32_u, i64_trunc_f64_s, i64_trunc_f64_u, TruncateTo,
};
pub use float_bits::{FloatBits32, FloatBits64};
pub use ops::*;
pub use traits::WasmFloat;
