// WIC - wic
// Module: WIC facade
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly Intrinsics Core (WIC)
//!
//! The operations compiled WebAssembly code calls into where the host CPU
//! does not behave exactly as WebAssembly requires:
//!
//! - trap causation ([`error`])
//! - `min`/`max`/`ceil`/`floor`/`trunc`/`nearest` with NaN quieting and
//!   signed-zero tie breaking ([`math`])
//! - float to integer conversion that traps on NaN and overflow ([`math`])
//! - indirect call validation and memory growth ([`runtime`])
//! - function entry/exit tracing ([`logging`])
//!
//! WIC is usable in both std and `no_std` (with `alloc`) environments.
//!
//! ```
//! use wic::prelude::*;
//!
//! let mut boundary = ExecutionBoundary::new();
//! let trap = boundary
//!     .invoke("convert", || i32_trunc_f32_s(f32::NAN))
//!     .unwrap_err();
//! assert_eq!(trap.cause(), TrapCause::InvalidFloatOperation);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

pub use wic_error as error;
pub use wic_logging as logging;
pub use wic_math as math;
pub use wic_runtime as runtime;

pub mod prelude;

/// Version of the WIC crates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
