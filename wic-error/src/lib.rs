// WIC - wic-error
// Module: WIC Error Handling
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WIC Error handling library
//!
//! This library provides the error and trap types used by the WebAssembly
//! intrinsics core.
//!
//! # Errors and traps
//!
//! Two failure channels exist and are kept apart on purpose:
//!
//! - [`Error`] describes recoverable, host-visible failures (bad
//!   configuration, out-of-bounds host access to memory, allocation failure).
//! - [`Trap`] aborts the current guest execution. It is raised with [`raise`]
//!   and travels with `?` to the execution boundary, where it may be turned
//!   into an [`Error`] of category [`ErrorCategory::RuntimeTrap`].
//!
//! # Usage
//!
//! ```
//! use wic_error::{raise, Error, ErrorCategory, TrapCause, TrapResult};
//!
//! fn checked_div(a: i32, b: i32) -> TrapResult<i32> {
//!     if b == 0 {
//!         return raise(TrapCause::IntegerDivideByZeroOrIntegerOverflow);
//!     }
//!     Ok(a / b)
//! }
//!
//! let trap = checked_div(1, 0).unwrap_err();
//! let error = Error::from(trap);
//! assert_eq!(error.category, ErrorCategory::RuntimeTrap);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)] // Rule 2
#![deny(clippy::all)]
#![deny(clippy::perf)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

// Standard library support
#[cfg(feature = "std")]
extern crate std;

/// Error codes for wic
pub mod codes;
/// Error and error handling types
pub mod errors;
/// Trap causation
pub mod trap;

// Re-export key types
pub use codes::TrapCause;
pub use errors::{Error, ErrorCategory, ErrorSource};
pub use trap::{divide_by_zero_trap, raise, unreachable_trap, Trap, TrapResult};

/// A specialized `Result` type for WIC operations.
pub type Result<T> = core::result::Result<T, Error>;
