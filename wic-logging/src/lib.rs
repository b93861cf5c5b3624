// WIC - wic-logging
// Module: WIC Logging
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Debug instrumentation for the WebAssembly intrinsics core.
//!
//! This crate provides the function entry/exit tracer behind the
//! `debugEnterFunction`, `debugExitFunction` and `debugBreak` intrinsics,
//! along with the level and operation types handed to embedder log
//! handlers. All output is also emitted through `tracing`.
//!
//! ```
//! use wic_logging::{CallTracer, LogLevel};
//!
//! let mut tracer = CallTracer::new().with_level(LogLevel::Trace);
//! tracer.enter_function("fib");
//! assert_eq!(tracer.depth(), 1);
//! tracer.exit_function("fib");
//! assert_eq!(tracer.depth(), 0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)] // Rule 2
#![warn(clippy::missing_panics_doc)]
#![deny(missing_docs)]

extern crate alloc;

/// Log handler type
pub mod handler;
/// Log levels
pub mod level;
/// Log operations handed to handlers
pub mod operation;
/// Per-context call tracer
pub mod tracer;

pub use handler::LogHandler;
pub use level::{LogLevel, ParseLogLevelError};
pub use operation::LogOperation;
#[cfg(feature = "std")]
pub use tracer::with_thread_tracer;
pub use tracer::{CallTracer, BREAKPOINT_MARKER, TRACE_TARGET};
