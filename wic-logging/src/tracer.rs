// WIC - wic-logging
// Module: Debug call tracing
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Function entry/exit tracing for compiled guest code.
//!
//! A [`CallTracer`] belongs to one execution context and owns its nesting
//! depth, so no process-wide counter exists. Each line goes to `tracing`
//! under the `wic::debug` target and, when one is registered, to a
//! [`LogHandler`]. Tracing never influences execution.

use alloc::{format, string::String};
use core::fmt;

use crate::{handler::LogHandler, level::LogLevel, operation::LogOperation};

/// `tracing` target of every line the tracer produces.
pub const TRACE_TARGET: &str = "wic::debug";

/// Text logged by [`CallTracer::breakpoint`].
pub const BREAKPOINT_MARKER: &str = "================== wicIntrinsics.debugBreak";

/// Spaces of indentation per nesting level.
const INDENT_WIDTH: usize = 2;

/// Per-context call tracer.
pub struct CallTracer {
    depth: usize,
    level: LogLevel,
    handler: Option<LogHandler>,
}

impl fmt::Debug for CallTracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallTracer")
            .field("depth", &self.depth)
            .field("level", &self.level)
            .field("has_log_handler", &self.handler.is_some())
            .finish()
    }
}

impl Default for CallTracer {
    fn default() -> Self {
        Self::new()
    }
}

impl CallTracer {
    /// A tracer at depth zero logging at debug level, without a handler.
    #[must_use]
    pub const fn new() -> Self {
        Self { depth: 0, level: LogLevel::Debug, handler: None }
    }

    /// Uses `level` for every line instead of debug.
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Register a log handler, replacing any previous one
    pub fn register_log_handler<F>(&mut self, handler: F)
    where
        F: Fn(LogOperation) + Send + Sync + 'static,
    {
        self.handler = Some(alloc::boxed::Box::new(handler));
    }

    /// Check if a log handler is registered
    #[must_use]
    pub fn has_log_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Logs `ENTER: name` at the current depth, then nests one level.
    pub fn enter_function(&mut self, name: &str) {
        self.emit(format!("ENTER: {name}"));
        self.depth = self.depth.saturating_add(1);
    }

    /// Leaves one level, then logs `EXIT:  name`.
    ///
    /// An exit without a matching enter stays at depth zero.
    pub fn exit_function(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.emit(format!("EXIT:  {name}"));
    }

    /// Logs the breakpoint marker.
    pub fn breakpoint(&mut self) {
        self.emit(String::from(BREAKPOINT_MARKER));
    }

    /// Returns to depth zero, e.g. after a trap unwound traced frames.
    pub fn reset(&mut self) {
        self.depth = 0;
    }

    fn emit(&self, line: String) {
        let depth = self.depth;
        let message = format!("{:indent$}{line}", "", indent = depth * INDENT_WIDTH);
        match self.level {
            LogLevel::Trace => tracing::trace!(target: TRACE_TARGET, depth, "{message}"),
            LogLevel::Debug => tracing::debug!(target: TRACE_TARGET, depth, "{message}"),
            LogLevel::Info => tracing::info!(target: TRACE_TARGET, depth, "{message}"),
            LogLevel::Warn => tracing::warn!(target: TRACE_TARGET, depth, "{message}"),
            LogLevel::Error | LogLevel::Critical => {
                tracing::error!(target: TRACE_TARGET, depth, "{message}");
            }
        }
        if let Some(handler) = &self.handler {
            handler(LogOperation::new(self.level, message, depth));
        }
    }
}

#[cfg(feature = "std")]
std::thread_local! {
    static THREAD_TRACER: core::cell::RefCell<CallTracer> =
        const { core::cell::RefCell::new(CallTracer::new()) };
}

/// Runs `f` with the calling thread's tracer.
///
/// For call sites that have no explicit execution context. Returns `None`
/// when called re-entrantly from within `f` or from a handler it triggers.
#[cfg(feature = "std")]
pub fn with_thread_tracer<R>(f: impl FnOnce(&mut CallTracer) -> R) -> Option<R> {
    THREAD_TRACER.with(|tracer| tracer.try_borrow_mut().ok().map(|mut tracer| f(&mut tracer)))
}
