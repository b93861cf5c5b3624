// WIC - wic-runtime
// Module: Intrinsics
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The operations compiled guest code calls into.
//!
//! Pure numeric intrinsics live in `wic-math` and the trap points in
//! `wic-error`; they need no state. The intrinsics here either read tables
//! and memories owned by the embedder or need per-context state, which
//! [`IntrinsicContext`] carries.

pub mod indirect;
pub mod memory;
pub mod registry;

use alloc::boxed::Box;
use core::fmt;

use wic_error::{Result, TrapResult};
use wic_logging::CallTracer;

use self::indirect::{CalleeResolver, MismatchDiagnostics};
use crate::{
    config::IntrinsicsConfig,
    memory::LinearMemory,
    table::{CalleeAddr, Table, TableElement},
    types::FuncType,
};

/// Module name every intrinsic is exported under.
pub const INTRINSICS_MODULE: &str = "wicIntrinsics";

/// State of the context-bound intrinsics for one execution context.
pub struct IntrinsicContext {
    config:   IntrinsicsConfig,
    tracer:   CallTracer,
    resolver: Option<Box<dyn CalleeResolver + Send + Sync>>,
}

impl fmt::Debug for IntrinsicContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntrinsicContext")
            .field("config", &self.config)
            .field("tracer", &self.tracer)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

impl IntrinsicContext {
    /// Creates a context after validating `config`.
    pub fn new(config: IntrinsicsConfig) -> Result<Self> {
        config.validate()?;
        let tracer = CallTracer::new().with_level(config.trace_level);
        Ok(Self { config, tracer, resolver: None })
    }

    /// Installs the callee resolver used by signature-mismatch diagnostics.
    #[must_use]
    pub fn with_resolver<R>(mut self, resolver: R) -> Self
    where
        R: CalleeResolver + Send + Sync + 'static,
    {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &IntrinsicsConfig {
        &self.config
    }

    /// The call tracer, e.g. to register a log handler.
    pub fn tracer_mut(&mut self) -> &mut CallTracer {
        &mut self.tracer
    }

    fn diagnostics(&self) -> MismatchDiagnostics<'_> {
        MismatchDiagnostics {
            enabled:  self.config.log_signature_mismatch,
            resolver: self.resolver.as_deref().map(|r| r as &dyn CalleeResolver),
        }
    }

    /// `call_indirect` through `table` at `index`.
    pub fn call_indirect(
        &self,
        table: &Table,
        index: u32,
        expected: &FuncType,
    ) -> TrapResult<CalleeAddr> {
        indirect::call_indirect(table, index, expected, self.diagnostics())
    }

    /// The `indirectCallSignatureMismatch` intrinsic. Always traps.
    pub fn indirect_call_signature_mismatch(
        &self,
        index: u32,
        element: &TableElement,
        expected: &FuncType,
    ) -> TrapResult<()> {
        indirect::indirect_call_signature_mismatch(index, element, expected, self.diagnostics())
    }

    /// The `growMemory` intrinsic, capped at the configured page ceiling.
    pub fn grow_memory<M: LinearMemory + ?Sized>(&self, memory: &mut M, delta_pages: i32) -> i32 {
        memory::grow_memory_within(memory, delta_pages, self.config.page_ceiling)
    }

    /// The `currentMemory` intrinsic.
    pub fn current_memory<M: LinearMemory + ?Sized>(&self, memory: &M) -> i32 {
        memory::current_memory(memory)
    }

    /// The `debugEnterFunction` intrinsic; a no-op unless call tracing is on.
    pub fn debug_enter_function(&mut self, function: &str) {
        if self.config.trace_calls {
            self.tracer.enter_function(function);
        }
    }

    /// The `debugExitFunction` intrinsic; a no-op unless call tracing is on.
    pub fn debug_exit_function(&mut self, function: &str) {
        if self.config.trace_calls {
            self.tracer.exit_function(function);
        }
    }

    /// The `debugBreak` intrinsic; a no-op unless call tracing is on.
    pub fn debug_break(&mut self) {
        if self.config.trace_calls {
            self.tracer.breakpoint();
        }
    }
}
