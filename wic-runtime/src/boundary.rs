// WIC - wic-runtime
// Module: Execution boundary
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The point where a trap stops unwinding.
//!
//! Guest code and the intrinsics return [`TrapResult`] and forward traps
//! with `?`. The embedder enters guest code through
//! [`ExecutionBoundary::invoke`], the only place a trap is observed.

use wic_error::{Trap, TrapCause, TrapResult};

/// A caller-established boundary for one execution context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionBoundary {
    last_trap: Option<TrapCause>,
    trap_count: u64,
}

impl ExecutionBoundary {
    /// A boundary that has not seen a trap.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_trap: None, trap_count: 0 }
    }

    /// Runs guest code and stops any trap it raises.
    ///
    /// `function` names the entry point in the log event.
    pub fn invoke<T, F>(&mut self, function: &str, body: F) -> Result<T, Trap>
    where
        F: FnOnce() -> TrapResult<T>,
    {
        let _span = tracing::debug_span!("invoke", function).entered();
        body().inspect_err(|trap| {
            let cause = trap.cause();
            self.last_trap = Some(cause);
            self.trap_count = self.trap_count.saturating_add(1);
            tracing::warn!(function, %cause, code = cause.code(), "wasm trap");
        })
    }

    /// Cause of the most recent trap stopped here.
    #[must_use]
    pub const fn last_trap(&self) -> Option<TrapCause> {
        self.last_trap
    }

    /// Number of traps stopped here.
    #[must_use]
    pub const fn trap_count(&self) -> u64 {
        self.trap_count
    }
}

#[cfg(test)]
mod tests {
    use wic_error::{raise, unreachable_trap};

    use super::*;

    fn leaf(n: i32) -> TrapResult<i32> {
        if n < 0 {
            unreachable_trap()?;
        }
        Ok(n * 2)
    }

    fn middle(n: i32) -> TrapResult<i32> {
        let doubled = leaf(n)?;
        Ok(doubled + 1)
    }

    #[test]
    fn test_success_passes_through() {
        let mut boundary = ExecutionBoundary::new();
        assert_eq!(boundary.invoke("middle", || middle(4)), Ok(9));
        assert_eq!(boundary.last_trap(), None);
        assert_eq!(boundary.trap_count(), 0);
    }

    #[test]
    fn test_trap_is_recorded() {
        let mut boundary = ExecutionBoundary::new();
        let trap = boundary.invoke("middle", || middle(-1)).unwrap_err();
        assert_eq!(trap.cause(), TrapCause::ReachedUnreachable);
        assert_eq!(boundary.last_trap(), Some(TrapCause::ReachedUnreachable));

        let _ = boundary.invoke("f", || raise::<()>(TrapCause::UndefinedTableElement));
        assert_eq!(boundary.last_trap(), Some(TrapCause::UndefinedTableElement));
        assert_eq!(boundary.trap_count(), 2);
    }
}
