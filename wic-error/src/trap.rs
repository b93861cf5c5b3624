// WIC - wic-error
// Module: Trap Causation
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Trap causation.
//!
//! A trap is an abrupt, non-resumable transfer of control out of guest code.
//! It is modelled as the error half of [`TrapResult`]: the raising intrinsic
//! returns `Err(Trap)` and every frame between it and the execution boundary
//! forwards it with `?`. [`Trap`] has no public constructor besides [`raise`]
//! and exposes nothing that would let an intermediate frame turn it back into
//! a normal value.

use core::fmt;

use crate::{codes::TrapCause, Error};

/// An unwinding trap carrying its cause.
#[must_use = "a trap must be propagated to the execution boundary"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trap {
    cause: TrapCause,
}

/// Result of an operation that may trap.
pub type TrapResult<T> = core::result::Result<T, Trap>;

impl Trap {
    /// The reason execution was aborted.
    pub const fn cause(&self) -> TrapCause {
        self.cause
    }
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wasm trap: {}", self.cause)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Trap {}

impl From<Trap> for Error {
    fn from(trap: Trap) -> Self {
        Self::from(trap.cause)
    }
}

/// Raises a trap with the given cause.
///
/// Never produces `Ok`; the return type is generic so the call can sit in any
/// expression position, e.g. `return raise(TrapCause::ReachedUnreachable);`.
#[inline]
pub const fn raise<T>(cause: TrapCause) -> TrapResult<T> {
    Err(Trap { cause })
}

/// Trap point for integer division by zero.
#[inline]
pub const fn divide_by_zero_trap() -> TrapResult<()> {
    raise(TrapCause::IntegerDivideByZeroOrIntegerOverflow)
}

/// Trap point for the `unreachable` instruction.
#[inline]
pub const fn unreachable_trap() -> TrapResult<()> {
    raise(TrapCause::ReachedUnreachable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested(depth: u32) -> TrapResult<u32> {
        if depth == 0 {
            return raise(TrapCause::ReachedUnreachable);
        }
        let inner = nested(depth - 1)?;
        Ok(inner + 1)
    }

    #[test]
    fn test_raise_unwinds_through_nested_frames() {
        let result = nested(64);
        assert_eq!(
            result.map_err(|trap| trap.cause()),
            Err(TrapCause::ReachedUnreachable)
        );
    }

    #[test]
    fn test_trap_points() {
        assert_eq!(
            divide_by_zero_trap().unwrap_err().cause(),
            TrapCause::IntegerDivideByZeroOrIntegerOverflow
        );
        assert_eq!(
            unreachable_trap().unwrap_err().cause(),
            TrapCause::ReachedUnreachable
        );
    }

    #[test]
    fn test_trap_converts_to_runtime_trap_error() {
        let error = Error::from(raise::<()>(TrapCause::UndefinedTableElement).unwrap_err());
        assert_eq!(error.code, crate::codes::RUNTIME_UNDEFINED_TABLE_ELEMENT);
        assert_eq!(error.message, "undefined table element");
    }
}
