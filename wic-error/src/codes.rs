// WIC - wic-error
// Module: WIC Error Codes
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for WIC
//!
//! Codes are grouped by category. Trap codes occupy the 8600 range so that an
//! `Error` converted from a [`TrapCause`](crate::TrapCause) keeps a stable,
//! recognisable number in logs.

// Resource error codes (3000-3999)
/// Table element index out of range
pub const TABLE_INDEX_OUT_OF_BOUNDS: u16 = 3007;
/// Allocation failed error
pub const ALLOCATION_FAILED: u16 = 3009;

// Memory error codes (4000-4999)
/// Memory grow error
pub const MEMORY_GROW_ERROR: u16 = 4001;
/// Memory access out of bounds error
pub const MEMORY_ACCESS_OUT_OF_BOUNDS: u16 = 4002;

// Validation error codes (5000-5999)
/// Validation error
pub const VALIDATION_ERROR: u16 = 5000;
/// Too many value types in a function signature
pub const SIGNATURE_TOO_LARGE: u16 = 5007;

// Configuration error codes (7000-7099)
/// Invalid configuration value
pub const CONFIGURATION_ERROR: u16 = 7000;
/// Configuration value could not be parsed
pub const CONFIGURATION_PARSE_ERROR: u16 = 7001;

// System errors (8000-8099)
/// Formatting error
pub const SYSTEM_ERROR: u16 = 8001;

// Runtime trap errors (8600-8699)
/// Runtime trap error
pub const RUNTIME_TRAP_ERROR: u16 = 8601;
/// Invalid floating-point operation (NaN converted to an integer)
pub const RUNTIME_INVALID_FLOAT_OPERATION: u16 = 8602;
/// Integer division by zero or integer overflow
pub const RUNTIME_DIVIDE_BY_ZERO_OR_OVERFLOW: u16 = 8605;
/// `unreachable` executed
pub const RUNTIME_REACHED_UNREACHABLE: u16 = 8606;
/// Undefined (null or out of range) table element
pub const RUNTIME_UNDEFINED_TABLE_ELEMENT: u16 = 8607;
/// Runtime call indirect type mismatch error
pub const RUNTIME_CALL_INDIRECT_TYPE_MISMATCH_ERROR: u16 = 8610;

/// Codes representing WebAssembly runtime trap conditions.
///
/// The set is closed: every trap the intrinsics can raise maps to exactly one
/// of these causes. A cause carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum TrapCause {
    /// A NaN was converted to an integer.
    InvalidFloatOperation = RUNTIME_INVALID_FLOAT_OPERATION,
    /// Integer division by zero, or an integer result out of range. Float to
    /// integer conversion overflow reports this cause as well.
    IntegerDivideByZeroOrIntegerOverflow = RUNTIME_DIVIDE_BY_ZERO_OR_OVERFLOW,
    /// An `unreachable` instruction was executed.
    ReachedUnreachable = RUNTIME_REACHED_UNREACHABLE,
    /// Indirect call through a null table slot or an out-of-range index.
    UndefinedTableElement = RUNTIME_UNDEFINED_TABLE_ELEMENT,
    /// Indirect call whose callee type differs from the expected type.
    IndirectCallSignatureMismatch = RUNTIME_CALL_INDIRECT_TYPE_MISMATCH_ERROR,
}

impl TrapCause {
    /// All trap causes, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::InvalidFloatOperation,
        Self::IntegerDivideByZeroOrIntegerOverflow,
        Self::ReachedUnreachable,
        Self::UndefinedTableElement,
        Self::IndirectCallSignatureMismatch,
    ];

    /// Numeric error code of the cause.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Provides a default message for the trap cause.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidFloatOperation => "invalid floating-point operation",
            Self::IntegerDivideByZeroOrIntegerOverflow => {
                "integer divide by zero or integer overflow"
            },
            Self::ReachedUnreachable => "reached unreachable code",
            Self::UndefinedTableElement => "undefined table element",
            Self::IndirectCallSignatureMismatch => "indirect call signature mismatch",
        }
    }
}

impl core::fmt::Display for TrapCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<TrapCause> for crate::Error {
    fn from(cause: TrapCause) -> Self {
        Self::new(crate::ErrorCategory::RuntimeTrap, cause.code(), cause.message())
    }
}
