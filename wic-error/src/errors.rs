// WIC - wic-error
// Module: WIC Error Types
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error and category types shared by every WIC crate.

use core::fmt;

use crate::codes;

/// `Error` categories for WIC operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Resource errors (tables, allocations)
    Resource      = 3,
    /// Memory errors
    Memory        = 4,
    /// Validation errors
    Validation    = 5,
    /// Runtime errors (general)
    Runtime       = 7,
    /// System errors
    System        = 8,
    /// WebAssembly trap errors (specific runtime errors defined by Wasm spec)
    RuntimeTrap   = 13,
    /// Configuration errors
    Configuration = 21,
}

/// Base trait for all error types
pub trait ErrorSource: fmt::Debug + Send + Sync {
    /// Get the error code
    fn code(&self) -> u16;

    /// Get the error message
    fn message(&self) -> &'static str;

    /// Get the error category
    fn category(&self) -> ErrorCategory;
}

/// WIC `Error` type
///
/// Errors are plain values: a category, a numeric code and a static message.
/// They never allocate, so they can be produced on the hot path of an
/// intrinsic and in `no_std` builds alike.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code:     u16,
    /// `Error` message
    pub message:  &'static str,
}

impl Error {
    /// Memory grow failed because the backing could not be extended
    pub const ALLOCATION_FAILED: Self = Self::new(
        ErrorCategory::Resource,
        codes::ALLOCATION_FAILED,
        "Failed to allocate linear memory pages",
    );

    /// Create a new error.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message,
        }
    }

    /// Create a memory out-of-bounds error
    #[must_use]
    pub const fn memory_out_of_bounds(message: &'static str) -> Self {
        Self::new(
            ErrorCategory::Memory,
            codes::MEMORY_ACCESS_OUT_OF_BOUNDS,
            message,
        )
    }

    /// Create a memory grow error
    #[must_use]
    pub const fn memory_grow_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Memory, codes::MEMORY_GROW_ERROR, message)
    }

    /// Create a table index out-of-bounds error
    #[must_use]
    pub const fn table_out_of_bounds(message: &'static str) -> Self {
        Self::new(
            ErrorCategory::Resource,
            codes::TABLE_INDEX_OUT_OF_BOUNDS,
            message,
        )
    }

    /// Create a validation error
    #[must_use]
    pub const fn validation_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Validation, codes::VALIDATION_ERROR, message)
    }

    /// Create a configuration error
    #[must_use]
    pub const fn configuration_error(message: &'static str) -> Self {
        Self::new(
            ErrorCategory::Configuration,
            codes::CONFIGURATION_ERROR,
            message,
        )
    }

    /// Create a configuration parse error
    #[must_use]
    pub const fn configuration_parse_error(message: &'static str) -> Self {
        Self::new(
            ErrorCategory::Configuration,
            codes::CONFIGURATION_PARSE_ERROR,
            message,
        )
    }

    /// Create a runtime trap error
    #[must_use]
    pub const fn runtime_trap_error(message: &'static str) -> Self {
        Self::new(
            ErrorCategory::RuntimeTrap,
            codes::RUNTIME_TRAP_ERROR,
            message,
        )
    }

    /// Whether this error describes a WebAssembly trap.
    #[must_use]
    pub const fn is_trap(&self) -> bool {
        matches!(self.category, ErrorCategory::RuntimeTrap)
    }

    /// Recovers the trap cause of an error converted from a trap.
    #[must_use]
    pub fn trap_cause(&self) -> Option<codes::TrapCause> {
        if !self.is_trap() {
            return None;
        }
        codes::TrapCause::ALL
            .into_iter()
            .find(|cause| cause.code() == self.code)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}][E{:04X}] {}",
            self.category, self.code, self.message
        )
    }
}

impl ErrorSource for Error {
    fn code(&self) -> u16 {
        self.code
    }

    fn message(&self) -> &'static str {
        self.message
    }

    fn category(&self) -> ErrorCategory {
        self.category
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Self::new(
            ErrorCategory::System,
            codes::SYSTEM_ERROR,
            "Formatting error (static)",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrapCause;

    #[test]
    fn test_display_format() {
        let error = Error::memory_out_of_bounds("read past end");
        #[cfg(feature = "std")]
        assert_eq!(error.to_string(), "[Memory][E0FA2] read past end");
        assert_eq!(error.code, codes::MEMORY_ACCESS_OUT_OF_BOUNDS);
    }

    #[test]
    fn test_trap_cause_round_trip_through_error() {
        for cause in TrapCause::ALL {
            let error = Error::from(cause);
            assert!(error.is_trap());
            assert_eq!(error.trap_cause(), Some(cause));
        }
    }

    #[test]
    fn test_non_trap_has_no_cause() {
        let error = Error::configuration_error("bad ceiling");
        assert!(!error.is_trap());
        assert_eq!(error.trap_cause(), None);
    }

    #[test]
    fn test_generic_trap_error_has_no_specific_cause() {
        let error = Error::runtime_trap_error("host trap");
        assert!(error.is_trap());
        assert_eq!(error.trap_cause(), None);
    }
}
