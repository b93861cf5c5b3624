// WIC - wic-runtime
// Module: Indirect call validation
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! `call_indirect` checks.
//!
//! A call through a table proceeds only when the slot holds a callee whose
//! recorded type equals the call site's expected type. An unfilled slot
//! traps with [`TrapCause::UndefinedTableElement`], a type mismatch with
//! [`TrapCause::IndirectCallSignatureMismatch`].
//!
//! On the mismatch path a diagnostic naming both types and the callee may be
//! emitted. Producing it can never change which trap is raised.

use alloc::string::String;

use wic_error::{raise, TrapCause, TrapResult};

use crate::{
    table::{CalleeAddr, Table, TableElement},
    types::FuncType,
};

/// Describes a callee for diagnostics, e.g. by looking up a symbol name.
pub trait CalleeResolver {
    /// A human-readable description of `callee`, or `None` if unknown.
    fn describe(&self, callee: CalleeAddr) -> Option<String>;
}

impl<F> CalleeResolver for F
where
    F: Fn(CalleeAddr) -> Option<String>,
{
    fn describe(&self, callee: CalleeAddr) -> Option<String> {
        self(callee)
    }
}

/// Description used when a callee cannot be resolved.
pub const UNKNOWN_CALLEE: &str = "<unknown>";

/// How the mismatch diagnostic is produced.
#[derive(Clone, Copy, Default)]
pub struct MismatchDiagnostics<'a> {
    /// Whether to emit the diagnostic at all
    pub enabled: bool,
    /// Optional callee description source
    pub resolver: Option<&'a dyn CalleeResolver>,
}

impl core::fmt::Debug for MismatchDiagnostics<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MismatchDiagnostics")
            .field("enabled", &self.enabled)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

impl MismatchDiagnostics<'_> {
    /// No diagnostic output.
    pub const DISABLED: Self = Self { enabled: false, resolver: None };
}

/// Checks `element` against the call site's `expected` type.
///
/// Returns the callee to call on success.
pub fn validate_indirect_call(element: &TableElement, expected: &FuncType) -> TrapResult<CalleeAddr> {
    let Some(callee) = element.callee() else {
        return raise(TrapCause::UndefinedTableElement);
    };
    match element.func_type() {
        Some(actual) if actual.matches(expected) => Ok(callee),
        _ => raise(TrapCause::IndirectCallSignatureMismatch),
    }
}

/// Slow path taken once a compiled call site has found a mismatch.
///
/// Always traps: with [`TrapCause::UndefinedTableElement`] when the slot has
/// no callee, otherwise with [`TrapCause::IndirectCallSignatureMismatch`].
pub fn indirect_call_signature_mismatch<T>(
    index: u32,
    element: &TableElement,
    expected: &FuncType,
    diagnostics: MismatchDiagnostics<'_>,
) -> TrapResult<T> {
    if diagnostics.enabled {
        log_mismatch(index, element, expected, diagnostics.resolver);
    }
    if element.callee().is_none() {
        raise(TrapCause::UndefinedTableElement)
    } else {
        raise(TrapCause::IndirectCallSignatureMismatch)
    }
}

/// Trap point for an index that is past the end of the table.
#[inline]
pub const fn indirect_call_index_out_of_bounds<T>() -> TrapResult<T> {
    raise(TrapCause::UndefinedTableElement)
}

/// Full `call_indirect` check: index, then slot, then type.
pub fn call_indirect(
    table: &Table,
    index: u32,
    expected: &FuncType,
    diagnostics: MismatchDiagnostics<'_>,
) -> TrapResult<CalleeAddr> {
    let Some(element) = table.get(index) else {
        return indirect_call_index_out_of_bounds();
    };
    validate_indirect_call(element, expected)
        .or_else(|_| indirect_call_signature_mismatch(index, element, expected, diagnostics))
}

fn log_mismatch(
    index: u32,
    element: &TableElement,
    expected: &FuncType,
    resolver: Option<&dyn CalleeResolver>,
) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    let description = element
        .callee()
        .and_then(|callee| resolver.and_then(|r| r.describe(callee)));
    let description = description.as_deref().unwrap_or(UNKNOWN_CALLEE);
    match element.func_type() {
        Some(actual) => tracing::debug!(
            index,
            "call_indirect signature mismatch: expected {expected} at index {index} but got \
             {actual} ({description})"
        ),
        None => tracing::debug!(
            index,
            "call_indirect signature mismatch: expected {expected} at index {index} but got \
             nullptr ({description})"
        ),
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, sync::Arc};

    use super::*;
    use crate::types::ValueType;

    fn i32_to_i32() -> Arc<FuncType> {
        Arc::new(FuncType::new([ValueType::I32], [ValueType::I32]).unwrap())
    }

    fn callee() -> CalleeAddr {
        CalleeAddr::new(0x1000).unwrap()
    }

    #[test]
    fn test_matching_type_proceeds() {
        let element = TableElement::new(callee(), i32_to_i32());
        assert_eq!(validate_indirect_call(&element, &i32_to_i32()), Ok(callee()));

        let empty = Arc::new(FuncType::default());
        let element = TableElement::new(callee(), Arc::clone(&empty));
        assert_eq!(validate_indirect_call(&element, &FuncType::default()), Ok(callee()));
    }

    #[test]
    fn test_null_callee_traps_undefined_regardless_of_type() {
        let with_type = TableElement::from_parts(None, Some(i32_to_i32()));
        for element in [TableElement::EMPTY, with_type] {
            for expected in [FuncType::default(), (*i32_to_i32()).clone()] {
                let trap = validate_indirect_call(&element, &expected).unwrap_err();
                assert_eq!(trap.cause(), TrapCause::UndefinedTableElement);
                let trap = indirect_call_signature_mismatch::<()>(
                    0,
                    &element,
                    &expected,
                    MismatchDiagnostics::DISABLED,
                )
                .unwrap_err();
                assert_eq!(trap.cause(), TrapCause::UndefinedTableElement);
            }
        }
    }

    #[test]
    fn test_one_kind_difference_is_a_mismatch() {
        let element = TableElement::new(callee(), i32_to_i32());
        let variants = [
            FuncType::new([ValueType::I64], [ValueType::I32]).unwrap(),
            FuncType::new([ValueType::I32], [ValueType::I64]).unwrap(),
            FuncType::new([ValueType::I32, ValueType::I32], [ValueType::I32]).unwrap(),
            FuncType::new([ValueType::I32], []).unwrap(),
        ];
        for expected in variants {
            let trap = validate_indirect_call(&element, &expected).unwrap_err();
            assert_eq!(trap.cause(), TrapCause::IndirectCallSignatureMismatch);
        }
    }

    #[test]
    fn test_callee_without_type_is_a_mismatch() {
        let element = TableElement::from_parts(Some(callee()), None);
        let trap = validate_indirect_call(&element, &FuncType::default()).unwrap_err();
        assert_eq!(trap.cause(), TrapCause::IndirectCallSignatureMismatch);
    }

    #[test]
    fn test_resolver_never_changes_the_decision() {
        let element = TableElement::new(callee(), i32_to_i32());
        let expected = FuncType::default();
        let failing = |_: CalleeAddr| -> Option<String> { None };
        let naming = |addr: CalleeAddr| Some(format!("func@{addr}"));
        let resolvers: [Option<&dyn CalleeResolver>; 3] = [None, Some(&failing), Some(&naming)];
        for resolver in resolvers {
            let diagnostics = MismatchDiagnostics { enabled: true, resolver };
            let trap = indirect_call_signature_mismatch::<()>(3, &element, &expected, diagnostics)
                .unwrap_err();
            assert_eq!(trap.cause(), TrapCause::IndirectCallSignatureMismatch);
        }
    }

    #[test]
    fn test_call_indirect_checks_index_first() {
        let mut table = Table::new(2);
        table.set(0, TableElement::new(callee(), i32_to_i32())).unwrap();
        let expected = i32_to_i32();

        assert_eq!(call_indirect(&table, 0, &expected, MismatchDiagnostics::DISABLED), Ok(callee()));
        assert_eq!(
            call_indirect(&table, 1, &expected, MismatchDiagnostics::DISABLED).unwrap_err().cause(),
            TrapCause::UndefinedTableElement
        );
        assert_eq!(
            call_indirect(&table, 2, &expected, MismatchDiagnostics::DISABLED).unwrap_err().cause(),
            TrapCause::UndefinedTableElement
        );
        assert_eq!(
            call_indirect(&table, 0, &FuncType::default(), MismatchDiagnostics::DISABLED)
                .unwrap_err()
                .cause(),
            TrapCause::IndirectCallSignatureMismatch
        );
        assert_eq!(
            indirect_call_index_out_of_bounds::<()>().unwrap_err().cause(),
            TrapCause::UndefinedTableElement
        );
    }
}
